use crate::action::{
    ActionContext, ActionError, ActionResult, ActionTransition, check_invariants, ensure_active,
    ensure_clock, ensure_turn,
};
use crate::engine::StateReducer;
use crate::state::{
    ActionDetails, ChallengeOutcome, Color, Declaration, GameState, Identity, Move, MoveState,
    Phase, Verdict, WinReason,
};

/// Calls the opponent's last declaration a bluff.
///
/// Against a move, the piece on the origin square is compared with the
/// declared identity. Against a bomb, the piece on the destination square is
/// checked for being a Bomb. Whoever guessed wrong pays a dagger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChallengeAction {
    pub color: Color,
}

impl ChallengeAction {
    pub fn new(color: Color) -> Self {
        Self { color }
    }

    fn challenged_move(state: &GameState) -> Result<Move, ActionError> {
        state
            .last_move()
            .copied()
            .ok_or(ActionError::NothingToChallenge)
    }

    /// Adjudicates a challenge against a declared move.
    fn against_move(
        &self,
        reducer: &mut StateReducer<'_>,
        mv: Move,
    ) -> Result<ChallengeOutcome, ActionError> {
        let challenger = self.color;
        let mover = mv.player;
        let piece = reducer.lift(mv.from)?;

        if piece.identity != mv.declaration.identity() {
            reducer.capture(challenger, piece);
            reducer.set_last_move_state(MoveState::Completed);
            reducer.state_mut().on_decking_player = None;
            return Ok(ChallengeOutcome::Success);
        }

        reducer.state_mut().daggers[challenger] += 1;
        reducer.set_last_move_state(MoveState::Completed);

        if mv.declaration == Declaration::King {
            // The revealed King stays where it stood; the game is over.
            reducer.state_mut().board.set(mv.from, Some(piece));
            reducer.push_verdict(Verdict::win(mover, WinReason::TrueKing));
            return Ok(ChallengeOutcome::Fail);
        }

        reducer.return_to_stash(piece)?;
        if let Some(target) = reducer.state_mut().board.take(mv.to) {
            reducer.capture(mover, target);
        }
        reducer.deploy_on_deck(mover, mv.to);
        Ok(ChallengeOutcome::Fail)
    }

    /// Adjudicates a challenge against a bomb thrown at `mv`.
    fn against_bomb(
        &self,
        reducer: &mut StateReducer<'_>,
        mv: Move,
    ) -> Result<ChallengeOutcome, ActionError> {
        let mover = mv.player;
        let bomber = mover.opponent();
        let bombed = reducer.lift(mv.to)?;
        let attacker = reducer.lift(mv.from)?;

        if bombed.identity != Identity::Bomb {
            reducer.capture(mover, bombed);
            reducer.state_mut().daggers[bomber] += 1;
            reducer.state_mut().board.set(mv.to, Some(attacker));
            reducer.set_last_move_state(MoveState::Resolved);
            reducer.state_mut().on_decking_player = None;
            return Ok(ChallengeOutcome::Success);
        }

        reducer.return_to_stash(bombed)?;
        reducer.deploy_on_deck(bomber, mv.to);
        reducer.capture(bomber, attacker);
        reducer.state_mut().daggers[mover] += 1;
        reducer.set_last_move_state(MoveState::Completed);
        Ok(ChallengeOutcome::Fail)
    }
}

impl ActionTransition for ChallengeAction {
    type Error = ActionError;
    type Result = ActionResult;

    fn player(&self) -> Option<Color> {
        Some(self.color)
    }

    fn pre_validate(&self, state: &GameState, ctx: &ActionContext) -> Result<(), Self::Error> {
        ensure_active(state)?;
        ensure_clock(state, ctx.now)?;
        ensure_turn(state, self.color)?;
        if state.on_decking_player == Some(self.color) {
            return Err(ActionError::OnDeckingPlayerCannotChallenge);
        }

        let mv = Self::challenged_move(state)?;
        match state.phase {
            Phase::MovePendingResponse if mv.is_pending() => {
                if state.board.get(mv.from).is_none() {
                    return Err(ActionError::NoPieceAt { square: mv.from });
                }
            }
            Phase::BombPendingResponse => {
                for square in [mv.from, mv.to] {
                    if state.board.get(square).is_none() {
                        return Err(ActionError::NoPieceAt { square });
                    }
                }
            }
            _ => return Err(ActionError::NothingToChallenge),
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        ctx: &ActionContext,
    ) -> Result<Self::Result, Self::Error> {
        let mv = Self::challenged_move(state)?;
        let against_bomb = state.phase == Phase::BombPendingResponse;

        let mut reducer = StateReducer::new(state);
        let outcome = if against_bomb {
            self.against_bomb(&mut reducer, mv)?
        } else {
            self.against_move(&mut reducer, mv)?
        };

        let state = reducer.state_mut();
        match state.on_decking_player {
            Some(owing) => {
                state.player_turn = Some(owing);
                state.phase = Phase::OnDeckOwed;
            }
            None => {
                state.player_turn = Some(mv.player.opponent());
                state.phase = Phase::AwaitingMove;
            }
        }
        state.moves_since_action = 0;

        reducer.log(self.color, ctx.now, ActionDetails::Challenge { outcome });
        reducer.credit_increment(self.color);
        reducer.settle(ctx.now);

        Ok(ActionResult::Challenge {
            outcome,
            against_bomb,
        })
    }

    fn post_validate(&self, state: &GameState, _ctx: &ActionContext) -> Result<(), Self::Error> {
        check_invariants(state)
    }
}
