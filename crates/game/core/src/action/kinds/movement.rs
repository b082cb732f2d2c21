use crate::action::{
    ActionContext, ActionError, ActionResult, ActionTransition, check_invariants, ensure_active,
    ensure_clock, ensure_turn,
};
use crate::engine::StateReducer;
use crate::rules;
use crate::state::{
    ActionDetails, Board, Color, Declaration, GameState, Move, Phase, Square,
};

/// Declares a move of the piece on `from` to `to` under `declaration`.
///
/// The move stays pending until the opponent answers it. Declaring a move
/// while the opponent's move is still pending resolves that move first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAction {
    pub color: Color,
    pub from: Square,
    pub to: Square,
    pub declaration: Declaration,
}

impl MoveAction {
    pub fn new(color: Color, from: Square, to: Square, declaration: Declaration) -> Self {
        Self {
            color,
            from,
            to,
            declaration,
        }
    }

    /// Board as it will stand once the pending move resolves naturally.
    ///
    /// The new move is validated against this board: the destination of the
    /// pending move must be vacated before anything else can land there.
    fn projected_board(state: &GameState) -> Board {
        let mut board = state.board.clone();
        if let Some(pending) = state.pending_move()
            && let Some(piece) = board.take(pending.from)
        {
            board.set(pending.to, Some(piece));
        }
        board
    }
}

impl ActionTransition for MoveAction {
    type Error = ActionError;
    type Result = ActionResult;

    fn player(&self) -> Option<Color> {
        Some(self.color)
    }

    fn pre_validate(&self, state: &GameState, ctx: &ActionContext) -> Result<(), Self::Error> {
        ensure_active(state)?;
        if !state.both_setup() {
            return Err(ActionError::SetupIncomplete);
        }
        ensure_clock(state, ctx.now)?;

        for square in [self.from, self.to] {
            if !square.in_bounds() {
                return Err(ActionError::OutOfBounds { square });
            }
        }

        ensure_turn(state, self.color)?;
        match state.phase {
            Phase::OnDeckOwed => {
                return Err(match state.on_decking_player {
                    Some(owing) if owing == self.color => ActionError::OnDeckOwed { color: owing },
                    Some(owing) => ActionError::AwaitingOnDeck { color: owing },
                    None => ActionError::InvariantViolated(
                        "on-deck phase without an owing player".to_owned(),
                    ),
                });
            }
            Phase::BombPendingResponse => return Err(ActionError::BombPending),
            _ => {}
        }

        if self.from == self.to {
            return Err(ActionError::SameSquare);
        }

        let board = Self::projected_board(state);
        let piece = board
            .get(self.from)
            .ok_or(ActionError::NoPieceAt { square: self.from })?;
        if piece.color != self.color {
            return Err(ActionError::NotYourPiece {
                square: self.from,
                color: self.color,
            });
        }
        if board.is_owned_by(self.to, self.color) {
            return Err(ActionError::DestinationOccupied { square: self.to });
        }
        if !rules::is_legal(&board, self.from, self.to, self.declaration) {
            return Err(ActionError::IllegalDeclaration {
                declaration: self.declaration.identity(),
                from: self.from,
                to: self.to,
            });
        }

        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        ctx: &ActionContext,
    ) -> Result<Self::Result, Self::Error> {
        let mut reducer = StateReducer::new(state);
        let resolved = reducer.resolve_pending()?;

        // The prior move may have ended the game; the new move is then void.
        if reducer.settle(ctx.now).is_some() {
            return Ok(ActionResult::Move {
                resolved,
                recorded: false,
            });
        }

        let state = reducer.state_mut();
        state.moves.push(Move::pending(
            self.color,
            self.from,
            self.to,
            self.declaration,
            ctx.now,
        ));
        state.player_turn = Some(self.color.opponent());
        state.phase = Phase::MovePendingResponse;
        reducer.log(
            self.color,
            ctx.now,
            ActionDetails::Move {
                from: self.from,
                to: self.to,
                declaration: self.declaration,
            },
        );
        reducer.credit_increment(self.color);
        reducer.settle(ctx.now);

        Ok(ActionResult::Move {
            resolved,
            recorded: true,
        })
    }

    fn post_validate(&self, state: &GameState, _ctx: &ActionContext) -> Result<(), Self::Error> {
        check_invariants(state)
    }
}
