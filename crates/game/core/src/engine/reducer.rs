//! Structured mutations shared by the action transitions.

use crate::action::ActionError;
use crate::rules::{self, WinCheck};
use crate::state::{
    ActionDetails, ActionRecord, Color, Declaration, GameState, MoveState, Phase, Piece,
    Square, Timestamp, Verdict, WinReason,
};

/// Wraps mutable access to [`GameState`] and collects the terminal conditions
/// observed along the way.
pub struct StateReducer<'a> {
    state: &'a mut GameState,
    check: WinCheck,
}

impl<'a> StateReducer<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self {
            state,
            check: WinCheck::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        self.state
    }

    pub fn push_verdict(&mut self, verdict: Verdict) {
        self.check.push(verdict);
    }

    /// Moves `piece` into `captor`'s captured bucket.
    pub fn capture(&mut self, captor: Color, piece: Piece) {
        self.check.captured(captor, &piece);
        self.state.captured[captor].push(piece);
    }

    /// Removes the piece on `square`, failing if the square is empty.
    pub fn lift(&mut self, square: Square) -> Result<Piece, ActionError> {
        self.state.board.take(square).ok_or_else(|| {
            ActionError::InvariantViolated(format!("expected a piece at {square}"))
        })
    }

    /// Returns `piece` to its owner's stash.
    pub fn return_to_stash(&mut self, piece: Piece) -> Result<(), ActionError> {
        self.state.stashes[piece.color]
            .try_push(piece)
            .map_err(|_| ActionError::InvariantViolated("stash overflow".to_owned()))
    }

    /// Puts `color`'s on-deck piece onto `square` and leaves the colour owing a
    /// replacement.
    pub fn deploy_on_deck(&mut self, color: Color, square: Square) {
        let piece = self.state.on_decks[color].take();
        self.state.board.set(square, piece);
        self.state.on_decking_player = Some(color);
    }

    /// Commits the pending move as if nobody objected.
    ///
    /// The mover's piece occupies the destination, capturing whatever stood
    /// there. A declared King arriving on its throne row wins outright.
    /// Returns the resolved move's destination, `None` when nothing was pending.
    pub fn resolve_pending(&mut self) -> Result<Option<Square>, ActionError> {
        let Some(mv) = self.state.pending_move().copied() else {
            return Ok(None);
        };

        let piece = self.lift(mv.from)?;
        match self.state.board.set(mv.to, Some(piece)) {
            Some(target) => {
                self.capture(mv.player, target);
                self.state.moves_since_action = 0;
            }
            None => self.state.moves_since_action += 1,
        }

        if mv.declaration == Declaration::King && mv.to.row == mv.player.throne_row() {
            self.check.push(Verdict::win(mv.player, WinReason::Throne));
        }

        self.set_last_move_state(MoveState::Resolved);
        Ok(Some(mv.to))
    }

    pub fn set_last_move_state(&mut self, state: MoveState) {
        if let Some(mv) = self.state.last_move_mut() {
            mv.state = state;
        }
    }

    pub fn log(&mut self, player: Color, timestamp: Timestamp, details: ActionDetails) {
        self.state
            .actions
            .push(ActionRecord::new(player, timestamp, details));
    }

    /// Adds the per-action increment to `color`'s clock.
    pub fn credit_increment(&mut self, color: Color) {
        let increment = self.state.config.time_control.increment_ms;
        self.state.clock.credit(color, increment);
    }

    /// Evaluates every terminal condition and freezes the game if one holds.
    ///
    /// Conditions collected so far are consumed, so settling twice in one
    /// transition only reports new events.
    pub fn settle(&mut self, now: Timestamp) -> Option<Verdict> {
        let check = std::mem::take(&mut self.check);
        if !self.state.is_active {
            return None;
        }
        let verdict = rules::evaluate(self.state, check)?;
        end_game(self.state, verdict, now);
        Some(verdict)
    }
}

/// Freezes the record with `verdict`.
pub fn end_game(state: &mut GameState, verdict: Verdict, at: Timestamp) {
    state.is_active = false;
    state.winner = verdict.winner;
    state.win_reason = Some(verdict.reason);
    state.end_time = Some(at);
    state.phase = Phase::Terminal;
    state.draw_offer = None;
    state.draw_offer_cooldowns = Default::default();
}
