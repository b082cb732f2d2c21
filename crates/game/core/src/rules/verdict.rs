//! Win condition evaluation.

use crate::config::GameConfig;
use crate::state::{Color, GameState, Piece, Verdict, WinReason};

/// Terminal conditions observed while applying one action.
///
/// Transitions record the event-driven conditions (king captured, throne
/// reached, true king revealed) as they happen; [`evaluate`] then adds the
/// conditions that can be read off the record and keeps the one with the
/// highest priority.
#[derive(Clone, Debug, Default)]
pub struct WinCheck {
    best: Option<Verdict>,
}

impl WinCheck {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps `verdict` if it outranks everything seen so far; ties keep the earlier one.
    pub fn push(&mut self, verdict: Verdict) {
        match &self.best {
            Some(best) if best.reason <= verdict.reason => {}
            _ => self.best = Some(verdict),
        }
    }

    /// Records `piece` being taken by `captor`.
    pub fn captured(&mut self, captor: Color, piece: &Piece) {
        if piece.is_king() {
            self.push(Verdict::win(captor, WinReason::CapturedKing));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.best.is_none()
    }
}

/// Returns the highest-priority terminal condition, if any.
///
/// Dagger exhaustion and the inactivity draw are read from `state`, so a
/// threshold reached by an earlier action still ends the game here.
pub fn evaluate(state: &GameState, mut check: WinCheck) -> Option<Verdict> {
    for color in Color::ALL {
        if state.daggers[color] >= GameConfig::MAX_DAGGERS {
            check.push(Verdict::win(color.opponent(), WinReason::Daggers));
        }
    }
    if state.moves_since_action >= GameConfig::INACTIVITY_DRAW_LIMIT {
        check.push(Verdict::draw(WinReason::Draw));
    }
    check.best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{GameId, Identity, Timestamp};

    fn state() -> GameState {
        GameState::new(GameId(7), GameConfig::default(), Timestamp::ZERO)
    }

    #[test]
    fn quiet_state_has_no_verdict() {
        assert_eq!(evaluate(&state(), WinCheck::new()), None);
    }

    #[test]
    fn king_capture_outranks_daggers() {
        let mut state = state();
        state.daggers[Color::White] = 3;
        let mut check = WinCheck::new();
        check.captured(Color::White, &Piece::new(Color::Black, Identity::King));
        assert_eq!(
            evaluate(&state, check),
            Some(Verdict::win(Color::White, WinReason::CapturedKing))
        );
    }

    #[test]
    fn third_dagger_hands_the_game_to_the_opponent() {
        let mut state = state();
        state.daggers[Color::Black] = 3;
        assert_eq!(
            evaluate(&state, WinCheck::new()),
            Some(Verdict::win(Color::White, WinReason::Daggers))
        );
    }

    #[test]
    fn inactivity_limit_draws() {
        let mut state = state();
        state.moves_since_action = GameConfig::INACTIVITY_DRAW_LIMIT;
        assert_eq!(
            evaluate(&state, WinCheck::new()),
            Some(Verdict::draw(WinReason::Draw))
        );
    }

    #[test]
    fn king_capture_survives_a_flood_of_lesser_conditions() {
        let mut state = state();
        state.daggers[Color::Black] = 3;
        state.moves_since_action = GameConfig::INACTIVITY_DRAW_LIMIT;
        let mut check = WinCheck::new();
        for _ in 0..16 {
            check.push(Verdict::draw(WinReason::Draw));
        }
        check.captured(Color::Black, &Piece::new(Color::White, Identity::King));
        for _ in 0..16 {
            check.push(Verdict::win(Color::White, WinReason::Daggers));
        }
        assert_eq!(
            evaluate(&state, check),
            Some(Verdict::win(Color::Black, WinReason::CapturedKing))
        );
    }

    #[test]
    fn non_king_capture_is_not_terminal() {
        let mut check = WinCheck::new();
        check.captured(Color::Black, &Piece::new(Color::White, Identity::Rook));
        assert!(check.is_empty());
    }
}
