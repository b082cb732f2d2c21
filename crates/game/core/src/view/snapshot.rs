use crate::state::{
    ActionRecord, Board, Color, DrawOffer, GameId, GameState, Move, PerColor, Phase, Piece,
    Timestamp, WinReason,
};

use super::mask::{Viewer, mask};

/// Remaining time per colour, projected to the instant it was taken.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClockSnapshot {
    pub white_ms: u64,
    pub black_ms: u64,
    /// Whether any clock is ticking.
    pub active: bool,
}

impl ClockSnapshot {
    pub fn of(state: &GameState, now: Timestamp) -> Self {
        let running = state.running_colors();
        let remaining = state.clock.projected(&running, now);
        let clamp = |ms: i64| u64::try_from(ms).unwrap_or(0);
        Self {
            white_ms: clamp(remaining[Color::White]),
            black_ms: clamp(remaining[Color::Black]),
            active: state.is_active && state.clock.is_running() && !running.is_empty(),
        }
    }

    pub fn remaining(&self, color: Color) -> u64 {
        match color {
            Color::White => self.white_ms,
            Color::Black => self.black_ms,
        }
    }
}

/// What an onlooker is told about a game.
///
/// Identities are masked as for [`Viewer::Spectator`], and stashes, on-deck
/// slots, and the pending on-deck debt are left out entirely.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpectatorSnapshot {
    pub id: GameId,
    pub board: Board,
    pub captured: PerColor<Vec<Piece>>,
    pub daggers: PerColor<u8>,
    pub moves: Vec<Move>,
    pub actions: Vec<ActionRecord>,
    pub player_turn: Option<Color>,
    pub phase: Phase,
    pub setup_complete: PerColor<bool>,
    pub players_ready: PerColor<bool>,
    pub moves_since_action: u32,
    pub is_active: bool,
    pub winner: Option<Color>,
    pub win_reason: Option<WinReason>,
    pub draw_offer: Option<DrawOffer>,
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
    pub clock: ClockSnapshot,
}

pub fn spectator_snapshot(state: &GameState, now: Timestamp) -> SpectatorSnapshot {
    let clock = ClockSnapshot::of(state, now);
    let view = mask(state, Viewer::Spectator);
    SpectatorSnapshot {
        id: view.id,
        board: view.board,
        captured: view.captured,
        daggers: view.daggers,
        moves: view.moves,
        actions: view.actions,
        player_turn: view.player_turn,
        phase: view.phase,
        setup_complete: view.setup_complete,
        players_ready: view.players_ready,
        moves_since_action: view.moves_since_action,
        is_active: view.is_active,
        winner: view.winner,
        win_reason: view.win_reason,
        draw_offer: view.draw_offer,
        start_time: view.start_time,
        end_time: view.end_time,
        clock,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::state::Identity;

    #[test]
    fn clock_snapshot_projects_and_clamps() {
        let mut state = GameState::new(GameId(1), GameConfig::default(), Timestamp::ZERO);
        let base = state.config.time_control.base_ms;
        state.clock.start(Timestamp::ZERO);

        let snapshot = ClockSnapshot::of(&state, Timestamp::from_millis(1_000));
        assert_eq!(snapshot.white_ms, base - 1_000);
        assert_eq!(snapshot.black_ms, base - 1_000);
        assert!(snapshot.active);

        let late = ClockSnapshot::of(&state, Timestamp::from_millis(base + 5_000));
        assert_eq!(late.remaining(Color::White), 0);
    }

    #[test]
    fn spectator_snapshot_hides_identities() {
        let mut state = GameState::new(GameId(1), GameConfig::default(), Timestamp::ZERO);
        let king = state.take_from_stash(Color::White, Identity::King);
        state.board.set(crate::state::Square::new(0, 2), king);

        let snapshot = spectator_snapshot(&state, Timestamp::ZERO);
        assert!(snapshot
            .board
            .pieces()
            .all(|(_, piece)| piece.identity == Identity::Unknown));
        assert!(!snapshot.clock.active);
    }
}
