//! Authoritative game record.
//!
//! [`GameState`] is the aggregate root for one game. Runtime layers clone,
//! persist, or mask it, but mutate it exclusively through the engine.
pub mod types;

use arrayvec::ArrayVec;

use crate::config::GameConfig;
pub use types::{
    ActionDetails, ActionKind, ActionRecord, Board, ChallengeOutcome, Color, Declaration,
    DrawOffer, GameClock, GameId, Identity, Move, MoveState, PerColor, Phase, Piece, Placement,
    Square, TimeControl, Timestamp, Verdict, WinReason,
};

/// Undeployed pieces of one colour.
pub type Stash = ArrayVec<Piece, { GameConfig::STASH_SIZE }>;

/// Canonical snapshot of one game.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub id: GameId,
    /// Tunables fixed at creation.
    pub config: GameConfig,

    pub board: Board,
    pub stashes: PerColor<Stash>,
    /// Pieces staged for blind replacement, at most one per colour.
    pub on_decks: PerColor<Option<Piece>>,
    /// Pieces removed from play, grouped by the colour that captured them.
    pub captured: PerColor<Vec<Piece>>,
    pub daggers: PerColor<u8>,

    pub moves: Vec<Move>,
    pub actions: Vec<ActionRecord>,

    pub player_turn: Option<Color>,
    /// Colour that owes an on-deck placement before anyone may act.
    pub on_decking_player: Option<Color>,
    pub phase: Phase,
    pub setup_complete: PerColor<bool>,
    pub players_ready: PerColor<bool>,
    /// Consecutive natural resolutions without a capture.
    pub moves_since_action: u32,

    pub is_active: bool,
    /// `None` with a `win_reason` set means the game was drawn.
    pub winner: Option<Color>,
    pub win_reason: Option<WinReason>,

    pub draw_offer: Option<DrawOffer>,
    /// Earliest instant each colour may offer a draw again.
    pub draw_offer_cooldowns: PerColor<Option<Timestamp>>,

    pub clock: GameClock,
    pub created_at: Timestamp,
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
}

impl GameState {
    /// Creates a fresh game: empty board, full stashes, nobody ready.
    pub fn new(id: GameId, config: GameConfig, created_at: Timestamp) -> Self {
        Self {
            id,
            clock: GameClock::new(config.time_control),
            config,
            board: Board::empty(),
            stashes: PerColor::new(Self::initial_stash(Color::White), Self::initial_stash(Color::Black)),
            on_decks: PerColor::default(),
            captured: PerColor::default(),
            daggers: PerColor::default(),
            moves: Vec::new(),
            actions: Vec::new(),
            player_turn: None,
            on_decking_player: None,
            phase: Phase::Setup,
            setup_complete: PerColor::default(),
            players_ready: PerColor::default(),
            moves_since_action: 0,
            is_active: true,
            winner: None,
            win_reason: None,
            draw_offer: None,
            draw_offer_cooldowns: PerColor::default(),
            created_at,
            start_time: None,
            end_time: None,
        }
    }

    /// The eight pieces each colour starts with.
    pub fn initial_stash(color: Color) -> Stash {
        GameConfig::STASH_COMPOSITION
            .iter()
            .flat_map(|&(identity, count)| {
                std::iter::repeat_n(Piece::new(color, identity), count)
            })
            .collect()
    }

    #[inline]
    pub fn last_move(&self) -> Option<&Move> {
        self.moves.last()
    }

    #[inline]
    pub fn last_move_mut(&mut self) -> Option<&mut Move> {
        self.moves.last_mut()
    }

    /// The latest move when it still awaits an answer.
    pub fn pending_move(&self) -> Option<&Move> {
        self.moves.last().filter(|mv| mv.is_pending())
    }

    #[inline]
    pub fn last_action(&self) -> Option<&ActionRecord> {
        self.actions.last()
    }

    pub fn both_setup(&self) -> bool {
        self.setup_complete[Color::White] && self.setup_complete[Color::Black]
    }

    pub fn both_ready(&self) -> bool {
        self.players_ready[Color::White] && self.players_ready[Color::Black]
    }

    /// Number of pieces of `identity` in the colour's stash.
    pub fn stash_count(&self, color: Color, identity: Identity) -> usize {
        self.stashes[color]
            .iter()
            .filter(|piece| piece.identity == identity)
            .count()
    }

    /// Removes one piece of `identity` from the colour's stash.
    pub fn take_from_stash(&mut self, color: Color, identity: Identity) -> Option<Piece> {
        let stash = &mut self.stashes[color];
        let index = stash.iter().position(|piece| piece.identity == identity)?;
        Some(stash.remove(index))
    }

    /// Colours whose clock is currently running.
    ///
    /// During setup every colour that has not deployed yet runs; afterwards
    /// only the side to move.
    pub fn running_colors(&self) -> ArrayVec<Color, 2> {
        let mut running = ArrayVec::new();
        if !self.is_active {
            return running;
        }
        if !self.both_setup() {
            running.extend(Color::ALL.into_iter().filter(|&c| !self.setup_complete[c]));
        } else if let Some(turn) = self.player_turn {
            running.push(turn);
        }
        running
    }

    /// Terminal verdict of a finished game.
    pub fn verdict(&self) -> Option<Verdict> {
        if self.is_active {
            return None;
        }
        self.win_reason.map(|reason| Verdict {
            winner: self.winner,
            reason,
        })
    }
}
