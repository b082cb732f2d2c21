use crate::state::{Identity, TimeControl};

/// Game configuration constants and tunable parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    pub time_control: TimeControl,
    /// How long a colour must wait to offer a draw again after a decline.
    pub draw_offer_cooldown_ms: u64,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    pub const RANKS: usize = 6;
    pub const FILES: usize = 5;
    pub const STASH_SIZE: usize = 8;
    /// Pieces each colour starts with in its stash.
    pub const STASH_COMPOSITION: [(Identity, usize); 5] = [
        (Identity::King, 1),
        (Identity::Bomb, 1),
        (Identity::Bishop, 2),
        (Identity::Rook, 2),
        (Identity::Knight, 2),
    ];

    // ===== rule thresholds =====
    pub const MAX_DAGGERS: u8 = 3;
    pub const INACTIVITY_DRAW_LIMIT: u32 = 20;
    /// Longest slide a declared Bishop or Rook may make.
    pub const MAX_SLIDE: u8 = 3;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_DRAW_OFFER_COOLDOWN_MS: u64 = 10_000;

    pub fn new() -> Self {
        Self::for_mode(GameMode::default())
    }

    pub fn for_mode(mode: GameMode) -> Self {
        Self {
            time_control: mode.time_control(),
            draw_offer_cooldown_ms: Self::DEFAULT_DRAW_OFFER_COOLDOWN_MS,
        }
    }

    pub fn with_time_control(time_control: TimeControl) -> Self {
        Self {
            time_control,
            draw_offer_cooldown_ms: Self::DEFAULT_DRAW_OFFER_COOLDOWN_MS,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Preset time controls.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum GameMode {
    Ranked,
    #[default]
    Quickplay,
}

impl GameMode {
    pub const RANKED_BASE_MS: u64 = 120_000;
    pub const QUICKPLAY_BASE_MS: u64 = 300_000;
    pub const INCREMENT_MS: u64 = 3_000;

    pub const fn time_control(self) -> TimeControl {
        match self {
            GameMode::Ranked => TimeControl::new(Self::RANKED_BASE_MS, Self::INCREMENT_MS),
            GameMode::Quickplay => TimeControl::new(Self::QUICKPLAY_BASE_MS, Self::INCREMENT_MS),
        }
    }
}
