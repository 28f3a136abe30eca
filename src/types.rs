//! Core types shared across the application
//! This module contains pure data types with no external dependencies

/// Board dimensions (the grid is square)
pub const GRID_SIZE: u8 = 8;

/// Moves available per session
pub const MOVES_BUDGET: u32 = 30;

/// Starting inventory per power-up kind
pub const STARTING_POWER_UPS: u32 = 2;

/// Game timing constants (in milliseconds)
pub const TICK_MS: u32 = 16;
pub const CLEAR_PAUSE_MS: u32 = 250;
pub const DROP_PAUSE_MS: u32 = 250;
pub const COMBO_COOLDOWN_MS: u32 = 1000;
pub const RAINBOW_PRIME_MS: u32 = 300;

/// Scoring constants
pub const MATCH_BASE_POINTS: u32 = 10;
pub const COMBO_MULTIPLIER_CAP: u32 = 10;
pub const BOMB_POINTS_PER_TILE: u32 = 20;
pub const LIGHTNING_POINTS_PER_TILE: u32 = 15;

/// Match lengths that earn power-ups
pub const POWER_UP_MATCH_LEN: usize = 4;
pub const RAINBOW_MATCH_LEN: usize = 6;

/// Pacing delays for the resolution pipeline.
///
/// These gate input (no move or power-up is accepted while a clear/drop step
/// is outstanding), so they are gameplay-relevant and injected into the
/// engine rather than read from globals. Tests use [`Timings::turbo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// Pause after a match is scored, before its cells are cleared.
    pub clear_pause_ms: u32,
    /// Pause after clearing, before gravity compaction and refill.
    pub drop_pause_ms: u32,
    /// Delay after a chain settles before the combo counter resets.
    pub combo_cooldown_ms: u32,
    /// Delay between placing the rainbow marker and resolving its clear.
    pub rainbow_prime_ms: u32,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            clear_pause_ms: CLEAR_PAUSE_MS,
            drop_pause_ms: DROP_PAUSE_MS,
            combo_cooldown_ms: COMBO_COOLDOWN_MS,
            rainbow_prime_ms: RAINBOW_PRIME_MS,
        }
    }
}

impl Timings {
    /// Zero every delay so resolution chains settle within a single tick.
    pub const fn turbo() -> Self {
        Self {
            clear_pause_ms: 0,
            drop_pause_ms: 0,
            combo_cooldown_ms: 0,
            rainbow_prime_ms: 0,
        }
    }
}

/// Tile kinds: five ordinary gems plus the rainbow marker.
///
/// The rainbow marker only appears on the board transiently, while a rainbow
/// power-up is primed; it is never produced by generation or refill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileType {
    Ruby,
    Amber,
    Peridot,
    Sapphire,
    Amethyst,
    Rainbow,
}

/// The ordinary palette used by generation and refill.
pub const PALETTE: [TileType; 5] = [
    TileType::Ruby,
    TileType::Amber,
    TileType::Peridot,
    TileType::Sapphire,
    TileType::Amethyst,
];

impl TileType {
    pub fn is_ordinary(&self) -> bool {
        !matches!(self, TileType::Rainbow)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TileType::Ruby => "ruby",
            TileType::Amber => "amber",
            TileType::Peridot => "peridot",
            TileType::Sapphire => "sapphire",
            TileType::Amethyst => "amethyst",
            TileType::Rainbow => "rainbow",
        }
    }
}

/// Cell on the board (None = empty, Some = holds a tile)
pub type Cell = Option<TileType>;

/// A board coordinate as (row, col), both in `0..GRID_SIZE`.
pub type Coord = (u8, u8);

/// Power-up kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    Bomb,
    Lightning,
    Rainbow,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::Bomb,
        PowerUpKind::Lightning,
        PowerUpKind::Rainbow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::Bomb => "bomb",
            PowerUpKind::Lightning => "lightning",
            PowerUpKind::Rainbow => "rainbow",
        }
    }
}

/// Session lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Menu,
    Playing,
    GameOver,
}

/// Outcome of an attempted move or power-up activation.
///
/// `Ignored` means a precondition failed (wrong phase, busy pipeline, bad
/// coordinates, empty inventory): nothing changed and no event was emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Accepted,
    Rejected,
    Ignored,
}

/// Frontend actions produced by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    SwapUp,
    SwapDown,
    SwapLeft,
    SwapRight,
    ArmBomb,
    ArmLightning,
    ArmRainbow,
    Tap,
    Restart,
}
