//! Core game logic module - pure, deterministic, and testable
//!
//! Contains all game rules and session state. Zero dependencies on UI or
//! I/O, so the same engine runs headless in tests and benches:
//!
//! - [`board`]: 8x8 grid with match detection and gravity compaction
//! - [`generator`]: match-free board generation and tile refill
//! - [`game_state`]: session engine (moves, cascades, combo, power-ups)
//! - [`rng`]: deterministic LCG for reproducible sessions
//! - [`scoring`]: scoring formulas and power-up award rules

pub mod board;
pub mod game_state;
pub mod generator;
pub mod rng;
pub mod scoring;

pub use board::{Board, MatchSet};
pub use game_state::{GameEvent, GameState, PowerUpInventory};
pub use generator::Generator;
pub use rng::SimpleRng;
