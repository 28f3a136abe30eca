//! Crystal Match - a deterministic 8x8 match-3 engine with a terminal
//! frontend.
//!
//! The [`core`] module is the engine proper: board, match detection, move
//! validation with commit/rollback, the timer-paced cascade resolver, the
//! combo counter, and the three power-ups. [`term`] and [`input`] are the
//! bundled crossterm frontend; [`types`] holds the shared constants and
//! plain data types.

pub mod core;
pub mod input;
pub mod term;
pub mod types;
