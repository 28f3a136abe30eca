//! Input layer: key mapping and the board cursor.

pub mod cursor;
pub mod map;

pub use cursor::Cursor;
pub use map::{handle_key_event, should_quit};
