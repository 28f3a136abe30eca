//! Key mapping from terminal events to game actions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::GameAction;

/// Map keyboard input to game actions.
///
/// Arrows / `hjkl` move the cursor; `wasd` swaps the cursor tile with its
/// neighbor in that direction; `1`/`2`/`3` arm a power-up; space or enter
/// taps the cursor cell.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    match key.code {
        // Cursor movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => Some(GameAction::CursorLeft),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => Some(GameAction::CursorRight),
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => Some(GameAction::CursorUp),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => Some(GameAction::CursorDown),

        // Directional swaps
        KeyCode::Char('a') | KeyCode::Char('A') => Some(GameAction::SwapLeft),
        KeyCode::Char('d') | KeyCode::Char('D') => Some(GameAction::SwapRight),
        KeyCode::Char('w') | KeyCode::Char('W') => Some(GameAction::SwapUp),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(GameAction::SwapDown),

        // Power-ups
        KeyCode::Char('1') => Some(GameAction::ArmBomb),
        KeyCode::Char('2') => Some(GameAction::ArmLightning),
        KeyCode::Char('3') => Some(GameAction::ArmRainbow),

        // Tap (activate armed power-up / start from menu)
        KeyCode::Char(' ') | KeyCode::Enter => Some(GameAction::Tap),

        // Restart
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Restart),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
