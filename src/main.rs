//! Crystal Match terminal runner (default binary).
//!
//! Uses crossterm for input and a framebuffer-based renderer. The engine
//! advances on a fixed 16 ms tick; input is polled with a timeout until the
//! next tick.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use crystal_match::core::GameState;
use crystal_match::input::{handle_key_event, should_quit, Cursor};
use crystal_match::term::{GameView, TerminalRenderer, Viewport};
use crystal_match::types::{GameAction, GamePhase, PowerUpKind, TICK_MS};

fn main() -> Result<()> {
    let seed = std::process::id();
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, seed);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, seed: u32) -> Result<()> {
    let mut game = GameState::new(seed);
    let mut cursor = Cursor::new();
    let view = GameView::default();

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let fb = view.render(&game, cursor, Viewport::new(w, h));
        term.draw(&fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        apply_action(&mut game, &mut cursor, action);
                    }
                }
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            game.tick(TICK_MS);
            // Events are drained so the queue does not grow unbounded; a
            // richer host would surface them in the UI.
            let _ = game.take_events();
        }
    }
}

fn apply_action(game: &mut GameState, cursor: &mut Cursor, action: GameAction) {
    match action {
        GameAction::CursorUp => cursor.move_up(),
        GameAction::CursorDown => cursor.move_down(),
        GameAction::CursorLeft => cursor.move_left(),
        GameAction::CursorRight => cursor.move_right(),
        GameAction::SwapUp => try_swap(game, cursor, -1, 0),
        GameAction::SwapDown => try_swap(game, cursor, 1, 0),
        GameAction::SwapLeft => try_swap(game, cursor, 0, -1),
        GameAction::SwapRight => try_swap(game, cursor, 0, 1),
        GameAction::ArmBomb => toggle_arm(game, PowerUpKind::Bomb),
        GameAction::ArmLightning => toggle_arm(game, PowerUpKind::Lightning),
        GameAction::ArmRainbow => toggle_arm(game, PowerUpKind::Rainbow),
        GameAction::Tap => match game.phase() {
            GamePhase::Menu => game.start(),
            GamePhase::Playing => {
                let _ = game.tap(cursor.row, cursor.col);
            }
            GamePhase::GameOver => {}
        },
        GameAction::Restart => game.restart(),
    }
}

fn try_swap(game: &mut GameState, cursor: &Cursor, d_row: i8, d_col: i8) {
    if let Some(target) = cursor.neighbor(d_row, d_col) {
        let _ = game.attempt_move(cursor.pos(), target);
    }
}

fn toggle_arm(game: &mut GameState, kind: PowerUpKind) {
    if game.armed() == Some(kind) {
        game.disarm();
    } else {
        let _ = game.arm_power_up(kind);
    }
}
