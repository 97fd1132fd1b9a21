//! Keyboard mapping
//!
//! Player 1 (left) uses W/S, player 2 (right) the arrow keys. Each key press
//! moves a paddle one step; holding a key relies on the browser's repeat.

use crate::sim::{PaddleDir, PaddleMove, Side, TickInput};

/// What a key does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Move(PaddleMove),
    Pause,
}

/// Map a `KeyboardEvent.key` value to a command
pub fn key_command(key: &str) -> Option<KeyCommand> {
    let mv = |side, dir| Some(KeyCommand::Move(PaddleMove { side, dir }));
    match key {
        "ArrowUp" => mv(Side::Right, PaddleDir::Up),
        "ArrowDown" => mv(Side::Right, PaddleDir::Down),
        "w" | "W" => mv(Side::Left, PaddleDir::Up),
        "s" | "S" => mv(Side::Left, PaddleDir::Down),
        "Escape" | "p" | "P" => Some(KeyCommand::Pause),
        _ => None,
    }
}

/// Queue the command for `key` into the next tick's input.
/// Returns whether the key was handled.
pub fn apply_key(input: &mut TickInput, key: &str) -> bool {
    match key_command(key) {
        Some(KeyCommand::Move(mv)) => input.moves.push(mv),
        Some(KeyCommand::Pause) => input.pause = !input.pause,
        None => return false,
    }
    true
}
