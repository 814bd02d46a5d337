//! Keyboard input mapping
//!
//! W/S drive the left paddle, the arrow keys the right one.

use match_core::Key;

/// Map a `KeyboardEvent.key` value to a paddle key
pub fn key_for(name: &str) -> Option<Key> {
    match name {
        "w" | "W" => Some(Key::UpLeft),
        "s" | "S" => Some(Key::DownLeft),
        "ArrowUp" => Some(Key::UpRight),
        "ArrowDown" => Some(Key::DownRight),
        _ => None,
    }
}
