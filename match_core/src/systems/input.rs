use hecs::World;
use serde::{Deserialize, Serialize};

use crate::components::{Controller, Paddle, Side};

/// Logical paddle keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    UpLeft,
    DownLeft,
    UpRight,
    DownRight,
}

impl Key {
    pub fn side(self) -> Side {
        match self {
            Key::UpLeft | Key::DownLeft => Side::Left,
            Key::UpRight | Key::DownRight => Side::Right,
        }
    }

    /// -1 = up, 1 = down (screen y grows downward)
    pub fn dir(self) -> f32 {
        match self {
            Key::UpLeft | Key::UpRight => -1.0,
            Key::DownLeft | Key::DownRight => 1.0,
        }
    }
}

/// Start moving the human paddle the key belongs to.
/// Returns false if no human paddle owns that side.
pub fn apply_key_down(world: &mut World, key: Key, paddle_speed: f32) -> bool {
    for (_entity, paddle) in world.query_mut::<&mut Paddle>() {
        if paddle.side == key.side() && paddle.controller == Controller::Human {
            paddle.vy = key.dir() * paddle_speed;
            return true;
        }
    }
    false
}

/// Stop the paddle, unless it is already moving the other way because
/// the opposite key went down after this one.
pub fn apply_key_up(world: &mut World, key: Key) -> bool {
    for (_entity, paddle) in world.query_mut::<&mut Paddle>() {
        if paddle.side == key.side() && paddle.controller == Controller::Human {
            if paddle.vy * key.dir() >= 0.0 {
                paddle.vy = 0.0;
            }
            return true;
        }
    }
    false
}
