use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::arena::Aabb;

/// Which end of the field a paddle defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// Who moves a paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Controller {
    Human,
    Ai,
}

/// Paddle component
///
/// `x`/`y` is the top-left corner. `vy` is in units per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paddle {
    pub side: Side,
    pub controller: Controller,
    pub x: f32,
    pub y: f32,
    pub vy: f32,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    pub fn new(side: Side, controller: Controller, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            side,
            controller,
            x,
            y,
            vy: 0.0,
            width,
            height,
        }
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(Vec2::new(self.x, self.y), Vec2::new(self.width, self.height))
    }
}

/// Ball component - a square of side `size`, `pos` is its top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, size: f32) -> Self {
        Self { pos, vel, size }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, Vec2::splat(self.size))
    }

    /// Reset ball to `spawn` with a random direction.
    ///
    /// `dx` is always ±`speed`. `dy` is uniform over
    /// `[-speed, speed]` minus the band `(-min_dy, min_dy)`, drawn by
    /// rejection so the ball never travels flat.
    pub fn reset(&mut self, spawn: Vec2, speed: f32, min_dy: f32, rng: &mut crate::GameRng) {
        use rand::Rng;

        self.pos = spawn;
        let dx = if rng.0.gen_bool(0.5) { speed } else { -speed };
        let dy = loop {
            let candidate: f32 = rng.0.gen_range(-speed..=speed);
            if candidate.abs() >= min_dy {
                break candidate;
            }
        };
        self.vel = Vec2::new(dx, dy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameRng;

    #[test]
    fn test_paddle_center_y() {
        let paddle = Paddle::new(Side::Left, Controller::Human, 20.0, 100.0, 10.0, 80.0);
        assert_eq!(paddle.center_y(), 140.0);
    }

    #[test]
    fn test_ball_reset_never_flat() {
        let mut rng = GameRng::new(7);
        let mut ball = Ball::new(Vec2::ZERO, Vec2::ZERO, 12.0);
        let spawn = Vec2::new(394.0, 294.0);
        for _ in 0..500 {
            ball.reset(spawn, 5.0, 5.0 / 6.0, &mut rng);
            assert_eq!(ball.pos, spawn);
            assert_eq!(ball.vel.x.abs(), 5.0);
            assert!(ball.vel.y.abs() >= 5.0 / 6.0);
            assert!(ball.vel.y.abs() <= 5.0);
        }
    }

    #[test]
    fn test_ball_reset_serves_both_ways() {
        let mut rng = GameRng::new(99);
        let mut ball = Ball::new(Vec2::ZERO, Vec2::ZERO, 12.0);
        let mut lefts = 0;
        let mut rights = 0;
        for _ in 0..200 {
            ball.reset(Vec2::ZERO, 5.0, 1.0, &mut rng);
            if ball.vel.x < 0.0 {
                lefts += 1;
            } else {
                rights += 1;
            }
        }
        assert!(lefts > 0 && rights > 0, "both directions should occur");
    }
}
