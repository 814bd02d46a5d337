use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::components::Side;
use crate::config::Config;
use crate::error::MatchError;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Strict overlap; touching edges do not count
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}

/// Rectangle the ball and paddles are confined to.
///
/// The horizontal origin is always 0; `y` lets hosts reserve a strip
/// above the field (for a score bar, say).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayArea {
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PlayArea {
    pub fn new(y: f32, width: f32, height: f32) -> Result<Self, MatchError> {
        let area = Self { y, width, height };
        area.validate()?;
        Ok(area)
    }

    /// Whole rendering surface, no reserved strip
    pub fn from_surface(width: f32, height: f32) -> Result<Self, MatchError> {
        Self::new(0.0, width, height)
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        if !self.y.is_finite() {
            return Err(MatchError::InvalidPlayArea(format!(
                "y origin {} is not finite",
                self.y
            )));
        }
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(MatchError::InvalidPlayArea(format!(
                "width {} must be positive",
                self.width
            )));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(MatchError::InvalidPlayArea(format!(
                "height {} must be positive",
                self.height
            )));
        }
        Ok(())
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Clamp the top edge of an object of `size` so it stays inside vertically
    pub fn clamp_y(&self, y: f32, size: f32) -> f32 {
        // max() last so an object taller than the area pins to the top
        y.min(self.bottom() - size).max(self.top())
    }
}

/// Object sizes derived from the play area
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Geometry {
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_margin: f32,
    pub ball_size: f32,
}

impl Geometry {
    pub fn for_area(area: &PlayArea, config: &Config) -> Self {
        Self {
            paddle_width: area.width * config.paddle_width_ratio,
            paddle_height: area.height * config.paddle_height_ratio,
            paddle_margin: area.width * config.paddle_margin_ratio,
            ball_size: area.width.min(area.height) * config.ball_size_ratio,
        }
    }

    /// X position (left edge) of the paddle on `side`
    pub fn paddle_x(&self, area: &PlayArea, side: Side) -> f32 {
        match side {
            Side::Left => self.paddle_margin,
            Side::Right => area.width - self.paddle_margin - self.paddle_width,
        }
    }

    /// Paddle y that centres it vertically
    pub fn centered_paddle_y(&self, area: &PlayArea) -> f32 {
        area.center_y() - self.paddle_height / 2.0
    }

    /// Ball top-left corner at the centre of the field
    pub fn ball_spawn(&self, area: &PlayArea) -> Vec2 {
        area.center() - Vec2::splat(self.ball_size / 2.0)
    }
}
