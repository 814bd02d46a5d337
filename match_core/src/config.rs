use serde::{Deserialize, Serialize};

use crate::error::MatchError;
use crate::params::Params;

/// Match tuning configuration
///
/// Missing fields in JSON fall back to [`Params`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paddle_width_ratio: f32,
    pub paddle_height_ratio: f32,
    pub paddle_margin_ratio: f32,
    pub ball_size_ratio: f32,
    pub paddle_speed: f32,
    pub ball_speed_initial: f32,
    pub ball_speed_up: f32,
    pub reset_min_dy_ratio: f32,
    pub max_score: u8,
    pub ai_decision_interval_ms: f64,
    pub ai_interval_decrement_ms: f64,
    pub ai_interval_floor_ms: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paddle_width_ratio: Params::PADDLE_WIDTH_RATIO,
            paddle_height_ratio: Params::PADDLE_HEIGHT_RATIO,
            paddle_margin_ratio: Params::PADDLE_MARGIN_RATIO,
            ball_size_ratio: Params::BALL_SIZE_RATIO,
            paddle_speed: Params::PADDLE_SPEED,
            ball_speed_initial: Params::BALL_SPEED_INITIAL,
            ball_speed_up: Params::BALL_SPEED_UP,
            reset_min_dy_ratio: Params::RESET_MIN_DY_RATIO,
            max_score: Params::MAX_SCORE,
            ai_decision_interval_ms: Params::AI_DECISION_INTERVAL_MS,
            ai_interval_decrement_ms: Params::AI_INTERVAL_DECREMENT_MS,
            ai_interval_floor_ms: Params::AI_INTERVAL_FLOOR_MS,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (possibly partial) JSON tuning document and validate it
    pub fn from_json(json: &str) -> Result<Self, MatchError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Smallest |dy| a ball reset may produce
    pub fn reset_min_dy(&self) -> f32 {
        self.ball_speed_initial * self.reset_min_dy_ratio
    }

    /// Next AI decision interval after a paddle hit
    pub fn ramp_ai_interval(&self, interval_ms: f64) -> f64 {
        (interval_ms - self.ai_interval_decrement_ms).max(self.ai_interval_floor_ms)
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        let ratios = [
            ("paddle_width_ratio", self.paddle_width_ratio),
            ("paddle_height_ratio", self.paddle_height_ratio),
            ("paddle_margin_ratio", self.paddle_margin_ratio),
            ("ball_size_ratio", self.ball_size_ratio),
        ];
        for (field, value) in ratios {
            if !(value.is_finite() && value > 0.0 && value < 1.0) {
                return Err(invalid(field, format!("{value} is not in (0, 1)")));
            }
        }
        if self.paddle_margin_ratio + self.paddle_width_ratio >= 0.5 {
            return Err(invalid(
                "paddle_margin_ratio",
                "paddles would overlap the centre line".to_string(),
            ));
        }

        let speeds = [
            ("paddle_speed", self.paddle_speed),
            ("ball_speed_initial", self.ball_speed_initial),
        ];
        for (field, value) in speeds {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(field, format!("{value} must be positive")));
            }
        }
        if !(self.ball_speed_up.is_finite() && self.ball_speed_up >= 1.0) {
            return Err(invalid(
                "ball_speed_up",
                format!("{} must be at least 1.0", self.ball_speed_up),
            ));
        }
        // The reset sampler needs a non-empty range to draw from
        if !(self.reset_min_dy_ratio >= 0.0 && self.reset_min_dy_ratio < 1.0) {
            return Err(invalid(
                "reset_min_dy_ratio",
                format!("{} is not in [0, 1)", self.reset_min_dy_ratio),
            ));
        }
        if self.max_score == 0 {
            return Err(invalid("max_score", "must be at least 1".to_string()));
        }
        if !(self.ai_interval_floor_ms.is_finite() && self.ai_interval_floor_ms > 0.0) {
            return Err(invalid(
                "ai_interval_floor_ms",
                format!("{} must be positive", self.ai_interval_floor_ms),
            ));
        }
        if !(self.ai_decision_interval_ms.is_finite()
            && self.ai_decision_interval_ms >= self.ai_interval_floor_ms)
        {
            return Err(invalid(
                "ai_decision_interval_ms",
                format!(
                    "{} must be at least the floor of {}",
                    self.ai_decision_interval_ms, self.ai_interval_floor_ms
                ),
            ));
        }
        if !(self.ai_interval_decrement_ms.is_finite() && self.ai_interval_decrement_ms >= 0.0) {
            return Err(invalid(
                "ai_interval_decrement_ms",
                format!("{} must not be negative", self.ai_interval_decrement_ms),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> MatchError {
    MatchError::InvalidConfig { field, reason }
}
