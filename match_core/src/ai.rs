//! Computer opponent
//!
//! The AI re-targets at most once per decision interval, which models
//! reaction latency. Between decisions it chases the last target with a
//! deadband controller that is deliberately coarse so it stays beatable.

use serde::Serialize;

use crate::arena::PlayArea;
use crate::components::{Ball, Paddle};

/// Where the AI is in its cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AiPhase {
    /// No target computed yet
    Idle,
    /// Moving toward (or holding at) a target
    Tracking,
}

/// Decision state, attached only to the AI-controlled paddle
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AiState {
    pub last_decision_ms: Option<f64>,
    pub decision_interval_ms: f64,
    pub target_y: Option<f32>,
}

impl AiState {
    pub fn new(decision_interval_ms: f64) -> Self {
        Self {
            last_decision_ms: None,
            decision_interval_ms,
            target_y: None,
        }
    }

    pub fn phase(&self) -> AiPhase {
        match self.target_y {
            None => AiPhase::Idle,
            Some(_) => AiPhase::Tracking,
        }
    }

    pub fn is_due(&self, now_ms: f64) -> bool {
        match self.last_decision_ms {
            None => true,
            Some(last) => now_ms - last >= self.decision_interval_ms,
        }
    }

    /// Re-target if the interval has elapsed. Returns true when it did.
    pub fn maybe_decide(&mut self, now_ms: f64, ball: &Ball, paddle: &Paddle, area: &PlayArea) -> bool {
        if !self.is_due(now_ms) {
            return false;
        }
        let target = decide_target(ball, paddle, area);
        log::debug!(
            "AI retarget at {:.0}ms: {:.1} (interval {:.0}ms)",
            now_ms,
            target,
            self.decision_interval_ms
        );
        self.target_y = Some(target);
        self.last_decision_ms = Some(now_ms);
        true
    }
}

/// Target y for the paddle centre.
///
/// A ball heading toward the paddle is predicted to its face; a ball
/// heading away sends the paddle back to the middle.
pub fn decide_target(ball: &Ball, paddle: &Paddle, area: &PlayArea) -> f32 {
    let toward = if paddle.x > ball.pos.x {
        ball.vel.x > 0.0
    } else {
        ball.vel.x < 0.0
    };
    if toward {
        predict_intercept_y(ball, paddle, area)
    } else {
        area.center_y()
    }
}

/// Step a copy of the ball forward, bouncing off top and bottom exactly
/// like the live physics, until it reaches the paddle's plane.
pub fn predict_intercept_y(ball: &Ball, paddle: &Paddle, area: &PlayArea) -> f32 {
    let mut pos = ball.pos;
    let mut vel = ball.vel;
    let bottom = area.bottom() - ball.size;

    let heading_right = vel.x > 0.0;
    let reached = |x: f32| {
        if heading_right {
            x >= paddle.x - paddle.width
        } else {
            x <= paddle.x + paddle.width
        }
    };

    // dx never shrinks, so the distance bounds the step count
    let distance = (paddle.x - pos.x).abs() + paddle.width + ball.size;
    let max_steps = (distance / vel.x.abs().max(f32::EPSILON)).ceil() as usize + 1;

    for _ in 0..max_steps {
        if reached(pos.x) {
            break;
        }
        pos += vel;
        if pos.y < area.top() {
            vel.y = vel.y.abs();
        } else if pos.y > bottom {
            vel.y = -vel.y.abs();
        }
    }

    pos.y + ball.size / 2.0
}

/// Deadband control: hold when within one paddle-speed step of the
/// target, otherwise move at full speed toward it.
pub fn control_velocity(target_y: Option<f32>, paddle_center_y: f32, paddle_speed: f32) -> f32 {
    let Some(target) = target_y else {
        return 0.0;
    };
    let diff = target - paddle_center_y;
    if diff.abs() < paddle_speed {
        0.0
    } else {
        paddle_speed.copysign(diff)
    }
}
