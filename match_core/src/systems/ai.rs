use crate::ai::control_velocity;
use crate::{AiState, Ball, Config, Paddle, PlayArea};
use hecs::World;

/// Run the AI decision for every AI paddle, then move it.
///
/// Returns true if any paddle re-targeted this tick.
pub fn drive_ai(world: &mut World, area: &PlayArea, config: &Config, now_ms: f64) -> bool {
    let ball = world
        .query::<&Ball>()
        .iter()
        .next()
        .map(|(_e, ball)| *ball);

    let Some(ball) = ball else {
        return false;
    };

    let mut retargeted = false;
    for (_entity, (paddle, ai)) in world.query_mut::<(&mut Paddle, &mut AiState)>() {
        retargeted |= ai.maybe_decide(now_ms, &ball, paddle, area);
        paddle.vy = control_velocity(ai.target_y, paddle.center_y(), config.paddle_speed);
        log::trace!(
            "AI paddle centre {:.1} target {:?} vy {:.1}",
            paddle.center_y(),
            ai.target_y,
            paddle.vy
        );
        paddle.y += paddle.vy;
    }
    retargeted
}

/// Shorten every AI decision interval after a paddle hit
pub fn ramp_ai_difficulty(world: &mut World, config: &Config) {
    for (_entity, ai) in world.query_mut::<&mut AiState>() {
        ai.decision_interval_ms = config.ramp_ai_interval(ai.decision_interval_ms);
    }
}
