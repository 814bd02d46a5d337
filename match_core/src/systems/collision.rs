use crate::{Ball, Config, Events, Paddle, PlayArea, Side};
use hecs::World;

/// Bounce the ball off the top and bottom of the play area.
///
/// The sign of dy is forced away from the wall rather than flipped, so a
/// ball left outside by a shrinking resize heads back in instead of
/// oscillating.
pub fn bounce_walls(world: &mut World, area: &PlayArea, events: &mut Events) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        if ball.pos.y < area.top() {
            ball.vel.y = ball.vel.y.abs();
            events.wall_bounce = true;
        } else if ball.pos.y > area.bottom() - ball.size {
            ball.vel.y = -ball.vel.y.abs();
            events.wall_bounce = true;
        }
    }
}

/// Check the ball against the paddle it is travelling toward.
///
/// On a hit dx reverses and grows by the speed-up factor, and the ball is
/// placed flush with the paddle face so the next tick cannot hit again.
pub fn check_paddle_hits(world: &mut World, config: &Config, events: &mut Events) -> Option<Side> {
    // First, collect paddle data without holding borrows
    let paddles: Vec<Paddle> = world
        .query::<&Paddle>()
        .iter()
        .map(|(_e, paddle)| *paddle)
        .collect();

    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        let facing = if ball.vel.x < 0.0 {
            Side::Left
        } else if ball.vel.x > 0.0 {
            Side::Right
        } else {
            continue;
        };

        let Some(paddle) = paddles.iter().find(|p| p.side == facing) else {
            continue;
        };

        if !ball.bounds().overlaps(&paddle.bounds()) {
            continue;
        }

        ball.vel.x = -ball.vel.x * config.ball_speed_up;
        ball.pos.x = match facing {
            Side::Left => paddle.x + paddle.width,
            Side::Right => paddle.x - ball.size,
        };
        events.paddle_hit = Some(facing);
        log::debug!("Ball hit {:?} paddle, dx now {:.3}", facing, ball.vel.x);
        return Some(facing);
    }
    None
}
