use crate::{Ball, Controller, Paddle, PlayArea};
use hecs::World;

/// Apply velocity to human-controlled paddles
pub fn move_paddles(world: &mut World) {
    for (_entity, paddle) in world.query_mut::<&mut Paddle>() {
        if paddle.controller == Controller::Human {
            paddle.y += paddle.vy;
        }
    }
}

/// Keep every paddle inside the play area
pub fn clamp_paddles(world: &mut World, area: &PlayArea) {
    for (_entity, paddle) in world.query_mut::<&mut Paddle>() {
        paddle.y = area.clamp_y(paddle.y, paddle.height);
    }
}

/// Move ball based on velocity
pub fn move_ball(world: &mut World) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        ball.pos += ball.vel;
    }
}
