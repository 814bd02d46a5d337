pub mod ai;
pub mod arena;
pub mod clock;
pub mod components;
pub mod config;
pub mod error;
pub mod params;
pub mod render;
pub mod resources;
pub mod simulator;
pub mod systems;

pub use ai::{AiPhase, AiState};
pub use arena::*;
pub use clock::*;
pub use components::*;
pub use config::*;
pub use error::*;
pub use params::*;
pub use render::*;
pub use resources::*;
pub use simulator::*;
pub use systems::Key;

use hecs::World;
use systems::*;

/// Advance the match by one frame.
///
/// Stage order matters: paddles settle before the ball moves, and the
/// paddle test runs after the wall bounce so a corner hit still reflects.
#[allow(clippy::too_many_arguments)]
pub fn step(
    world: &mut World,
    area: &PlayArea,
    geometry: &Geometry,
    config: &Config,
    score: &mut Score,
    events: &mut Events,
    rng: &mut GameRng,
    now_ms: f64,
) {
    // Clear events at start of frame
    events.clear();

    // 1. Human paddles follow their velocity
    move_paddles(world);

    // 2. AI re-targets if due, then moves
    drive_ai(world, area, config, now_ms);

    // 3. Keep paddles on the field
    clamp_paddles(world, area);

    // 4. Move ball
    move_ball(world);

    // 5. Top/bottom walls
    bounce_walls(world, area, events);

    // 6. Paddles (each hit makes the AI react faster)
    if check_paddle_hits(world, config, events).is_some() {
        ramp_ai_difficulty(world, config);
    }

    // 7. Ball left the field
    check_scoring(world, area, geometry, score, events, rng, config);
}

/// Helper to create a paddle entity
pub fn create_paddle(world: &mut World, paddle: Paddle) -> hecs::Entity {
    world.spawn((paddle,))
}

/// Helper to create the ball entity
pub fn create_ball(world: &mut World, ball: Ball) -> hecs::Entity {
    world.spawn((ball,))
}
