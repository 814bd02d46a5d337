//! One Pong match, start to finish
//!
//! A [`Simulator`] owns every piece of match state. Hosts build one per
//! match, call [`Simulator::tick`] once per rendered frame and forward key
//! events; when a side reaches the max score the completion callback runs
//! once and the simulator goes inert.

use glam::Vec2;
use hecs::{Entity, World};

use crate::ai::AiState;
use crate::arena::{Geometry, PlayArea};
use crate::clock::Clock;
use crate::components::{Ball, Controller, Paddle, Side};
use crate::config::Config;
use crate::error::MatchError;
use crate::render::{MatchResult, Snapshot};
use crate::resources::{Events, GameRng, MatchPhase, Score};
use crate::systems::{apply_key_down, apply_key_up, Key};
use crate::{create_ball, create_paddle, step};

/// Invoked once with the final result
pub type CompletionCallback = Box<dyn FnOnce(MatchResult)>;

/// Everything a host decides before a match begins
#[derive(Debug, Clone)]
pub struct MatchSetup {
    pub area: PlayArea,
    pub left_player: String,
    pub right_player: String,
    /// Right paddle is computer-controlled
    pub ai_opponent: bool,
    /// Fixed seed for ball serves; entropy when unset
    pub seed: Option<u64>,
    /// Score to resume from
    pub score: Score,
}

impl MatchSetup {
    pub fn new(area: PlayArea, left_player: impl Into<String>, right_player: impl Into<String>) -> Self {
        Self {
            area,
            left_player: left_player.into(),
            right_player: right_player.into(),
            ai_opponent: false,
            seed: None,
            score: Score::new(),
        }
    }

    pub fn with_ai(mut self, ai_opponent: bool) -> Self {
        self.ai_opponent = ai_opponent;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn resume_at(mut self, left: u8, right: u8) -> Self {
        self.score = Score { left, right };
        self
    }
}

pub struct Simulator {
    world: World,
    left: Entity,
    right: Entity,
    ball: Entity,
    area: PlayArea,
    geometry: Geometry,
    config: Config,
    score: Score,
    events: Events,
    rng: GameRng,
    clock: Box<dyn Clock>,
    left_player: String,
    right_player: String,
    phase: MatchPhase,
    on_complete: Option<CompletionCallback>,
    result: Option<MatchResult>,
    tick: u64,
}

impl Simulator {
    /// Build a fresh match with the ball already served
    pub fn start(
        setup: MatchSetup,
        config: Config,
        clock: Box<dyn Clock>,
        on_complete: impl FnOnce(MatchResult) + 'static,
    ) -> Result<Self, MatchError> {
        config.validate()?;
        setup.area.validate()?;
        if setup.score.has_winner(config.max_score).is_some() {
            return Err(MatchError::InvalidScore {
                left: setup.score.left,
                right: setup.score.right,
                max: config.max_score,
            });
        }

        let area = setup.area;
        let geometry = Geometry::for_area(&area, &config);
        let mut rng = match setup.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        let mut world = World::new();

        let paddle_y = geometry.centered_paddle_y(&area);
        let left = create_paddle(
            &mut world,
            Paddle::new(
                Side::Left,
                Controller::Human,
                geometry.paddle_x(&area, Side::Left),
                paddle_y,
                geometry.paddle_width,
                geometry.paddle_height,
            ),
        );
        let right_paddle = Paddle::new(
            Side::Right,
            if setup.ai_opponent {
                Controller::Ai
            } else {
                Controller::Human
            },
            geometry.paddle_x(&area, Side::Right),
            paddle_y,
            geometry.paddle_width,
            geometry.paddle_height,
        );
        // AiState only exists on a computer-controlled paddle
        let right = if setup.ai_opponent {
            world.spawn((right_paddle, AiState::new(config.ai_decision_interval_ms)))
        } else {
            create_paddle(&mut world, right_paddle)
        };

        let mut ball = Ball::new(Vec2::ZERO, Vec2::ZERO, geometry.ball_size);
        ball.reset(
            geometry.ball_spawn(&area),
            config.ball_speed_initial,
            config.reset_min_dy(),
            &mut rng,
        );
        let ball = create_ball(&mut world, ball);

        log::info!(
            "Match started: {} vs {}{} on {}x{}, {}-{}",
            setup.left_player,
            setup.right_player,
            if setup.ai_opponent { " (AI)" } else { "" },
            area.width,
            area.height,
            setup.score.left,
            setup.score.right
        );

        Ok(Self {
            world,
            left,
            right,
            ball,
            area,
            geometry,
            config,
            score: setup.score,
            events: Events::new(),
            rng,
            clock,
            left_player: setup.left_player,
            right_player: setup.right_player,
            phase: MatchPhase::Running,
            on_complete: Some(Box::new(on_complete)),
            result: None,
            tick: 0,
        })
    }

    /// Advance one frame. Does nothing once the match is over or stopped.
    pub fn tick(&mut self) {
        if self.phase != MatchPhase::Running {
            log::debug!("Tick ignored, match is {:?}", self.phase);
            return;
        }

        self.tick += 1;
        let now_ms = self.clock.now_ms();
        step(
            &mut self.world,
            &self.area,
            &self.geometry,
            &self.config,
            &mut self.score,
            &mut self.events,
            &mut self.rng,
            now_ms,
        );

        if self.events.match_over {
            self.finish();
        }
    }

    fn finish(&mut self) {
        let Some(winner_side) = self.score.has_winner(self.config.max_score) else {
            return;
        };
        // Cleared before the callback so a host may stop() from inside it
        self.phase = MatchPhase::Finished;

        let winner = match winner_side {
            Side::Left => self.left_player.clone(),
            Side::Right => self.right_player.clone(),
        };
        let result = MatchResult {
            winner,
            winner_side,
            left_score: self.score.left,
            right_score: self.score.right,
        };
        log::info!(
            "Match over: {} wins {}-{} after {} ticks",
            result.winner,
            result.left_score,
            result.right_score,
            self.tick
        );
        self.result = Some(result.clone());

        if let Some(on_complete) = self.on_complete.take() {
            on_complete(result);
        }
    }

    pub fn handle_key_down(&mut self, key: Key) {
        if self.phase != MatchPhase::Running {
            return;
        }
        if !apply_key_down(&mut self.world, key, self.config.paddle_speed) {
            log::debug!("Ignored {:?}: no human paddle on that side", key);
        }
    }

    pub fn handle_key_up(&mut self, key: Key) {
        if self.phase != MatchPhase::Running {
            return;
        }
        if !apply_key_up(&mut self.world, key) {
            log::debug!("Ignored {:?} release: no human paddle on that side", key);
        }
    }

    /// Tear down without a winner. Safe to call any number of times.
    pub fn stop(&mut self) {
        if self.phase == MatchPhase::Running {
            self.phase = MatchPhase::Stopped;
            log::info!(
                "Match stopped at {}-{} after {} ticks",
                self.score.left,
                self.score.right,
                self.tick
            );
        }
        // Dropped unfired
        self.on_complete = None;
    }

    /// Swap in a new play area.
    ///
    /// Paddle and ball centres keep their relative place on the field, so
    /// a shrink never pushes the ball past a goal line. Velocities are
    /// left alone and the next tick clamps against the new bounds.
    pub fn resize(&mut self, area: PlayArea) -> Result<(), MatchError> {
        area.validate()?;
        let old = self.area;
        self.area = area;
        self.geometry = Geometry::for_area(&area, &self.config);

        let geometry = self.geometry;
        let scale = Vec2::new(area.width / old.width, area.height / old.height);
        let remap = |p: Vec2| Vec2::new(p.x * scale.x, area.y + (p.y - old.y) * scale.y);

        for (_entity, paddle) in self.world.query_mut::<&mut Paddle>() {
            let centre = remap(Vec2::new(0.0, paddle.center_y()));
            paddle.x = geometry.paddle_x(&area, paddle.side);
            paddle.width = geometry.paddle_width;
            paddle.height = geometry.paddle_height;
            paddle.y = area.clamp_y(centre.y - paddle.height / 2.0, paddle.height);
        }
        for (_entity, ball) in self.world.query_mut::<&mut Ball>() {
            let centre = remap(ball.pos + Vec2::splat(ball.size / 2.0));
            ball.size = geometry.ball_size;
            let x = (centre.x - ball.size / 2.0).clamp(0.0, area.width - ball.size);
            ball.pos = Vec2::new(x, area.clamp_y(centre.y - ball.size / 2.0, ball.size));
        }
        log::debug!("Play area resized to {}x{} at y={}", area.width, area.height, area.y);
        Ok(())
    }

    /// Put the ball somewhere explicit (demo serves, replays, tests)
    pub fn serve(&mut self, pos: Vec2, vel: Vec2) {
        if let Ok(mut ball) = self.world.get::<&mut Ball>(self.ball) {
            ball.pos = pos;
            ball.vel = vel;
        }
    }

    /// Move a paddle to `y`, clamped to the field
    pub fn place_paddle(&mut self, side: Side, y: f32) {
        let area = self.area;
        if let Ok(mut paddle) = self.world.get::<&mut Paddle>(self.paddle_entity(side)) {
            let height = paddle.height;
            paddle.y = area.clamp_y(y, height);
        }
    }

    fn paddle_entity(&self, side: Side) -> Entity {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn paddle(&self, side: Side) -> Paddle {
        *self
            .world
            .get::<&Paddle>(self.paddle_entity(side))
            .expect("paddle entities live as long as the simulator")
    }

    pub fn ball(&self) -> Ball {
        *self
            .world
            .get::<&Ball>(self.ball)
            .expect("ball entity lives as long as the simulator")
    }

    /// AI decision state, `None` for two human players
    pub fn ai_state(&self) -> Option<AiState> {
        self.world.get::<&AiState>(self.right).ok().map(|ai| *ai)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            tick: self.tick,
            area: self.area,
            left_paddle: self.paddle(Side::Left).bounds(),
            right_paddle: self.paddle(Side::Right).bounds(),
            ball: self.ball().bounds(),
            score: self.score,
            left_player: &self.left_player,
            right_player: &self.right_player,
            phase: self.phase,
            events: self.events,
        }
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == MatchPhase::Running
    }

    pub fn play_area(&self) -> PlayArea {
        self.area
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn events(&self) -> Events {
        self.events
    }

    pub fn result(&self) -> Option<&MatchResult> {
        self.result.as_ref()
    }

    pub fn ticks(&self) -> u64 {
        self.tick
    }
}
