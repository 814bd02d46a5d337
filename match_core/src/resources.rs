use serde::Serialize;

use crate::components::Side;

/// Match score tracking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Score {
    pub left: u8,
    pub right: u8,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a point for `side`, never exceeding `max_score`
    pub fn increment(&mut self, side: Side, max_score: u8) {
        let slot = match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        };
        *slot = slot.saturating_add(1).min(max_score);
    }

    pub fn has_winner(&self, max_score: u8) -> Option<Side> {
        if self.left >= max_score {
            Some(Side::Left)
        } else if self.right >= max_score {
            Some(Side::Right)
        } else {
            None
        }
    }
}

/// Random number generator
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::from_entropy())
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

/// Things that happened during the last tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Events {
    pub wall_bounce: bool,
    pub paddle_hit: Option<Side>,
    pub scored: Option<Side>,
    pub match_over: bool,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Lifecycle of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchPhase {
    /// Consuming ticks and input
    Running,
    /// A side reached the max score; the completion callback has fired
    Finished,
    /// Torn down by the host before a winner emerged
    Stopped,
}
