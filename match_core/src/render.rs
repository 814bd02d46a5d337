//! What renderers see of a match
//!
//! The simulator never touches a renderer. Hosts take a [`Snapshot`]
//! after each tick and hand it to whichever [`Renderer`] they run.

use serde::Serialize;

use crate::arena::{Aabb, PlayArea};
use crate::components::Side;
use crate::resources::{Events, MatchPhase, Score};

/// Read-only view of one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot<'a> {
    pub tick: u64,
    pub area: PlayArea,
    pub left_paddle: Aabb,
    pub right_paddle: Aabb,
    pub ball: Aabb,
    pub score: Score,
    pub left_player: &'a str,
    pub right_player: &'a str,
    pub phase: MatchPhase,
    pub events: Events,
}

/// Final outcome handed to the completion callback
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub winner: String,
    pub winner_side: Side,
    pub left_score: u8,
    pub right_score: u8,
}

/// Something that can draw a match frame
pub trait Renderer {
    fn render(&mut self, frame: &Snapshot<'_>);

    /// Called when the host changes the play area
    fn resize(&mut self, _area: &PlayArea) {}
}
