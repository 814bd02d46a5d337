//! Scene-graph adapter
//!
//! Turns a match snapshot into model matrices for three nodes (two paddle
//! boxes and the ball) in a 3D scene. The host page owns the meshes,
//! lights and particles and just copies these transforms each frame.

use glam::{Mat4, Quat, Vec2, Vec3};
use match_core::{Aabb, PlayArea, Renderer, Score, Snapshot};

use crate::camera::Camera;

/// Arena width in world units; height follows the play area's aspect
pub const ARENA_WIDTH: f32 = 32.0;
/// Paddle thickness along z, in world units
pub const PADDLE_DEPTH: f32 = 1.0;

/// Model matrices for the scene nodes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneNodes {
    pub left_paddle: Mat4,
    pub right_paddle: Mat4,
    pub ball: Mat4,
}

impl Default for SceneNodes {
    fn default() -> Self {
        Self {
            left_paddle: Mat4::IDENTITY,
            right_paddle: Mat4::IDENTITY,
            ball: Mat4::IDENTITY,
        }
    }
}

pub struct SceneRenderer {
    area: PlayArea,
    units_per_px: f32,
    aspect: f32,
    camera: Camera,
    nodes: SceneNodes,
    score: Score,
    frames: u64,
}

impl SceneRenderer {
    pub fn new(area: &PlayArea, aspect: f32) -> Self {
        let units_per_px = ARENA_WIDTH / area.width;
        Self {
            area: *area,
            units_per_px,
            aspect,
            camera: Camera::perspective(ARENA_WIDTH, area.height * units_per_px, aspect),
            nodes: SceneNodes::default(),
            score: Score::new(),
            frames: 0,
        }
    }

    pub fn nodes(&self) -> &SceneNodes {
        &self.nodes
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Column-major matrices, left paddle then right paddle then ball
    pub fn flat_transforms(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(48);
        for m in [self.nodes.left_paddle, self.nodes.right_paddle, self.nodes.ball] {
            out.extend_from_slice(&m.to_cols_array());
        }
        out
    }

    /// Column-major view-projection matrix for the current camera
    pub fn view_proj_cols(&self) -> [f32; 16] {
        self.camera.view_proj().to_cols_array()
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.rebuild_camera();
    }

    fn rebuild_camera(&mut self) {
        self.units_per_px = ARENA_WIDTH / self.area.width;
        self.camera = Camera::perspective(
            ARENA_WIDTH,
            self.area.height * self.units_per_px,
            self.aspect,
        );
    }

    /// World transform for a play-area rectangle. Screen y grows down,
    /// world y grows up, so the axis flips here.
    fn node_transform(&self, rect: &Aabb, depth: f32) -> Mat4 {
        let size = rect.size();
        let centre_px = rect.min + size / 2.0;
        let offset = centre_px - self.area.center();
        let pos = Vec2::new(offset.x, -offset.y) * self.units_per_px;
        Mat4::from_scale_rotation_translation(
            Vec3::new(size.x * self.units_per_px, size.y * self.units_per_px, depth),
            Quat::IDENTITY,
            Vec3::new(pos.x, pos.y, depth / 2.0),
        )
    }
}

impl Renderer for SceneRenderer {
    fn render(&mut self, frame: &Snapshot<'_>) {
        if frame.area != self.area {
            self.resize(&frame.area);
        }
        let ball_depth = frame.ball.size().x * self.units_per_px;
        self.nodes = SceneNodes {
            left_paddle: self.node_transform(&frame.left_paddle, PADDLE_DEPTH),
            right_paddle: self.node_transform(&frame.right_paddle, PADDLE_DEPTH),
            ball: self.node_transform(&frame.ball, ball_depth),
        };
        if frame.score != self.score {
            log::debug!("Scene score {}-{}", frame.score.left, frame.score.right);
            self.score = frame.score;
        }
        self.frames += 1;
    }

    fn resize(&mut self, area: &PlayArea) {
        self.area = *area;
        self.rebuild_camera();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use match_core::{Events, MatchPhase};

    fn area() -> PlayArea {
        PlayArea::new(0.0, 800.0, 600.0).expect("valid area")
    }

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Aabb {
        Aabb::from_pos_size(Vec2::new(x, y), Vec2::new(w, h))
    }

    fn snapshot(area: PlayArea, ball: Aabb) -> Snapshot<'static> {
        Snapshot {
            tick: 1,
            area,
            left_paddle: rect(20.0, 250.0, 10.0, 100.0),
            right_paddle: rect(770.0, 0.0, 10.0, 100.0),
            ball,
            score: Score { left: 2, right: 1 },
            left_player: "a",
            right_player: "b",
            phase: MatchPhase::Running,
            events: Events::new(),
        }
    }

    fn translation(m: &Mat4) -> Vec3 {
        m.w_axis.truncate()
    }

    #[test]
    fn test_centred_ball_sits_at_origin() {
        let mut renderer = SceneRenderer::new(&area(), 4.0 / 3.0);
        renderer.render(&snapshot(area(), rect(394.0, 294.0, 12.0, 12.0)));

        let t = translation(&renderer.nodes().ball);
        assert!(t.x.abs() < 1e-5 && t.y.abs() < 1e-5);
        assert_eq!(renderer.score(), Score { left: 2, right: 1 });
        assert_eq!(renderer.frames(), 1);
    }

    #[test]
    fn test_screen_y_is_flipped() {
        let mut renderer = SceneRenderer::new(&area(), 4.0 / 3.0);
        renderer.render(&snapshot(area(), rect(394.0, 294.0, 12.0, 12.0)));

        // Right paddle is at the top of the screen, so above the origin
        let right = translation(&renderer.nodes().right_paddle);
        let left = translation(&renderer.nodes().left_paddle);
        assert!(right.y > 0.0);
        assert!(left.x < 0.0 && right.x > 0.0);
        assert!((left.y - 0.0).abs() < 1e-5);
    }

    #[test]
    fn test_scale_matches_rect_size() {
        let mut renderer = SceneRenderer::new(&area(), 4.0 / 3.0);
        renderer.render(&snapshot(area(), rect(394.0, 294.0, 12.0, 12.0)));

        let (scale, _rot, _pos) = renderer.nodes().left_paddle.to_scale_rotation_translation();
        assert!((scale.x - 10.0 * ARENA_WIDTH / 800.0).abs() < 1e-5);
        assert!((scale.y - 100.0 * ARENA_WIDTH / 800.0).abs() < 1e-5);
        assert_eq!(scale.z, PADDLE_DEPTH);
    }

    #[test]
    fn test_area_change_rebuilds_camera() {
        let mut renderer = SceneRenderer::new(&area(), 4.0 / 3.0);
        let before = *renderer.camera();
        let wide = PlayArea::new(0.0, 1600.0, 600.0).expect("valid area");
        renderer.render(&snapshot(wide, rect(794.0, 294.0, 12.0, 12.0)));

        assert_ne!(*renderer.camera(), before);
        let t = translation(&renderer.nodes().ball);
        assert!(t.x.abs() < 1e-5);
    }

    #[test]
    fn test_view_proj_follows_aspect() {
        let mut renderer = SceneRenderer::new(&area(), 4.0 / 3.0);
        let before = renderer.view_proj_cols();
        assert_eq!(before, renderer.camera().view_proj().to_cols_array());

        renderer.set_aspect(2.0);
        assert_ne!(renderer.view_proj_cols(), before);
    }

    #[test]
    fn test_flat_transforms_layout() {
        let mut renderer = SceneRenderer::new(&area(), 4.0 / 3.0);
        renderer.render(&snapshot(area(), rect(394.0, 294.0, 12.0, 12.0)));

        let flat = renderer.flat_transforms();
        assert_eq!(flat.len(), 48);
        assert_eq!(&flat[32..48], &renderer.nodes().ball.to_cols_array()[..]);
    }
}
