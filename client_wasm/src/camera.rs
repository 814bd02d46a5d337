//! Camera for the 3D scene view
//!
//! The arena lies in the XY plane centred on the origin, z pointing up
//! out of the table.

use glam::{Mat4, Vec3};

/// Camera struct
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub view: Mat4,
    pub projection: Mat4,
}

impl Camera {
    /// Tilted perspective camera behind the bottom edge of the arena
    pub fn perspective(width: f32, height: f32, aspect: f32) -> Self {
        let eye = Vec3::new(0.0, -height * 0.9, height * 1.1);
        let view = Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Z);
        let fov = 60f32.to_radians();
        let far = (width + height) * 4.0;
        let projection = Mat4::perspective_rh(fov, aspect.max(0.01), 0.1, far);
        Self { view, projection }
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection * self.view
    }
}
