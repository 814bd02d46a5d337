//! Rendering adapters
//!
//! Both consume [`match_core::Snapshot`] through the [`Renderer`] trait
//! and can be swapped without touching the simulation.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;

use match_core::Renderer;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use scene::{SceneNodes, SceneRenderer};

/// The renderer a host was created with
pub enum HostRenderer {
    #[cfg(target_arch = "wasm32")]
    Canvas(CanvasRenderer),
    Scene(SceneRenderer),
}

impl HostRenderer {
    pub fn as_renderer(&mut self) -> &mut dyn Renderer {
        match self {
            #[cfg(target_arch = "wasm32")]
            HostRenderer::Canvas(r) => r,
            HostRenderer::Scene(r) => r,
        }
    }

    pub fn scene(&self) -> Option<&SceneRenderer> {
        match self {
            HostRenderer::Scene(r) => Some(r),
            #[cfg(target_arch = "wasm32")]
            _ => None,
        }
    }
}
