//! Browser client for the Pong match simulator
//!
//! Hosts one [`match_core::Simulator`] per page, driven by
//! `requestAnimationFrame`, and draws it either with a flat 2D canvas or
//! as transforms for a 3D scene. The camera, key mapping and scene adapter
//! build natively so they can be unit tested.

pub mod camera;
pub mod input;
pub mod renderer;

#[cfg(target_arch = "wasm32")]
mod host;

#[cfg(target_arch = "wasm32")]
pub use host::MatchHost;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialised".into());
    }
    log::info!("Pong client ready");
}
