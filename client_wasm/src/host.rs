//! Browser host for a single match
//!
//! Owns the only tick source (`requestAnimationFrame`) and the keyboard
//! and resize listeners for its match. Everything is detached on stop, on
//! completion, and before a new match starts, so events never reach a
//! stale simulator.

use std::cell::RefCell;
use std::rc::Rc;

use match_core::{Clock, Config, MatchResult, MatchSetup, PlayArea, Simulator};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{EventTarget, HtmlCanvasElement, KeyboardEvent, Performance, Window};

use crate::input::key_for;
use crate::renderer::{CanvasRenderer, HostRenderer, SceneRenderer};

/// `performance.now()` as the AI clock
struct PerformanceClock {
    performance: Performance,
}

impl Clock for PerformanceClock {
    fn now_ms(&self) -> f64 {
        self.performance.now()
    }
}

/// An event listener that unregisters itself when dropped
struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

impl Listener {
    fn attach(
        target: EventTarget,
        kind: &'static str,
        closure: Closure<dyn FnMut(web_sys::Event)>,
    ) -> Result<Self, JsValue> {
        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target,
            kind,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref())
        {
            log::warn!("Failed to remove {} listener: {:?}", self.kind, e);
        }
    }
}

struct HostState {
    window: Window,
    canvas: HtmlCanvasElement,
    config: Config,
    renderer: HostRenderer,
    sim: Option<Simulator>,
    listeners: Vec<Listener>,
    raf_id: Option<i32>,
    on_complete: Option<js_sys::Function>,
    completed: Rc<RefCell<Option<MatchResult>>>,
    /// JS completion callback is on the stack
    in_callback: bool,
}

impl HostState {
    /// Drop listeners and the pending frame; the simulator is stopped but
    /// kept so the last frame can still be inspected.
    fn detach(&mut self) {
        if let Some(id) = self.raf_id.take() {
            if let Err(e) = self.window.cancel_animation_frame(id) {
                log::warn!("cancelAnimationFrame failed: {:?}", e);
            }
        }
        self.listeners.clear();
        if let Some(sim) = self.sim.as_mut() {
            sim.stop();
        }
        self.on_complete = None;
    }

    fn canvas_area(&self) -> Result<PlayArea, JsValue> {
        PlayArea::from_surface(self.canvas.width() as f32, self.canvas.height() as f32)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

type FrameClosure = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

#[wasm_bindgen]
pub struct MatchHost {
    state: Rc<RefCell<HostState>>,
    frame: FrameClosure,
}

#[wasm_bindgen]
impl MatchHost {
    /// `mode` is "2d" for the canvas view or "3d" for scene transforms.
    /// `config_json` optionally overrides tuning values.
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas: HtmlCanvasElement,
        mode: &str,
        config_json: Option<String>,
    ) -> Result<MatchHost, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let config = match config_json {
            Some(json) => Config::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?,
            None => Config::new(),
        };
        let area = PlayArea::from_surface(canvas.width() as f32, canvas.height() as f32)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let renderer = match mode {
            "2d" => HostRenderer::Canvas(CanvasRenderer::new(&canvas)?),
            "3d" => {
                let aspect = canvas.client_width().max(1) as f32 / canvas.client_height().max(1) as f32;
                HostRenderer::Scene(SceneRenderer::new(&area, aspect))
            }
            other => return Err(JsValue::from_str(&format!("unknown render mode {other:?}"))),
        };

        let state = Rc::new(RefCell::new(HostState {
            window,
            canvas,
            config,
            renderer,
            sim: None,
            listeners: Vec::new(),
            raf_id: None,
            on_complete: None,
            completed: Rc::new(RefCell::new(None)),
            in_callback: false,
        }));
        let frame: FrameClosure = Rc::new(RefCell::new(None));
        *frame.borrow_mut() = Some(frame_closure(state.clone(), frame.clone()));

        Ok(MatchHost { state, frame })
    }

    /// Start a match, replacing any previous one.
    /// `on_complete(winner, leftScore, rightScore)` runs once at the end.
    pub fn start(
        &self,
        left_player: String,
        right_player: String,
        ai_opponent: bool,
        on_complete: js_sys::Function,
    ) -> Result<(), JsValue> {
        let mut st = self.state.borrow_mut();
        st.detach();

        let area = st.canvas_area()?;
        let performance = st
            .window
            .performance()
            .ok_or_else(|| JsValue::from_str("performance API unavailable"))?;
        let completed = Rc::new(RefCell::new(None));
        let sink = completed.clone();
        let setup = MatchSetup::new(area, left_player, right_player).with_ai(ai_opponent);
        let sim = Simulator::start(
            setup,
            st.config.clone(),
            Box::new(PerformanceClock { performance }),
            move |result| *sink.borrow_mut() = Some(result),
        )
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

        st.renderer.as_renderer().resize(&area);
        st.sim = Some(sim);
        st.completed = completed;
        st.on_complete = Some(on_complete);

        let window_target: EventTarget = st.window.clone().unchecked_into();
        st.listeners = vec![
            Listener::attach(window_target.clone(), "keydown", key_closure(&self.state, true))?,
            Listener::attach(window_target.clone(), "keyup", key_closure(&self.state, false))?,
            Listener::attach(window_target, "resize", resize_closure(&self.state))?,
        ];

        let frame = self.frame.borrow();
        if let Some(closure) = frame.as_ref() {
            st.raf_id = Some(st.window.request_animation_frame(closure.as_ref().unchecked_ref())?);
        }
        Ok(())
    }

    /// Detach from the frame loop and input. Safe to call at any time,
    /// including from the completion callback.
    pub fn stop(&self) {
        match self.state.try_borrow_mut() {
            Ok(mut st) => st.detach(),
            Err(_) => log::warn!("stop() called while the host is busy; ignored"),
        }
    }

    /// Current frame as JSON, for score displays
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        let st = self.state.borrow();
        let sim = st
            .sim
            .as_ref()
            .ok_or_else(|| JsValue::from_str("no match started"))?;
        serde_json::to_string(&sim.snapshot()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Paddle and ball model matrices (3 x 16 floats) in "3d" mode
    pub fn scene_transforms(&self) -> Vec<f32> {
        self.state
            .borrow()
            .renderer
            .scene()
            .map(|scene| scene.flat_transforms())
            .unwrap_or_default()
    }

    /// Camera view-projection matrix (16 floats) in "3d" mode
    pub fn scene_view_proj(&self) -> Vec<f32> {
        self.state
            .borrow()
            .renderer
            .scene()
            .map(|scene| scene.view_proj_cols().to_vec())
            .unwrap_or_default()
    }

    pub fn is_running(&self) -> bool {
        self.state
            .borrow()
            .sim
            .as_ref()
            .map(|sim| sim.is_running())
            .unwrap_or(false)
    }
}

impl Drop for MatchHost {
    fn drop(&mut self) {
        let in_callback = match self.state.try_borrow_mut() {
            Ok(mut st) => {
                st.detach();
                st.in_callback
            }
            Err(_) => true,
        };
        // Break the closure's reference cycle
        let Some(closure) = self.frame.borrow_mut().take() else {
            return;
        };
        if !in_callback {
            return;
        }
        // Freed from inside the completion callback: the frame closure is
        // still running, so release it from a later task.
        let deferred = Closure::once_into_js(move || drop(closure));
        let scheduled = web_sys::window()
            .map(|window| window.set_timeout_with_callback(deferred.unchecked_ref()).is_ok())
            .unwrap_or(false);
        if !scheduled {
            log::warn!("Could not defer frame closure release; leaking it");
        }
    }
}

fn frame_closure(state: Rc<RefCell<HostState>>, frame: FrameClosure) -> Closure<dyn FnMut(f64)> {
    Closure::new(move |_timestamp: f64| {
        let finished = {
            let mut guard = state.borrow_mut();
            let st = &mut *guard;
            st.raf_id = None;
            let Some(sim) = st.sim.as_mut() else {
                return;
            };
            sim.tick();
            st.renderer.as_renderer().render(&sim.snapshot());

            if sim.is_running() {
                if let Some(closure) = frame.borrow().as_ref() {
                    match st.window.request_animation_frame(closure.as_ref().unchecked_ref()) {
                        Ok(id) => st.raf_id = Some(id),
                        Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
                    }
                }
                None
            } else {
                let result = st.completed.borrow_mut().take();
                let callback = st.on_complete.take();
                st.detach();
                let finished = result.zip(callback);
                st.in_callback = finished.is_some();
                finished
            }
        };

        // Borrow released: the callback may call back into the host
        if let Some((result, callback)) = finished {
            let outcome = callback.call3(
                &JsValue::NULL,
                &JsValue::from_str(&result.winner),
                &JsValue::from(result.left_score),
                &JsValue::from(result.right_score),
            );
            if let Err(e) = outcome {
                log::error!("Completion callback threw: {:?}", e);
            }
            if let Ok(mut st) = state.try_borrow_mut() {
                st.in_callback = false;
            }
        }
    })
}

fn key_closure(state: &Rc<RefCell<HostState>>, down: bool) -> Closure<dyn FnMut(web_sys::Event)> {
    let state = state.clone();
    Closure::new(move |event: web_sys::Event| {
        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let Some(key) = key_for(&event.key()) else {
            return;
        };
        event.prevent_default();
        let Ok(mut st) = state.try_borrow_mut() else {
            return;
        };
        if let Some(sim) = st.sim.as_mut() {
            if down {
                sim.handle_key_down(key);
            } else {
                sim.handle_key_up(key);
            }
        }
    })
}

fn resize_closure(state: &Rc<RefCell<HostState>>) -> Closure<dyn FnMut(web_sys::Event)> {
    let state = state.clone();
    Closure::new(move |_event: web_sys::Event| {
        let Ok(mut guard) = state.try_borrow_mut() else {
            return;
        };
        let st = &mut *guard;
        let width = st.canvas.client_width().max(1) as u32;
        let height = st.canvas.client_height().max(1) as u32;
        st.canvas.set_width(width);
        st.canvas.set_height(height);

        let area = match st.canvas_area() {
            Ok(area) => area,
            Err(e) => {
                log::warn!("Ignoring resize: {:?}", e);
                return;
            }
        };
        if let Some(sim) = st.sim.as_mut() {
            if let Err(e) = sim.resize(area) {
                log::warn!("Ignoring resize: {}", e);
                return;
            }
        }
        st.renderer.as_renderer().resize(&area);
        if let HostRenderer::Scene(scene) = &mut st.renderer {
            scene.set_aspect(width as f32 / height as f32);
        }
    })
}
