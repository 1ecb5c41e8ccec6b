//! Browser bindings
//!
//! Exposes a [`Session`] to a JS host that owns the canvas, audio and event
//! listeners. The host forwards input, calls `frame` from
//! `requestAnimationFrame`, and draws from `snapshot_json`.

use wasm_bindgen::prelude::*;

use crate::persistence::BestScoreStore;
use crate::platform::input::InputEvent;
use crate::platform::storage::LocalStore;
use crate::session::Session;
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    // Fails only if a logger is already installed
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Pipe Dash wasm module loaded");
}

#[wasm_bindgen]
pub struct WebGame {
    session: Session<LocalStore>,
}

#[wasm_bindgen]
impl WebGame {
    /// New idle game; pass tuning JSON to override defaults
    #[wasm_bindgen(constructor)]
    pub fn new(tuning_json: Option<String>) -> WebGame {
        let tuning = match tuning_json.as_deref().map(Tuning::from_json) {
            Some(Ok(tuning)) => tuning,
            Some(Err(e)) => {
                log::warn!("Rejected tuning, using defaults: {}", e);
                Tuning::default()
            }
            None => Tuning::default(),
        };
        let seed = js_sys::Date::now() as u64;
        log::info!("Game initialized with seed: {}", seed);
        WebGame {
            session: Session::new(seed, tuning, BestScoreStore::new(LocalStore::new())),
        }
    }

    pub fn flap(&mut self) {
        self.session.flap();
    }

    pub fn pointer_down(&mut self) {
        self.session.handle_input(&InputEvent::PointerDown);
    }

    /// Returns true if the key is a flap key (so the host can preventDefault)
    pub fn key_down(&mut self, key: &str) -> bool {
        self.session.handle_input(&InputEvent::KeyDown(key.to_string()))
    }

    /// Advance to the `requestAnimationFrame` timestamp; returns this frame's events as JSON
    pub fn frame(&mut self, now_ms: f64) -> String {
        let events = self.session.frame(now_ms);
        serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())
    }

    /// Call from `visibilitychange` when the page becomes visible again
    pub fn resume(&mut self) {
        self.session.resume();
    }

    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.session.snapshot()).unwrap_or_default()
    }
}
