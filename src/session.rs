//! Harness-facing game session
//!
//! Owns one [`GameState`] and the best-score store. Hosts feed it input
//! events and timestamps; it runs the simulation, persists new bests and
//! hands back the events of the frame for audio/UI to react to.

use crate::persistence::BestScoreStore;
use crate::platform::input::{InputEvent, is_flap};
use crate::platform::storage::KeyValueStore;
use crate::platform::time::FrameClock;
use crate::sim::{self, GameEvent, GamePhase, GameState, Snapshot};
use crate::tuning::Tuning;

pub struct Session<S: KeyValueStore> {
    state: GameState,
    store: BestScoreStore<S>,
    clock: FrameClock,
}

impl<S: KeyValueStore> Session<S> {
    /// Start an idle session, seeding `best` from the store
    pub fn new(seed: u64, tuning: Tuning, store: BestScoreStore<S>) -> Self {
        let best = store.load();
        let clock = FrameClock::new(tuning.max_frame_ms);
        Self {
            state: GameState::new(seed, best, tuning),
            store,
            clock,
        }
    }

    /// Read-only view of the simulation (for renderers)
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn store(&self) -> &BestScoreStore<S> {
        &self.store
    }

    pub fn flap(&mut self) {
        sim::flap(&mut self.state);
    }

    /// Route a raw input event; returns true if it was a flap
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        let flapped = is_flap(event);
        if flapped {
            self.flap();
        }
        flapped
    }

    /// Advance by a host timestamp (ms); the delta is measured and clamped here
    pub fn frame(&mut self, now_ms: f64) -> Vec<GameEvent> {
        let dt_ms = self.clock.advance(now_ms);
        self.tick(dt_ms)
    }

    /// Drop the frame clock's last timestamp so the next frame measures zero
    ///
    /// Call when the host was hidden or paused; the simulation state is kept.
    pub fn resume(&mut self) {
        self.clock.reset();
        log::debug!("Frame clock reset");
    }

    /// Advance by an explicit delta (ms) and return what happened
    pub fn tick(&mut self, dt_ms: f32) -> Vec<GameEvent> {
        sim::tick(&mut self.state, dt_ms);
        let events = self.state.drain_events();
        for event in &events {
            if let GameEvent::NewBest { best } = event {
                self.store.save(*best);
            }
        }
        events
    }
}
