//! Best score persistence
//!
//! One named integer on top of a [`KeyValueStore`]. Reads default to 0 when
//! the value is missing, unreadable or not a number; writes are best-effort.
//! Failures are logged here and never reach the simulation.

use crate::platform::storage::KeyValueStore;

/// Best score record backed by a key-value store
#[derive(Debug, Clone)]
pub struct BestScoreStore<S: KeyValueStore> {
    backend: S,
}

impl<S: KeyValueStore> BestScoreStore<S> {
    /// Storage key for the best score
    pub const STORAGE_KEY: &'static str = "pipe_dash_best";

    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Stored best score, or 0 if there isn't a usable one
    pub fn load(&self) -> u32 {
        match self.backend.get_item(Self::STORAGE_KEY) {
            Ok(Some(raw)) => match parse_score(&raw) {
                Some(best) => {
                    log::info!("Loaded best score {}", best);
                    best
                }
                None => {
                    log::warn!("Ignoring corrupt best score {:?}", raw);
                    0
                }
            },
            Ok(None) => {
                log::info!("No best score found, starting fresh");
                0
            }
            Err(e) => {
                log::warn!("Could not read best score: {}", e);
                0
            }
        }
    }

    /// Store a new best score; failure is logged and ignored
    pub fn save(&mut self, best: u32) {
        match self.backend.set_item(Self::STORAGE_KEY, &best.to_string()) {
            Ok(()) => log::info!("Best score saved ({})", best),
            Err(e) => log::warn!("Could not save best score {}: {}", best, e),
        }
    }
}

/// Accepts plain integers and, leniently, non-negative finite decimals
fn parse_score(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<u32>() {
        return Some(n);
    }
    let f = raw.parse::<f64>().ok()?;
    (0.0..=u32::MAX as f64).contains(&f).then(|| f.floor() as u32)
}
