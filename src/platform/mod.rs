//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time/ticks
//! - Input events
//! - Storage (LocalStorage on web, a JSON file on native)

pub mod input;
pub mod storage;
pub mod time;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use input::{FLAP_KEYS, InputEvent, is_flap};
pub use storage::{KeyValueStore, MemoryStore, StorageError};
pub use time::FrameClock;

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStore;
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStore;
