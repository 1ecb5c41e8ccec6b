//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Elapsed time comes from the caller, clamped per tick
//! - Seeded RNG only
//! - Obstacles kept in spawn order (head = leftmost)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod obstacles;
pub mod physics;
pub mod state;
pub mod tick;

pub use collision::{Rect, avatar_hits_obstacle, circle_rect_collision};
pub use obstacles::generate;
pub use physics::{Contact, integrate};
pub use state::{
    Avatar, CrashCause, GameEvent, GamePhase, GameState, ObstaclePair, PipeSkin, Snapshot,
};
pub use tick::{flap, tick};
