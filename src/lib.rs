//! Pipe Dash - A side-scrolling flap-through-the-gaps arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, game phase)
//! - `session`: Harness-facing wrapper that owns state and best-score persistence
//! - `platform`: Browser/native platform abstraction (input, time, storage)
//! - `persistence`: Best score load/save over a key-value store
//! - `tuning`: Data-driven game balance

pub mod persistence;
pub mod platform;
pub mod session;
pub mod sim;
pub mod tuning;

pub use persistence::BestScoreStore;
pub use session::Session;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
///
/// These are the defaults behind [`Tuning`]; the simulation reads its
/// values through a `Tuning` so they can be overridden from JSON.
pub mod consts {
    /// Visible playfield width (pixels)
    pub const GAME_WIDTH: f32 = 400.0;
    /// Visible playfield height, ground included (pixels)
    pub const GAME_HEIGHT: f32 = 600.0;
    /// Height of the ground strip at the bottom of the playfield
    pub const GROUND_HEIGHT: f32 = 80.0;

    /// Downward acceleration (pixels/s²)
    pub const GRAVITY: f32 = 1800.0;
    /// Velocity set by a flap (negative is up)
    pub const FLAP_IMPULSE: f32 = -520.0;
    /// Fastest upward speed (pixels/s, negative)
    pub const TERMINAL_VEL_UP: f32 = -600.0;
    /// Fastest downward speed (pixels/s)
    pub const TERMINAL_VEL_DOWN: f32 = 720.0;

    /// Avatar defaults
    pub const AVATAR_X: f32 = 110.0;
    pub const AVATAR_START_Y: f32 = 260.0;
    pub const AVATAR_RADIUS: f32 = 14.0;

    /// Orientation tilt: velocity divisor and clamp range (radians)
    pub const TILT_VELOCITY_SCALE: f32 = 600.0;
    pub const TILT_MIN: f32 = -0.6;
    pub const TILT_MAX: f32 = 0.45;
    /// Orientation smoothing rate (fraction per second, capped at 1 per tick)
    pub const TILT_EASE_RATE: f32 = 10.0;

    /// Obstacle scroll speed (pixels/s)
    pub const SCROLL_SPEED: f32 = 150.0;
    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 64.0;
    pub const OBSTACLE_GAP: f32 = 150.0;
    /// Minimum height of either obstacle segment
    pub const OBSTACLE_MARGIN: f32 = 50.0;
    /// Horizontal distance between consecutive obstacles
    pub const OBSTACLE_SPACING: f32 = 240.0;
    /// Obstacles seeded at run start
    pub const INITIAL_OBSTACLES: usize = 4;
    /// First obstacle lands this far past the right edge
    pub const FIRST_OBSTACLE_OFFSET: f32 = 120.0;
    /// Retire an obstacle once its right edge is this far past the left edge
    pub const RETIRE_MARGIN: f32 = 10.0;

    /// Largest frame delta fed to the simulation (ms)
    pub const MAX_FRAME_MS: f32 = 32.0;

    /// Backdrop scrolls at this fraction of the ground speed
    pub const PARALLAX_FACTOR: f32 = 0.25;
    /// Ground texture repeats every this many pixels
    pub const GROUND_TILE: f32 = 24.0;
}
