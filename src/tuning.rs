//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads lives here. Defaults come
//! from [`crate::consts`]; a JSON document may override any subset.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors raised while loading tuning
#[derive(Debug)]
pub enum TuningError {
    /// The document was not valid JSON for `Tuning`
    Parse(serde_json::Error),
    /// The values parsed but break a gameplay invariant
    Invalid(String),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "failed to parse tuning: {}", e),
            TuningError::Invalid(msg) => write!(f, "invalid tuning: {}", msg),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

/// Gameplay balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub playfield_width: f32,
    pub playfield_height: f32,
    pub ground_height: f32,

    // === Avatar physics ===
    pub gravity: f32,
    pub flap_impulse: f32,
    pub terminal_vel_up: f32,
    pub terminal_vel_down: f32,
    pub avatar_x: f32,
    pub avatar_start_y: f32,
    pub avatar_radius: f32,

    // === Obstacles ===
    pub scroll_speed: f32,
    pub obstacle_width: f32,
    pub obstacle_gap: f32,
    pub obstacle_margin: f32,
    pub obstacle_spacing: f32,
    pub initial_obstacles: usize,
    pub first_obstacle_offset: f32,
    pub retire_margin: f32,

    // === Timing ===
    /// Frame deltas above this are clamped before integration
    pub max_frame_ms: f32,

    // === Presentation ===
    pub parallax_factor: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            playfield_width: GAME_WIDTH,
            playfield_height: GAME_HEIGHT,
            ground_height: GROUND_HEIGHT,

            gravity: GRAVITY,
            flap_impulse: FLAP_IMPULSE,
            terminal_vel_up: TERMINAL_VEL_UP,
            terminal_vel_down: TERMINAL_VEL_DOWN,
            avatar_x: AVATAR_X,
            avatar_start_y: AVATAR_START_Y,
            avatar_radius: AVATAR_RADIUS,

            scroll_speed: SCROLL_SPEED,
            obstacle_width: OBSTACLE_WIDTH,
            obstacle_gap: OBSTACLE_GAP,
            obstacle_margin: OBSTACLE_MARGIN,
            obstacle_spacing: OBSTACLE_SPACING,
            initial_obstacles: INITIAL_OBSTACLES,
            first_obstacle_offset: FIRST_OBSTACLE_OFFSET,
            retire_margin: RETIRE_MARGIN,

            max_frame_ms: MAX_FRAME_MS,

            parallax_factor: PARALLAX_FACTOR,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON document (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Y coordinate of the ground line (top of the ground strip)
    #[inline]
    pub fn ground_line(&self) -> f32 {
        self.playfield_height - self.ground_height
    }

    /// Vertical room left for the random part of an obstacle's top height
    #[inline]
    pub fn obstacle_slack(&self) -> f32 {
        self.ground_line() - self.obstacle_gap - 2.0 * self.obstacle_margin
    }

    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        let fail = |msg: &str| Err(TuningError::Invalid(msg.to_string()));

        if !(self.playfield_width > 0.0 && self.playfield_height > 0.0) {
            return fail("playfield dimensions must be positive");
        }
        if !(self.ground_height >= 0.0 && self.ground_height < self.playfield_height) {
            return fail("ground height must fit inside the playfield");
        }
        if !(self.terminal_vel_up <= self.flap_impulse && self.flap_impulse <= 0.0) {
            return fail("flap impulse must be upward and within terminal_vel_up");
        }
        if !(self.terminal_vel_down > 0.0) {
            return fail("terminal_vel_down must be positive");
        }
        if !(self.avatar_radius > 0.0) {
            return fail("avatar radius must be positive");
        }
        if !(self.obstacle_width > 0.0 && self.obstacle_gap > 0.0 && self.obstacle_margin >= 0.0)
        {
            return fail("obstacle width and gap must be positive, margin non-negative");
        }
        if self.obstacle_slack() < 0.0 {
            return fail("gap plus both margins must fit above the ground");
        }
        if !(self.obstacle_spacing > 0.0 && self.scroll_speed > 0.0) {
            return fail("obstacle spacing and scroll speed must be positive");
        }
        if self.initial_obstacles == 0 {
            return fail("at least one initial obstacle is required");
        }
        if !(self.max_frame_ms > 0.0) {
            return fail("max_frame_ms must be positive");
        }
        Ok(())
    }
}
