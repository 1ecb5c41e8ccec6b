//! Avatar integration under gravity and flap impulses

use super::state::Avatar;
use crate::consts::{TILT_EASE_RATE, TILT_MAX, TILT_MIN, TILT_VELOCITY_SCALE};
use crate::tuning::Tuning;

/// Boundary touched during an integration step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    None,
    /// Hit the top edge; stopped, not fatal
    Ceiling,
    /// Landed on the ground line; ends the run
    Ground,
}

/// Advance the avatar by `dt` seconds
///
/// Semi-implicit Euler: the velocity is updated and clamped first, then
/// moves the position. A flap replaces the velocity outright.
pub fn integrate(avatar: &mut Avatar, dt: f32, flap: bool, tuning: &Tuning) -> Contact {
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

    if flap {
        avatar.vel = tuning.flap_impulse;
    } else {
        avatar.vel += tuning.gravity * dt;
    }
    avatar.vel = avatar
        .vel
        .max(tuning.terminal_vel_up)
        .min(tuning.terminal_vel_down);

    avatar.y += avatar.vel * dt;

    let target = (avatar.vel / TILT_VELOCITY_SCALE).clamp(TILT_MIN, TILT_MAX);
    avatar.rotation += (target - avatar.rotation) * (dt * TILT_EASE_RATE).min(1.0);

    let ground = tuning.ground_line();
    if avatar.y + avatar.radius > ground {
        avatar.y = ground - avatar.radius;
        return Contact::Ground;
    }

    // Ceiling is the playfield's top edge measured at the avatar's center
    if avatar.y < 0.0 {
        avatar.y = 0.0;
        avatar.vel = 0.0;
        return Contact::Ceiling;
    }

    Contact::None
}
