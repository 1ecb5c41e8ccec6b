//! Attract-mode controller
//!
//! Flaps whenever the avatar is falling below a target line inside the next
//! gap. Good enough to keep a demo run alive for a while, not to play well.

use super::state::{GamePhase, GameState};

/// Fraction of the gap height (from its top) the autopilot aims to stay above
const AIM_FRACTION: f32 = 0.7;

/// Whether the demo player should flap this frame
pub fn should_flap(state: &GameState) -> bool {
    match state.phase {
        // Auto-start from the title screen
        GamePhase::Idle => true,
        // Restarting is the harness's call
        GamePhase::Ended => false,
        GamePhase::Running => {
            let avatar = &state.avatar;
            let target_y = state
                .obstacles
                .iter()
                .find(|p| p.right() + avatar.radius > avatar.x)
                .map(|p| p.top_height + p.gap * AIM_FRACTION)
                .unwrap_or(state.tuning.ground_line() * 0.5);

            avatar.y > target_y && avatar.vel >= 0.0
        }
    }
}
