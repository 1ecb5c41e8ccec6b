//! Input mapping
//!
//! Every pointer-down and every press of a flap key is one flap. No
//! debouncing: the simulation collapses repeats within a tick on its own.

/// Key names (DOM `KeyboardEvent.key` / `.code` style) that trigger a flap
pub const FLAP_KEYS: [&str; 7] = [" ", "Space", "ArrowUp", "w", "W", "KeyW", "Enter"];

/// Raw input from the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Mouse button, touch or pen down
    PointerDown,
    /// A key press, by key name
    KeyDown(String),
}

/// Does this event map to a flap
pub fn is_flap(event: &InputEvent) -> bool {
    match event {
        InputEvent::PointerDown => true,
        InputEvent::KeyDown(key) => FLAP_KEYS.contains(&key.as_str()),
    }
}
