use serde::{Deserialize, Serialize};

/// Viewer actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// toggle_projection = "KeyO"
/// frame_content = "KeyF"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Switch between perspective and orthographic projection.
    ToggleProjection,
    /// Flip the provider's debug overlay on or off.
    ToggleDebug,
    /// Re-run auto-framing on the loaded content.
    FrameContent,
}
