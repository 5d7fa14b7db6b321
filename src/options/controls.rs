use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Controls", inline)]
#[serde(default)]
/// Orbit control sensitivity and damping.
pub struct ControlOptions {
    /// Whether rotation and pan ease out over several frames.
    #[schemars(title = "Damping")]
    pub enable_damping: bool,
    /// Fraction of the pending motion applied per frame when damping.
    #[schemars(title = "Damping Factor", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub damping_factor: f32,
    /// Radians of rotation per pixel of drag.
    #[schemars(title = "Rotate Speed", range(min = 0.001, max = 0.05), extend("step" = 0.001))]
    pub rotate_speed: f32,
    /// Pan distance per pixel of drag, as a fraction of the target distance.
    #[schemars(title = "Pan Speed", range(min = 0.0001, max = 0.01), extend("step" = 0.0001))]
    pub pan_speed: f32,
}

impl Default for ControlOptions {
    fn default() -> Self {
        Self {
            enable_damping: true,
            damping_factor: 0.05,
            rotate_speed: 0.005,
            pan_speed: 0.002,
        }
    }
}
