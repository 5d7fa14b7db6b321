use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Zoom", inline)]
#[serde(default)]
/// Dolly-zoom control law parameters.
pub struct ZoomOptions {
    /// Fraction of the distance to the world origin moved per wheel event.
    #[schemars(title = "Zoom Rate", range(min = 0.001, max = 0.2), extend("step" = 0.001))]
    pub rate: f32,
    /// Smallest step a wheel event may take.
    #[schemars(skip)]
    pub min_step: f32,
    /// Orbit target lead, as a fraction of the pre-step scene distance.
    #[schemars(skip)]
    pub target_lead: f32,
    /// Near clip plane forced after each zoom step.
    #[schemars(skip)]
    pub near: f32,
    /// Far clip plane forced after each zoom step.
    #[schemars(skip)]
    pub far: f32,
    /// Flip the wheel direction so scrolling up backs the camera away.
    #[schemars(title = "Invert Wheel")]
    pub invert_wheel: bool,
}

impl Default for ZoomOptions {
    fn default() -> Self {
        Self {
            rate: 0.02,
            min_step: 0.01,
            target_lead: 0.5,
            near: 0.001,
            far: 2_000_000.0,
            invert_wheel: false,
        }
    }
}
