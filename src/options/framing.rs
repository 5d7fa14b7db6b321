use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How the camera is placed when a tile set finishes loading.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum FramingMode {
    /// Camera at `(2r, 2r, 2r)` looking at the origin.
    #[default]
    FixedRatio,
    /// Distance solved from the field of view so the sphere fills
    /// `coverage` of the viewport, with an elevated viewing angle.
    FieldOfView,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Framing", inline)]
#[serde(default)]
/// Auto-framing parameters applied on tile set load.
pub struct FramingOptions {
    /// Framing strategy.
    #[schemars(title = "Mode")]
    pub mode: FramingMode,
    /// Fraction of the viewport the bounding sphere should cover.
    #[schemars(title = "Coverage", range(min = 0.1, max = 1.0), extend("step" = 0.05))]
    pub coverage: f32,
    /// Multiplier applied to the fitted distance.
    #[schemars(title = "Margin", range(min = 1.0, max = 3.0), extend("step" = 0.05))]
    pub margin: f32,
    /// Camera height as a fraction of the fitted distance.
    #[schemars(title = "Elevation", range(min = 0.0, max = 2.0), extend("step" = 0.05))]
    pub elevation: f32,
}

impl Default for FramingOptions {
    fn default() -> Self {
        Self {
            mode: FramingMode::FixedRatio,
            coverage: 0.8,
            margin: 1.2,
            elevation: 0.5,
        }
    }
}
