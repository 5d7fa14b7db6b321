use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Tiles", inline)]
#[serde(default)]
/// Tuning knobs handed to the tile stream provider every frame.
pub struct TileOptions {
    /// Screen-space error tolerance in pixels.
    #[schemars(title = "Error Target", range(min = 0.0, max = 50.0), extend("step" = 0.5))]
    pub error_target: f32,
    /// Deepest tile hierarchy level the provider may traverse.
    #[schemars(title = "Max Depth", range(min = 1, max = 32))]
    pub max_depth: u32,
}

impl Default for TileOptions {
    fn default() -> Self {
        Self {
            error_target: 6.0,
            max_depth: 15,
        }
    }
}
