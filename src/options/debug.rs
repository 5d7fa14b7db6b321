use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Debug overlay toggles forwarded to the tile provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Debug", inline)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct DebugOptions {
    /// Master switch for the provider's debug overlay.
    #[schemars(title = "Enable Debug")]
    pub enable_debug: bool,
    /// Draw oriented bounding boxes of visible tiles.
    #[schemars(title = "Box Bounds")]
    pub display_box_bounds: bool,
    /// Draw bounding spheres of visible tiles.
    #[schemars(title = "Sphere Bounds")]
    pub display_sphere_bounds: bool,
}

impl Default for DebugOptions {
    fn default() -> Self {
        Self {
            enable_debug: true,
            display_box_bounds: true,
            display_sphere_bounds: true,
        }
    }
}
