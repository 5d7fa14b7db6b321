use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Initial projection parameters for the perspective camera.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 120.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance before the first zoom.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance before the first zoom.
    #[schemars(skip)]
    pub zfar: f32,
    /// Camera position before any content has been framed.
    #[schemars(skip)]
    pub initial_position: [f32; 3],
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 75.0,
            znear: 0.1,
            zfar: 1_000_000.0,
            initial_position: [0.0, 0.0, 10.0],
        }
    }
}
