use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Display", inline)]
#[serde(default)]
/// Presentation settings for the viewer window.
pub struct DisplayOptions {
    /// Background clear color as `0xRRGGBB`.
    #[schemars(skip)]
    pub clear_color: u32,
    /// Start in orthographic projection instead of perspective.
    #[schemars(title = "Orthographic")]
    pub orthographic: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            clear_color: 0x0026_3238,
            orthographic: false,
        }
    }
}

impl DisplayOptions {
    /// Clear color as linear-agnostic `[r, g, b]` in `0.0..=1.0`.
    #[must_use]
    pub fn clear_rgb(&self) -> [f64; 3] {
        let c = self.clear_color;
        [
            f64::from((c >> 16) & 0xff) / 255.0,
            f64::from((c >> 8) & 0xff) / 255.0,
            f64::from(c & 0xff) / 255.0,
        ]
    }
}
