//! Centralized viewer options with TOML preset support.
//!
//! All tweakable settings (camera, zoom law, framing, orbit controls, tile
//! tuning, debug overlay, display, keybindings) are consolidated here.
//! Options serialize to/from TOML so a viewer can be started from a preset.

mod camera;
mod controls;
mod debug;
mod display;
mod framing;
mod keybindings;
mod tiles;
mod zoom;

use std::path::Path;

pub use camera::CameraOptions;
pub use controls::ControlOptions;
pub use debug::DebugOptions;
pub use display::DisplayOptions;
pub use framing::{FramingMode, FramingOptions};
pub use keybindings::KeybindingOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use tiles::TileOptions;
pub use zoom::ZoomOptions;

use crate::error::TilesError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[framing]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Initial perspective camera parameters.
    pub camera: CameraOptions,
    /// Dolly-zoom control law.
    pub zoom: ZoomOptions,
    /// Auto-framing on tile set load.
    pub framing: FramingOptions,
    /// Orbit control sensitivity and damping.
    pub controls: ControlOptions,
    /// Tile provider tuning.
    pub tiles: TileOptions,
    /// Debug overlay toggles.
    pub debug: DebugOptions,
    /// Viewer presentation.
    pub display: DisplayOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, TilesError> {
        let content = std::fs::read_to_string(path).map_err(TilesError::Io)?;
        let options: Self = toml::from_str(&content)
            .map_err(|e| TilesError::OptionsParse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), TilesError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| TilesError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(TilesError::Io)?;
        }
        std::fs::write(path, content).map_err(TilesError::Io)
    }

    /// Check the invariants the camera code relies on.
    ///
    /// # Errors
    ///
    /// Returns [`TilesError::InvalidOptions`] naming the first violated
    /// constraint.
    pub fn validate(&self) -> Result<(), TilesError> {
        check_clip("camera", self.camera.znear, self.camera.zfar)?;
        check_clip("zoom", self.zoom.near, self.zoom.far)?;
        if !(self.camera.fovy > 0.0 && self.camera.fovy < 180.0) {
            return Err(TilesError::InvalidOptions(format!(
                "camera.fovy must be in (0, 180), got {}",
                self.camera.fovy
            )));
        }
        if !(self.zoom.min_step > 0.0 && self.zoom.rate > 0.0) {
            return Err(TilesError::InvalidOptions(
                "zoom.rate and zoom.min_step must be positive".into(),
            ));
        }
        if !(self.framing.coverage > 0.0 && self.framing.coverage <= 1.0) {
            return Err(TilesError::InvalidOptions(format!(
                "framing.coverage must be in (0, 1], got {}",
                self.framing.coverage
            )));
        }
        if self.framing.margin <= 0.0 {
            return Err(TilesError::InvalidOptions(format!(
                "framing.margin must be positive, got {}",
                self.framing.margin
            )));
        }
        if let Some(key) = self.keybindings.duplicate_key() {
            return Err(TilesError::InvalidOptions(format!(
                "keybindings: {key} is bound to more than one action"
            )));
        }
        let damping = self.controls.damping_factor;
        if !(damping > 0.0 && damping <= 1.0) {
            return Err(TilesError::InvalidOptions(format!(
                "controls.damping_factor must be in (0, 1], got {damping}"
            )));
        }
        Ok(())
    }
}

fn check_clip(section: &str, near: f32, far: f32) -> Result<(), TilesError> {
    if near > 0.0 && near < far {
        Ok(())
    } else {
        Err(TilesError::InvalidOptions(format!(
            "{section}: near ({near}) must be positive and below far ({far})"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[framing]
mode = "field_of_view"
"#;
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.framing.mode, FramingMode::FieldOfView);
        assert_eq!(opts.framing.coverage, 0.8);
        assert_eq!(opts.tiles.error_target, 6.0);
        assert_eq!(opts.tiles.max_depth, 15);
        assert_eq!(opts.zoom.far, 2_000_000.0);
    }

    #[test]
    fn defaults_validate() {
        assert!(Options::default().validate().is_ok());
    }

    #[test]
    fn inverted_clip_planes_rejected() {
        let mut opts = Options::default();
        opts.zoom.near = 10.0;
        opts.zoom.far = 1.0;
        assert!(matches!(
            opts.validate(),
            Err(TilesError::InvalidOptions(_))
        ));
    }

    #[test]
    fn coverage_out_of_range_rejected() {
        let mut opts = Options::default();
        opts.framing.coverage = 0.0;
        assert!(opts.validate().is_err());
    }

    #[test]
    fn keybinding_lookup() {
        use crate::input::KeyAction;
        let opts = Options::default();
        assert_eq!(
            opts.keybindings.lookup("KeyO"),
            Some(KeyAction::ToggleProjection)
        );
        assert_eq!(opts.keybindings.lookup("KeyB"), Some(KeyAction::ToggleDebug));
        assert_eq!(opts.keybindings.lookup("KeyZ"), None);
    }

    #[test]
    fn key_bound_twice_rejected() {
        use crate::input::KeyAction;
        let mut opts = Options::default();
        let _ = opts
            .keybindings
            .bindings
            .insert(KeyAction::ToggleDebug, "KeyO".into());
        assert_eq!(opts.keybindings.duplicate_key(), Some("KeyO"));
        assert!(matches!(
            opts.validate(),
            Err(TilesError::InvalidOptions(msg)) if msg.contains("KeyO")
        ));
    }

    #[test]
    fn duplicate_binding_in_preset_fails_to_load() {
        let toml_str = r#"
[keybindings.bindings]
toggle_projection = "KeyP"
frame_content = "KeyP"
"#;
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert!(opts.validate().is_err());
    }

    #[test]
    fn clear_color_unpacks() {
        let rgb = DisplayOptions::default().clear_rgb();
        assert!((rgb[0] - f64::from(0x26) / 255.0).abs() < 1e-9);
        assert!((rgb[2] - f64::from(0x38) / 255.0).abs() < 1e-9);
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("camera"));
        assert!(props.contains_key("zoom"));
        assert!(props.contains_key("framing"));
        assert!(props.contains_key("tiles"));
        assert!(props.contains_key("debug"));
        assert!(!props.contains_key("keybindings"));

        let zoom = &props["zoom"]["properties"];
        assert!(zoom.get("rate").is_some());
        assert!(zoom.get("near").is_none());
    }
}
