//! Tile stream provider seam.
//!
//! The provider streams level-of-detail geometry for the active camera. The
//! crate never looks inside it; it only binds cameras, pushes tuning
//! parameters, asks for the content bounding sphere and listens for load
//! lifecycle events.

/// Minimal provider reading a `tileset.json` manifest.
pub mod manifest;

use std::sync::mpsc::Sender;

use glam::Vec3;

use crate::camera::{CameraKind, CameraView, Resolution};
use crate::options::{DebugOptions, TileOptions};

/// Enclosing sphere of the currently loaded content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// Sphere center in world space.
    pub center: Vec3,
    /// Sphere radius.
    pub radius: f32,
}

impl BoundingSphere {
    /// Create a sphere.
    #[must_use]
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Whether the sphere can be framed: finite center and a positive,
    /// finite radius.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.center.is_finite() && self.radius.is_finite() && self.radius > 0.0
    }
}

/// Load lifecycle notification emitted by a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileEvent {
    /// The root tile set manifest finished loading.
    TileSetLoaded,
    /// A tile's model content finished loading.
    ModelLoaded,
    /// Something failed to load; the payload is provider diagnostics.
    LoadError(String),
}

/// Opaque handle for a scene-graph group owned by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId(pub u32);

/// Per-frame tuning handed to the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct TileParams {
    /// Screen-space error tolerance in pixels.
    pub error_target: f32,
    /// Deepest hierarchy level to traverse.
    pub max_depth: u32,
    /// Debug overlay toggles.
    pub debug: DebugOptions,
}

impl TileParams {
    /// Bundle tile and debug options.
    #[must_use]
    pub fn new(tiles: &TileOptions, debug: &DebugOptions) -> Self {
        Self {
            error_target: tiles.error_target,
            max_depth: tiles.max_depth,
            debug: debug.clone(),
        }
    }
}

/// Streaming tile renderer driven by the session.
///
/// Implementations may emit [`TileEvent`]s from any thread through the
/// sender passed to [`subscribe`](Self::subscribe).
pub trait TileStreamProvider {
    /// Start using `camera` for tile selection.
    fn bind_camera(&mut self, camera: CameraKind);

    /// Stop using `camera` for tile selection.
    fn unbind_camera(&mut self, camera: CameraKind);

    /// Viewport resolution used for `camera`'s screen-space error metric.
    fn set_resolution(&mut self, camera: CameraKind, resolution: Resolution);

    /// World-space bounding sphere of the content loaded so far, if any.
    /// The root translation is already applied.
    fn bounding_sphere(&self) -> Option<BoundingSphere>;

    /// Register a listener for load lifecycle events.
    fn subscribe(&mut self, sender: Sender<TileEvent>);

    /// Tuning read by the next [`update`](Self::update).
    fn set_params(&mut self, params: &TileParams);

    /// Scene-graph group holding the streamed content.
    fn root_group(&self) -> GroupId;

    /// Translate the content root, e.g. to re-center it on the origin.
    fn set_root_translation(&mut self, translation: Vec3);

    /// Advance streaming for this frame. `view` must already hold the
    /// final camera transform.
    fn update(&mut self, view: &CameraView);
}
