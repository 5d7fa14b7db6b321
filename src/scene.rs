//! Scene renderer seam.
//!
//! The renderer owns the scene graph and the draw loop. The session only
//! attaches the provider's content group, keeps its translation current and
//! asks for one draw per frame from the live camera.

use glam::Vec3;

use crate::camera::{CameraView, Resolution};
use crate::error::TilesError;
use crate::tiles::GroupId;

/// Draws the scene graph from a camera.
pub trait SceneRenderer {
    /// Add a content group to the scene graph.
    fn attach(&mut self, group: GroupId);

    /// Remove a content group from the scene graph.
    fn detach(&mut self, group: GroupId);

    /// Set the world translation of a content group.
    fn set_group_translation(&mut self, group: GroupId, translation: Vec3);

    /// The viewport changed size.
    fn resize(&mut self, resolution: Resolution);

    /// Render one frame from `view`.
    ///
    /// # Errors
    ///
    /// Returns [`TilesError::Gpu`] when the frame could not be presented.
    fn draw(&mut self, view: &CameraView) -> Result<(), TilesError>;
}
