//! Keeps the orthographic camera a faithful mirror of the perspective one.
//!
//! The orthographic view volume is sized from the eye-to-target distance so
//! that toggling projection keeps the target region roughly the same size on
//! screen.

use glam::Vec3;

use crate::camera::core::{CameraKind, CameraRig, MIN_ORTHO_HALF_EXTENT};

/// Orthographic view-volume extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthoExtents {
    /// Left plane.
    pub left: f32,
    /// Right plane.
    pub right: f32,
    /// Bottom plane.
    pub bottom: f32,
    /// Top plane.
    pub top: f32,
}

/// Half-height of the orthographic volume for an eye at `position` orbiting
/// `target`.
#[must_use]
pub fn ortho_scale(position: Vec3, target: Vec3) -> f32 {
    (position.distance(target) / 2.0).max(MIN_ORTHO_HALF_EXTENT)
}

/// Extents for a viewport of the given aspect and half-height `scale`.
#[must_use]
pub fn ortho_extents(aspect: f32, scale: f32) -> OrthoExtents {
    OrthoExtents {
        left: -aspect * scale,
        right: aspect * scale,
        bottom: -scale,
        top: scale,
    }
}

/// Copy the live camera's pose to the other one and resize the orthographic
/// volume around `target`.
pub fn sync_cameras(rig: &mut CameraRig, target: Vec3) {
    match rig.active() {
        CameraKind::Perspective => rig.orthographic.pose = rig.perspective.pose,
        CameraKind::Orthographic => rig.perspective.pose = rig.orthographic.pose,
    }

    let scale = ortho_scale(rig.perspective.pose.position, target);
    let extents = ortho_extents(rig.perspective.aspect, scale);

    let ortho = &mut rig.orthographic;
    ortho.left = extents.left;
    ortho.right = extents.right;
    ortho.bottom = extents.bottom;
    ortho.top = extents.top;
    ortho.znear = rig.perspective.znear;
    ortho.zfar = rig.perspective.zfar;
    ortho.update_projection();
}
