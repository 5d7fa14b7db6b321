//! Distance-scaled dolly zoom.
//!
//! Each wheel event moves the camera along its view direction by a step
//! proportional to its distance from the world origin. Nothing carries over
//! between events, so rapid scrolling compounds linearly.

use glam::Vec3;

use crate::camera::core::CameraRig;
use crate::options::ZoomOptions;

/// Reference point the zoom speed is measured from.
///
/// This is the world origin, not the orbit target: content is re-centered
/// on the origin when it loads, so distance to origin tracks distance to
/// the scene even after panning moves the target.
pub const SCENE_ORIGIN: Vec3 = Vec3::ZERO;

/// Result of one dolly-zoom step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomOutcome {
    /// Distance from the eye to [`SCENE_ORIGIN`] before the step.
    pub distance_to_scene: f32,
    /// Signed translation along the view direction (positive = zoom in).
    pub amount: f32,
    /// Eye position after the step.
    pub position: Vec3,
    /// Orbit target after the step.
    pub target: Vec3,
}

/// Step magnitude for a camera `distance` away from the scene origin.
#[must_use]
pub fn zoom_step(distance: f32, options: &ZoomOptions) -> f32 {
    (distance * options.rate).max(options.min_step)
}

/// Move the active camera along its view direction and re-seat the target.
///
/// Negative `delta` zooms in (the eye moves forward), positive zooms out.
/// A zero or non-finite delta is ignored and returns `None`. Both cameras
/// get the zoom clip planes afterwards.
pub fn dolly_zoom(
    rig: &mut CameraRig,
    target: &mut Vec3,
    delta: f32,
    options: &ZoomOptions,
) -> Option<ZoomOutcome> {
    if delta == 0.0 || !delta.is_finite() {
        return None;
    }

    let pose = rig.active_pose_mut();
    let direction = pose.forward();
    let distance_to_scene = pose.position.distance(SCENE_ORIGIN);
    let step = zoom_step(distance_to_scene, options);
    let amount = if delta < 0.0 { step } else { -step };

    pose.position += direction * amount;
    *target =
        pose.position + direction * (distance_to_scene * options.target_lead);
    let position = pose.position;

    rig.set_clip_planes(options.near, options.far);

    log::debug!(
        "zoom: pos [{:.1}, {:.1}, {:.1}], distance to scene {:.2}",
        position.x,
        position.y,
        position.z,
        distance_to_scene
    );

    Some(ZoomOutcome {
        distance_to_scene,
        amount,
        position,
        target: *target,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::core::{Pose, Resolution};
    use crate::options::CameraOptions;

    fn rig_at(position: Vec3, look: Vec3) -> CameraRig {
        let mut rig =
            CameraRig::new(&CameraOptions::default(), Resolution::new(800, 600));
        rig.perspective.pose = Pose::looking_at(position, look);
        rig
    }

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn step_floors_near_origin() {
        let opts = ZoomOptions::default();
        for d in [0.0, 0.1, 0.25, 0.49, 0.5] {
            assert_eq!(zoom_step(d, &opts), 0.01, "distance {d}");
        }
    }

    #[test]
    fn step_scales_with_distance() {
        let opts = ZoomOptions::default();
        let mut last = zoom_step(0.5, &opts);
        for d in [0.6, 1.0, 10.0, 250.0, 1.0e6] {
            let step = zoom_step(d, &opts);
            assert_eq!(step, d * 0.02);
            assert!(step > last);
            last = step;
        }
    }

    #[test]
    fn zoom_in_approaches_origin_and_out_recedes() {
        let opts = ZoomOptions::default();
        let start = Vec3::new(3.0, -7.0, 12.0);
        for delta in [-1.0, 1.0] {
            let mut rig = rig_at(start, Vec3::ZERO);
            let mut target = Vec3::ZERO;
            let outcome = dolly_zoom(&mut rig, &mut target, delta, &opts).unwrap();
            let after = outcome.position.length();
            if delta < 0.0 {
                assert!(after < start.length());
            } else {
                assert!(after > start.length());
            }
        }
    }

    #[test]
    fn target_leads_camera_by_half_scene_distance() {
        let opts = ZoomOptions::default();
        let mut rig = rig_at(Vec3::new(10.0, 0.0, 0.0), Vec3::ZERO);
        let mut target = Vec3::ZERO;
        let outcome = dolly_zoom(&mut rig, &mut target, -1.0, &opts).unwrap();

        assert!((outcome.distance_to_scene - 10.0).abs() < 1e-5);
        assert!((outcome.amount - 0.2).abs() < 1e-5);
        assert!(close(rig.perspective.pose.position, Vec3::new(9.8, 0.0, 0.0)));
        assert!(close(target, Vec3::new(4.8, 0.0, 0.0)));
    }

    #[test]
    fn zoom_at_origin_still_moves_by_floor() {
        let opts = ZoomOptions::default();
        let mut rig = rig_at(Vec3::ZERO, Vec3::NEG_Z);
        rig.perspective.pose.position = Vec3::ZERO;
        let mut target = Vec3::NEG_Z;
        let outcome = dolly_zoom(&mut rig, &mut target, 1.0, &opts).unwrap();
        assert_eq!(outcome.amount, -0.01);
        assert!((rig.perspective.pose.position.length() - 0.01).abs() < 1e-6);
        assert!(close(target, rig.perspective.pose.position));
    }

    #[test]
    fn zoom_forces_wide_clip_planes() {
        let opts = ZoomOptions::default();
        let mut rig = rig_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        let mut target = Vec3::ZERO;
        let _ = dolly_zoom(&mut rig, &mut target, -3.0, &opts);
        assert_eq!(rig.perspective.znear, 0.001);
        assert_eq!(rig.perspective.zfar, 2_000_000.0);
        assert_eq!(rig.orthographic.znear, 0.001);
    }

    #[test]
    fn zero_delta_is_ignored() {
        let opts = ZoomOptions::default();
        let mut rig = rig_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        let mut target = Vec3::ONE;
        assert!(dolly_zoom(&mut rig, &mut target, 0.0, &opts).is_none());
        assert_eq!(target, Vec3::ONE);
    }

    #[test]
    fn repeated_events_compound() {
        let opts = ZoomOptions::default();
        let mut rig = rig_at(Vec3::new(0.0, 0.0, 100.0), Vec3::ZERO);
        let mut target = Vec3::ZERO;
        let _ = dolly_zoom(&mut rig, &mut target, -1.0, &opts);
        let _ = dolly_zoom(&mut rig, &mut target, -1.0, &opts);
        // 100 - 2.0, then 98 - 1.96
        assert!((rig.perspective.pose.position.z - 96.04).abs() < 1e-3);
    }
}
