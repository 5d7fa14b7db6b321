//! Auto-framing of freshly loaded content.
//!
//! The content is first re-centered so its bounding sphere sits on the
//! world origin; the camera is then placed to look at the origin from a
//! distance derived from the sphere radius.

use glam::Vec3;

use crate::camera::core::{CameraRig, PerspectiveCamera, Pose};
use crate::camera::orbit::OrbitControls;
use crate::options::{FramingMode, FramingOptions};
use crate::tiles::BoundingSphere;

/// Where to put the content root and the camera after a load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FramingPlan {
    /// Translation for the content root; moves the sphere center to the
    /// origin.
    pub content_offset: Vec3,
    /// Camera-to-origin distance the plan was solved for.
    pub distance: f32,
    /// New eye position.
    pub camera_position: Vec3,
    /// New orbit target (always the origin).
    pub target: Vec3,
}

/// Distance at which `radius` fills `coverage` of a viewport with the
/// given vertical fov (degrees) and aspect, scaled by `margin`.
///
/// The tighter of the vertical and horizontal fits wins.
#[must_use]
pub fn fit_distance(
    radius: f32,
    fovy_degrees: f32,
    aspect: f32,
    coverage: f32,
    margin: f32,
) -> f32 {
    let half_fov = fovy_degrees.to_radians() * 0.5;
    let fit_height = radius / (half_fov.tan() * coverage);
    let fit_width = fit_height / aspect;
    fit_height.max(fit_width) * margin
}

/// Solve a framing for `sphere`, or `None` when there is nothing usable to
/// frame.
#[must_use]
pub fn plan_framing(
    sphere: Option<BoundingSphere>,
    camera: &PerspectiveCamera,
    options: &FramingOptions,
) -> Option<FramingPlan> {
    let sphere = sphere.filter(BoundingSphere::is_usable)?;

    let (distance, camera_position) = match options.mode {
        FramingMode::FixedRatio => {
            let d = sphere.radius * 2.0;
            (d, Vec3::splat(d))
        }
        FramingMode::FieldOfView => {
            let d = fit_distance(
                sphere.radius,
                camera.fovy,
                camera.aspect,
                options.coverage,
                options.margin,
            );
            (d, Vec3::new(0.0, d * options.elevation, d))
        }
    };

    Some(FramingPlan {
        content_offset: -sphere.center,
        distance,
        camera_position,
        target: Vec3::ZERO,
    })
}

/// Move the live camera and the orbit target according to `plan`.
pub fn apply_framing(
    plan: &FramingPlan,
    rig: &mut CameraRig,
    controls: &mut OrbitControls,
) {
    let pose = rig.active_pose_mut();
    *pose = Pose::looking_at(plan.camera_position, plan.target);
    controls.target = plan.target;
    let _ = controls.update(pose);
    log::info!("Camera positioned at distance: {:.2}", plan.distance);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::core::Resolution;
    use crate::options::{CameraOptions, ControlOptions};

    fn camera(fovy: f32, aspect: f32) -> PerspectiveCamera {
        let opts = CameraOptions {
            fovy,
            ..CameraOptions::default()
        };
        PerspectiveCamera::new(&opts, aspect)
    }

    #[test]
    fn fov_fit_matches_hand_computation() {
        let d = fit_distance(10.0, 75.0, 1.0, 0.8, 1.0);
        let expected = 10.0 / (37.5_f32.to_radians().tan() * 0.8);
        assert!((d - expected).abs() < 1e-4);
        assert!((d - 16.29).abs() < 0.05);
        let with_margin = fit_distance(10.0, 75.0, 1.0, 0.8, 1.2);
        assert!((with_margin - d * 1.2).abs() < 1e-4);
        assert!((with_margin - 19.5).abs() < 0.1);
    }

    #[test]
    fn narrow_viewport_is_width_bound() {
        let square = fit_distance(10.0, 75.0, 1.0, 0.8, 1.2);
        let tall = fit_distance(10.0, 75.0, 0.5, 0.8, 1.2);
        let wide = fit_distance(10.0, 75.0, 2.0, 0.8, 1.2);
        assert!((tall - square * 2.0).abs() < 1e-3);
        assert!((wide - square).abs() < 1e-4);
    }

    #[test]
    fn fixed_ratio_places_camera_on_cube_diagonal() {
        let sphere = BoundingSphere::new(Vec3::new(5.0, -3.0, 1.0), 4.0);
        let plan = plan_framing(
            Some(sphere),
            &camera(75.0, 1.0),
            &FramingOptions::default(),
        )
        .unwrap();
        assert_eq!(plan.content_offset, Vec3::new(-5.0, 3.0, -1.0));
        assert_eq!(plan.camera_position, Vec3::splat(8.0));
        assert_eq!(plan.target, Vec3::ZERO);
    }

    #[test]
    fn field_of_view_mode_elevates_camera() {
        let options = FramingOptions {
            mode: FramingMode::FieldOfView,
            ..FramingOptions::default()
        };
        let sphere = BoundingSphere::new(Vec3::ZERO, 10.0);
        let plan =
            plan_framing(Some(sphere), &camera(75.0, 1.0), &options).unwrap();
        assert!((plan.distance - 19.5).abs() < 0.1);
        assert_eq!(plan.camera_position.x, 0.0);
        assert!((plan.camera_position.y - plan.distance * 0.5).abs() < 1e-4);
        assert!((plan.camera_position.z - plan.distance).abs() < 1e-4);
    }

    #[test]
    fn absent_or_degenerate_sphere_yields_no_plan() {
        let cam = camera(75.0, 1.0);
        let opts = FramingOptions::default();
        assert!(plan_framing(None, &cam, &opts).is_none());
        let flat = BoundingSphere::new(Vec3::ZERO, 0.0);
        assert!(plan_framing(Some(flat), &cam, &opts).is_none());
    }

    #[test]
    fn applying_plan_aims_camera_and_target_at_origin() {
        let mut rig =
            CameraRig::new(&CameraOptions::default(), Resolution::new(10, 10));
        let mut controls = OrbitControls::new(&ControlOptions::default());
        controls.target = Vec3::new(7.0, 7.0, 7.0);
        let plan = FramingPlan {
            content_offset: Vec3::ZERO,
            distance: 6.0,
            camera_position: Vec3::splat(6.0),
            target: Vec3::ZERO,
        };
        apply_framing(&plan, &mut rig, &mut controls);
        let pose = rig.active_pose();
        assert!((pose.position - Vec3::splat(6.0)).length() < 1e-3);
        assert!((pose.forward() - Vec3::splat(-1.0).normalize()).length() < 1e-4);
        assert_eq!(controls.target, Vec3::ZERO);
    }
}
