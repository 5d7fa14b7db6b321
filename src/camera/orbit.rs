use std::f32::consts::PI;

use glam::{Vec2, Vec3};

use crate::camera::core::Pose;
use crate::options::ControlOptions;

/// Keeps the polar angle off the poles so `look_at` has a usable up axis.
const POLAR_EPSILON: f32 = 1e-4;
/// Pending motion below this is treated as settled.
const SETTLE_EPSILON: f32 = 1e-6;

/// Orbit-style rotate/pan around a target, with optional damping.
///
/// Zoom is intentionally absent: wheel input goes through
/// [`dolly_zoom`](crate::camera::zoom::dolly_zoom), which rewrites
/// [`target`](Self::target) itself.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    /// Point the camera orbits and looks toward.
    pub target: Vec3,
    enable_damping: bool,
    damping_factor: f32,
    rotate_speed: f32,
    pan_speed: f32,
    /// Pending (azimuth, polar) rotation in radians.
    spherical_delta: Vec2,
    /// Pending target translation in world units.
    pan_offset: Vec3,
}

impl OrbitControls {
    /// Controls orbiting the world origin.
    #[must_use]
    pub fn new(options: &ControlOptions) -> Self {
        Self {
            target: Vec3::ZERO,
            enable_damping: options.enable_damping,
            damping_factor: options.damping_factor,
            rotate_speed: options.rotate_speed,
            pan_speed: options.pan_speed,
            spherical_delta: Vec2::ZERO,
            pan_offset: Vec3::ZERO,
        }
    }

    /// Re-read sensitivity and damping from options.
    pub fn apply_options(&mut self, options: &ControlOptions) {
        self.enable_damping = options.enable_damping;
        self.damping_factor = options.damping_factor;
        self.rotate_speed = options.rotate_speed;
        self.pan_speed = options.pan_speed;
    }

    /// Queue a rotation from `delta` pixels of drag.
    pub fn rotate(&mut self, delta: Vec2) {
        self.spherical_delta -= delta * self.rotate_speed;
    }

    /// Queue a target translation from `delta` pixels of drag, scaled by
    /// the current eye-to-target distance.
    pub fn pan(&mut self, delta: Vec2, pose: &Pose) {
        let distance = (pose.position - self.target).length();
        let scale = self.pan_speed * distance;
        self.pan_offset +=
            pose.right() * (-delta.x * scale) + pose.up() * (delta.y * scale);
    }

    /// Whether rotation or pan is still easing out.
    #[must_use]
    pub fn is_settling(&self) -> bool {
        self.spherical_delta.length_squared() > SETTLE_EPSILON
            || self.pan_offset.length_squared() > SETTLE_EPSILON
    }

    /// Apply pending motion to `pose` and aim it at the target.
    ///
    /// Returns `true` when the pose moved.
    pub fn update(&mut self, pose: &mut Pose) -> bool {
        let offset = pose.position - self.target;
        let radius = offset.length();
        if radius <= f32::EPSILON {
            self.spherical_delta = Vec2::ZERO;
            self.pan_offset = Vec3::ZERO;
            return false;
        }

        let factor = if self.enable_damping {
            self.damping_factor
        } else {
            1.0
        };

        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();
        theta += self.spherical_delta.x * factor;
        phi += self.spherical_delta.y * factor;
        phi = phi.clamp(POLAR_EPSILON, PI - POLAR_EPSILON);

        self.target += self.pan_offset * factor;

        let new_offset = Vec3::new(
            radius * phi.sin() * theta.sin(),
            radius * phi.cos(),
            radius * phi.sin() * theta.cos(),
        );
        let before = *pose;
        pose.position = self.target + new_offset;
        pose.look_at(self.target, Vec3::Y);

        if self.enable_damping {
            self.spherical_delta *= 1.0 - factor;
            self.pan_offset *= 1.0 - factor;
        } else {
            self.spherical_delta = Vec2::ZERO;
            self.pan_offset = Vec3::ZERO;
        }

        (pose.position - before.position).length_squared() > SETTLE_EPSILON
            || pose.orientation.dot(before.orientation).abs() < 1.0 - 1e-7
    }
}
