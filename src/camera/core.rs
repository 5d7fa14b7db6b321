use glam::{Mat3, Mat4, Quat, Vec3};

use crate::options::CameraOptions;

/// Smallest orthographic half-height; keeps the extents from collapsing
/// when the camera sits on its orbit target.
pub const MIN_ORTHO_HALF_EXTENT: f32 = 1e-3;

/// Viewport size in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Resolution {
    /// Create a resolution, clamping each side to at least one pixel.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Width divided by height.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Which of the two synchronized cameras a binding or view refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraKind {
    /// The primary perspective camera.
    Perspective,
    /// The orthographic mirror of the perspective camera.
    Orthographic,
}

impl CameraKind {
    /// The other camera.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Perspective => Self::Orthographic,
            Self::Orthographic => Self::Perspective,
        }
    }
}

/// World-space camera placement. The camera looks down its local `-Z`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Eye position.
    pub position: Vec3,
    /// Camera-to-world rotation.
    pub orientation: Quat,
}

impl Pose {
    /// Pose at `position` looking at `target` with `Y` up.
    #[must_use]
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        let mut pose = Self {
            position,
            orientation: Quat::IDENTITY,
        };
        pose.look_at(target, Vec3::Y);
        pose
    }

    /// Rotate in place so the forward axis points at `target`.
    ///
    /// Leaves the orientation untouched when `target` coincides with the
    /// eye. When looking straight along `up`, `Z` is used as a fallback up
    /// axis.
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        let Some(forward) = (target - self.position).try_normalize() else {
            return;
        };
        let right = forward
            .cross(up)
            .try_normalize()
            .or_else(|| forward.cross(Vec3::Z).try_normalize())
            .unwrap_or(Vec3::X);
        let true_up = right.cross(forward);
        self.orientation =
            Quat::from_mat3(&Mat3::from_cols(right, true_up, -forward))
                .normalize();
    }

    /// Unit view direction.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }

    /// Unit camera-space up vector in world space.
    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.orientation * Vec3::Y
    }

    /// Unit camera-space right vector in world space.
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.orientation * Vec3::X
    }

    /// World-to-camera matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.position)
            .inverse()
    }
}

/// Perspective camera with a cached projection matrix.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    /// Eye placement.
    pub pose: Pose,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    projection: Mat4,
}

impl PerspectiveCamera {
    /// Camera built from options, looking at the world origin.
    #[must_use]
    pub fn new(options: &CameraOptions, aspect: f32) -> Self {
        let mut camera = Self {
            pose: Pose::looking_at(
                Vec3::from_array(options.initial_position),
                Vec3::ZERO,
            ),
            fovy: options.fovy,
            aspect,
            znear: options.znear,
            zfar: options.zfar,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection();
        camera
    }

    /// Recompute the projection after changing fov, aspect or clip planes.
    pub fn update_projection(&mut self) {
        // perspective_rh already uses [0,1] depth range (wgpu/Vulkan
        // convention)
        self.projection = Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        );
    }

    /// Set both clip planes and refresh the projection.
    pub fn set_clip_planes(&mut self, znear: f32, zfar: f32) {
        self.znear = znear;
        self.zfar = zfar;
        self.update_projection();
    }

    /// Projection matrix as of the last [`update_projection`](Self::update_projection).
    #[must_use]
    pub fn projection(&self) -> Mat4 {
        self.projection
    }
}

/// Orthographic camera with a cached projection matrix.
#[derive(Debug, Clone)]
pub struct OrthographicCamera {
    /// Eye placement.
    pub pose: Pose,
    /// Left extent in view space.
    pub left: f32,
    /// Right extent in view space.
    pub right: f32,
    /// Bottom extent in view space.
    pub bottom: f32,
    /// Top extent in view space.
    pub top: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    projection: Mat4,
}

impl OrthographicCamera {
    /// Unit-height orthographic camera mirroring `source`'s pose and planes.
    #[must_use]
    pub fn mirroring(source: &PerspectiveCamera) -> Self {
        let mut camera = Self {
            pose: source.pose,
            left: -source.aspect,
            right: source.aspect,
            bottom: -1.0,
            top: 1.0,
            znear: source.znear,
            zfar: source.zfar,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection();
        camera
    }

    /// Recompute the projection after changing extents or clip planes.
    pub fn update_projection(&mut self) {
        self.projection = Mat4::orthographic_rh(
            self.left,
            self.right,
            self.bottom,
            self.top,
            self.znear,
            self.zfar,
        );
    }

    /// Projection matrix as of the last [`update_projection`](Self::update_projection).
    #[must_use]
    pub fn projection(&self) -> Mat4 {
        self.projection
    }
}

/// Snapshot of the active camera handed to the tile provider and renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    /// Which camera produced this view.
    pub kind: CameraKind,
    /// Eye position.
    pub position: Vec3,
    /// Unit view direction.
    pub forward: Vec3,
    /// World-to-camera matrix.
    pub view: Mat4,
    /// Camera-to-clip matrix.
    pub projection: Mat4,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    /// Viewport the view is rendered into.
    pub resolution: Resolution,
}

impl CameraView {
    /// Combined view-projection matrix.
    #[must_use]
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }
}

/// The perspective camera, its orthographic mirror, and which one is live.
#[derive(Debug, Clone)]
pub struct CameraRig {
    /// Primary perspective camera.
    pub perspective: PerspectiveCamera,
    /// Orthographic camera kept in sync with the perspective one.
    pub orthographic: OrthographicCamera,
    active: CameraKind,
}

impl CameraRig {
    /// Build a rig from options with the perspective camera active.
    #[must_use]
    pub fn new(options: &CameraOptions, resolution: Resolution) -> Self {
        let perspective = PerspectiveCamera::new(options, resolution.aspect());
        let orthographic = OrthographicCamera::mirroring(&perspective);
        Self {
            perspective,
            orthographic,
            active: CameraKind::Perspective,
        }
    }

    /// The camera currently driving rendering and tile selection.
    #[must_use]
    pub fn active(&self) -> CameraKind {
        self.active
    }

    /// Switch the live camera. Provider re-binding is the caller's job.
    pub(crate) fn set_active(&mut self, kind: CameraKind) {
        self.active = kind;
    }

    /// Pose of the live camera.
    #[must_use]
    pub fn active_pose(&self) -> &Pose {
        match self.active {
            CameraKind::Perspective => &self.perspective.pose,
            CameraKind::Orthographic => &self.orthographic.pose,
        }
    }

    /// Mutable pose of the live camera.
    pub fn active_pose_mut(&mut self) -> &mut Pose {
        match self.active {
            CameraKind::Perspective => &mut self.perspective.pose,
            CameraKind::Orthographic => &mut self.orthographic.pose,
        }
    }

    /// Force clip planes on both cameras and refresh their projections.
    pub fn set_clip_planes(&mut self, znear: f32, zfar: f32) {
        self.perspective.set_clip_planes(znear, zfar);
        self.orthographic.znear = znear;
        self.orthographic.zfar = zfar;
        self.orthographic.update_projection();
    }

    /// Snapshot of the live camera.
    #[must_use]
    pub fn view(&self, resolution: Resolution) -> CameraView {
        let (pose, projection, znear, zfar) = match self.active {
            CameraKind::Perspective => (
                &self.perspective.pose,
                self.perspective.projection(),
                self.perspective.znear,
                self.perspective.zfar,
            ),
            CameraKind::Orthographic => (
                &self.orthographic.pose,
                self.orthographic.projection(),
                self.orthographic.znear,
                self.orthographic.zfar,
            ),
        };
        CameraView {
            kind: self.active,
            position: pose.position,
            forward: pose.forward(),
            view: pose.view_matrix(),
            projection,
            znear,
            zfar,
            resolution,
        }
    }
}
