//! Camera system: synchronized perspective/orthographic cameras, orbit
//! controls, distance-scaled dolly zoom and auto-framing.

/// Core camera structs, poses and view snapshots.
pub mod core;
/// Bounding-sphere framing on content load.
pub mod framing;
/// Rotate/pan orbit controls with damping.
pub mod orbit;
/// Orthographic/perspective synchronization.
pub mod sync;
/// Distance-scaled dolly zoom.
pub mod zoom;

pub use self::core::{
    CameraKind, CameraRig, CameraView, OrthographicCamera, PerspectiveCamera,
    Pose, Resolution,
};
pub use framing::FramingPlan;
pub use orbit::OrbitControls;
pub use zoom::ZoomOutcome;
