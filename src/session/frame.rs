use glam::Vec3;

use crate::camera::CameraView;

/// Everything the draw step needs, produced once per [`tick`](super::Session::tick).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Monotonic frame counter, starting at 1.
    pub index: u64,
    /// Seconds since the previous frame.
    pub dt: f32,
    /// Live camera after damping, mode resolution and sync.
    pub view: CameraView,
    /// Translation of the streamed content root.
    pub content_offset: Vec3,
    /// Whether orbit damping moved the camera this frame.
    pub camera_moved: bool,
}
