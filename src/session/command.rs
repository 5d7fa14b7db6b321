//! The session's complete interactive vocabulary.
//!
//! Every user-facing operation, whether triggered by a key press, mouse
//! gesture or programmatic call, is a `Command` passed to
//! [`Session::execute`](super::Session::execute).

use glam::Vec2;

use crate::camera::CameraKind;

/// A discrete or parameterized operation the session can perform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Dolly the camera (positive = zoom out, negative = zoom in).
    Zoom {
        /// Wheel delta.
        delta: f32,
    },
    /// Orbit the camera by `delta` pixels of mouse movement.
    Rotate {
        /// Horizontal and vertical drag delta.
        delta: Vec2,
    },
    /// Pan the orbit target by `delta` pixels of mouse movement.
    Pan {
        /// Horizontal and vertical drag delta.
        delta: Vec2,
    },
    /// Switch to the other projection on the next tick.
    ToggleProjection,
    /// Switch to a specific projection on the next tick.
    SetProjection(CameraKind),
    /// Flip the provider's debug overlay.
    ToggleDebug,
    /// Re-run auto-framing on the loaded content.
    FrameContent,
}
