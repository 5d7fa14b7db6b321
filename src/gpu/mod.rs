//! GPU resource management for the standalone viewer.
//!
//! Provides wgpu device/surface initialization and the window-surface
//! scene renderer.

/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// Window-surface scene renderer.
pub mod surface_renderer;

pub use render_context::{RenderContext, RenderContextError};
pub use surface_renderer::SurfaceRenderer;
