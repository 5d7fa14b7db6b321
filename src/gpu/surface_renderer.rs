//! Window-surface implementation of [`SceneRenderer`].
//!
//! Presents one clear pass per frame in the configured background color and
//! keeps the group bookkeeping a tile mesh pass reads from.

use std::collections::HashMap;

use glam::Vec3;

use super::render_context::RenderContext;
use crate::camera::{CameraView, Resolution};
use crate::error::TilesError;
use crate::options::DisplayOptions;
use crate::scene::SceneRenderer;
use crate::tiles::GroupId;

/// Renders into a winit window surface.
pub struct SurfaceRenderer {
    context: RenderContext,
    clear_color: wgpu::Color,
    groups: HashMap<GroupId, Vec3>,
    frames_presented: u64,
}

impl SurfaceRenderer {
    /// Wrap an initialized render context.
    #[must_use]
    pub fn new(context: RenderContext, display: &DisplayOptions) -> Self {
        let [r, g, b] = display.clear_rgb();
        Self {
            context,
            clear_color: wgpu::Color { r, g, b, a: 1.0 },
            groups: HashMap::new(),
            frames_presented: 0,
        }
    }

    /// Translation of an attached group, if attached.
    #[must_use]
    pub fn group_translation(&self, group: GroupId) -> Option<Vec3> {
        self.groups.get(&group).copied()
    }

    /// Frames successfully presented so far.
    #[must_use]
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }
}

impl SceneRenderer for SurfaceRenderer {
    fn attach(&mut self, group: GroupId) {
        let _ = self.groups.entry(group).or_insert(Vec3::ZERO);
    }

    fn detach(&mut self, group: GroupId) {
        let _ = self.groups.remove(&group);
    }

    fn set_group_translation(&mut self, group: GroupId, translation: Vec3) {
        if let Some(slot) = self.groups.get_mut(&group) {
            *slot = translation;
        }
    }

    fn resize(&mut self, resolution: Resolution) {
        self.context.resize(resolution.width, resolution.height);
    }

    fn draw(&mut self, view: &CameraView) -> Result<(), TilesError> {
        let frame = match self.context.get_next_frame() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                log::debug!("surface outdated, reconfiguring");
                self.context.reconfigure();
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("surface timeout, skipping frame");
                return Ok(());
            }
            Err(e) => return Err(TilesError::Gpu(e.to_string())),
        };

        let target = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.context.create_encoder();
        {
            let _pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Clear Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });
        }
        self.context.submit(encoder);
        frame.present();

        self.frames_presented += 1;
        log::trace!(
            "frame {} presented from {:?} camera at {:?}",
            self.frames_presented,
            view.kind,
            view.position
        );
        Ok(())
    }
}
