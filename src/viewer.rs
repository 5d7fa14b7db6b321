//! Standalone tile viewer window backed by winit.
//!
//! ```no_run
//! # use tileframe::Viewer;
//! Viewer::builder()
//!     .with_location("./3dtiles2/tileset.json")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::{sync::Arc, time::Instant};

use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::{
    camera::Resolution,
    error::TilesError,
    gpu::{RenderContext, SurfaceRenderer},
    input::{InputEvent, MouseButton},
    options::Options,
    scene::SceneRenderer,
    session::Session,
    tiles::manifest::{ManifestProvider, DEFAULT_TILESET},
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    location: String,
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            location: DEFAULT_TILESET.into(),
            options: None,
            title: "Tileframe".into(),
        }
    }

    /// Set the tileset manifest path or URL.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            location: self.location,
            options: self.options.unwrap_or_default(),
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window that streams and frames a tileset.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    location: String,
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`TilesError::InvalidOptions`] for bad options and
    /// [`TilesError::Viewer`] if the event loop cannot start.
    pub fn run(self) -> Result<(), TilesError> {
        self.options.validate()?;

        let event_loop =
            EventLoop::new().map_err(|e| TilesError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            session: None,
            renderer: None,
            last_frame_time: Instant::now(),
            location: self.location,
            options: Some(self.options),
            title: self.title,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| TilesError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

struct ViewerApp {
    window: Option<Arc<Window>>,
    session: Option<Session<ManifestProvider>>,
    renderer: Option<SurfaceRenderer>,
    last_frame_time: Instant,
    location: String,
    options: Option<Options>,
    title: String,
}

fn viewport_size(inner: winit::dpi::PhysicalSize<u32>) -> Resolution {
    Resolution::new(inner.width, inner.height)
}

/// Wheel delta in the browser convention (positive = zoom out).
fn scroll_delta(delta: MouseScrollDelta) -> f32 {
    #[allow(clippy::cast_possible_truncation)]
    let up = match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.01,
    };
    -up
}

impl ViewerApp {
    fn request_redraw(&self) {
        if let Some(w) = &self.window {
            w.request_redraw();
        }
    }

    fn redraw(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame_time).as_secs_f32();
        self.last_frame_time = now;

        let (Some(session), Some(renderer)) =
            (&mut self.session, &mut self.renderer)
        else {
            return;
        };
        let frame = session.tick(dt);
        if let Err(e) = session.render(&frame, renderer) {
            log::error!("render error: {e}");
        }
        self.request_redraw();
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 800));
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let resolution = viewport_size(window.inner_size());
        let context = match pollster::block_on(RenderContext::new(
            window.clone(),
            (resolution.width, resolution.height),
        )) {
            Ok(c) => c,
            Err(e) => {
                log::error!("Failed to initialize GPU: {e}");
                event_loop.exit();
                return;
            }
        };

        let options = self.options.take().unwrap_or_default();
        let mut renderer = SurfaceRenderer::new(context, &options.display);
        let provider = ManifestProvider::open(&self.location);
        let session = match Session::new(provider, options, resolution) {
            Ok(s) => s,
            Err(e) => {
                log::error!("Failed to start session: {e}");
                event_loop.exit();
                return;
            }
        };
        session.attach(&mut renderer);

        window.request_redraw();
        self.window = Some(window);
        self.session = Some(session);
        self.renderer = Some(renderer);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        let Some(session) = &mut self.session else {
            return;
        };

        match event {
            WindowEvent::Resized(size) => {
                let resolution = viewport_size(size);
                session.resize(resolution);
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(resolution);
                }
            }

            WindowEvent::RedrawRequested => self.redraw(),

            WindowEvent::MouseInput { button, state, .. } => {
                let Some(button) = MouseButton::from_winit(button) else {
                    return;
                };
                let _ = session.handle_input(InputEvent::MouseButton {
                    button,
                    pressed: state == ElementState::Pressed,
                });
            }

            WindowEvent::CursorMoved { position, .. } => {
                #[allow(clippy::cast_possible_truncation)]
                let _ = session.handle_input(InputEvent::CursorMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                });
                self.request_redraw();
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let _ = session.handle_input(InputEvent::Scroll {
                    delta: scroll_delta(delta),
                });
                self.request_redraw();
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                let _ = session.handle_input(InputEvent::ModifiersChanged {
                    shift: modifiers.state().shift_key(),
                });
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                use winit::keyboard::PhysicalKey;
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let key_str = format!("{code:?}");
                if !session.handle_key(&key_str) {
                    log::trace!("unbound key {key_str}");
                }
            }

            _ => (),
        }
    }
}
