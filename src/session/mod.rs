//! The viewing session: one explicit context object owned by the frame loop.
//!
//! A [`Session`] owns both cameras, the orbit controls, the options and the
//! tile provider, and is passed by `&mut` to every handler. Per frame the
//! caller runs [`Session::tick`] and then [`Session::render`]:
//!
//! 1. drain tile load events (auto-framing happens here),
//! 2. orbit damping,
//! 3. camera-mode resolution (provider re-binding on projection toggle),
//! 4. orthographic/perspective sync,
//! 5. provider params + update with the final camera,
//!
//! after which `render` performs the draw side effect.

/// Session commands.
pub mod command;
/// Per-frame pipeline output.
pub mod frame;

use std::sync::mpsc::{self, Receiver};

use glam::Vec3;

pub use self::command::Command;
pub use self::frame::Frame;
use crate::camera::framing::{apply_framing, plan_framing};
use crate::camera::sync::sync_cameras;
use crate::camera::zoom::dolly_zoom;
use crate::camera::{
    CameraKind, CameraRig, OrbitControls, Resolution, ZoomOutcome,
};
use crate::error::TilesError;
use crate::input::{InputEvent, InputProcessor};
use crate::options::Options;
use crate::scene::SceneRenderer;
use crate::tiles::{TileEvent, TileParams, TileStreamProvider};

/// Camera framing and zoom controller bound to one tile provider.
pub struct Session<P: TileStreamProvider> {
    options: Options,
    rig: CameraRig,
    controls: OrbitControls,
    provider: P,
    events: Receiver<TileEvent>,
    input: InputProcessor,
    resolution: Resolution,
    pending_projection: Option<CameraKind>,
    content_offset: Vec3,
    frame_index: u64,
}

impl<P: TileStreamProvider> Session<P> {
    /// Create a session, subscribe to `provider`'s events and bind the
    /// perspective camera.
    ///
    /// If `options.display.orthographic` is set the switch happens on the
    /// first tick.
    ///
    /// # Errors
    ///
    /// Returns [`TilesError::InvalidOptions`] if `options` fail validation;
    /// the provider is left unsubscribed.
    pub fn new(
        mut provider: P,
        options: Options,
        resolution: Resolution,
    ) -> Result<Self, TilesError> {
        options.validate()?;
        let (tx, rx) = mpsc::channel();
        provider.subscribe(tx);

        let rig = CameraRig::new(&options.camera, resolution);
        let controls = OrbitControls::new(&options.controls);
        let pending_projection = options
            .display
            .orthographic
            .then_some(CameraKind::Orthographic);

        let mut session = Self {
            options,
            rig,
            controls,
            provider,
            events: rx,
            input: InputProcessor::new(),
            resolution,
            pending_projection,
            content_offset: Vec3::ZERO,
            frame_index: 0,
        };
        let _ = session.controls.update(session.rig.active_pose_mut());
        sync_cameras(&mut session.rig, session.controls.target);

        let active = session.rig.active();
        session.provider.bind_camera(active);
        session.provider.set_resolution(active, resolution);
        Ok(session)
    }

    // ── Accessors ──────────────────────────────────────────────────────

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Both cameras.
    #[must_use]
    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    /// Orbit controls, including the orbit target.
    #[must_use]
    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    /// The tile provider.
    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Mutable access to the tile provider.
    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    /// Camera currently bound to the provider.
    #[must_use]
    pub fn active_camera(&self) -> CameraKind {
        self.rig.active()
    }

    /// Current viewport.
    #[must_use]
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Translation applied to the content root by auto-framing.
    #[must_use]
    pub fn content_offset(&self) -> Vec3 {
        self.content_offset
    }

    /// Replace the options.
    ///
    /// # Errors
    ///
    /// Returns [`TilesError::InvalidOptions`] and keeps the old options if
    /// `options` fail validation.
    pub fn set_options(&mut self, options: Options) -> Result<(), TilesError> {
        options.validate()?;
        self.controls.apply_options(&options.controls);
        self.rig.perspective.fovy = options.camera.fovy;
        self.rig.perspective.update_projection();
        self.options = options;
        Ok(())
    }

    // ── Input ──────────────────────────────────────────────────────────

    /// Feed a raw input event. Returns `true` when the event was consumed;
    /// wheel events are always consumed so they never scroll anything else.
    ///
    /// With `zoom.invert_wheel` set, wheel deltas are negated first.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        let is_scroll = matches!(event, InputEvent::Scroll { .. });
        let event = match event {
            InputEvent::Scroll { delta } if self.options.zoom.invert_wheel => {
                InputEvent::Scroll { delta: -delta }
            }
            other => other,
        };
        match self.input.handle_event(event) {
            Some(cmd) => {
                self.execute(cmd);
                true
            }
            None => is_scroll,
        }
    }

    /// Run the action bound to `key`, if any. Returns `true` when bound.
    pub fn handle_key(&mut self, key: &str) -> bool {
        match self.options.keybindings.lookup(key) {
            Some(action) => {
                self.execute(action.to_command());
                true
            }
            None => false,
        }
    }

    /// Perform a command.
    pub fn execute(&mut self, command: Command) {
        match command {
            Command::Zoom { delta } => {
                let _ = self.zoom(delta);
            }
            Command::Rotate { delta } => self.controls.rotate(delta),
            Command::Pan { delta } => {
                self.controls.pan(delta, self.rig.active_pose());
            }
            Command::ToggleProjection => self.toggle_projection(),
            Command::SetProjection(kind) => self.set_projection(kind),
            Command::ToggleDebug => {
                let debug = &mut self.options.debug;
                debug.enable_debug = !debug.enable_debug;
                log::info!("debug overlay: {}", debug.enable_debug);
            }
            Command::FrameContent => {
                let _ = self.frame_content();
            }
        }
    }

    /// Dolly-zoom the live camera. See [`dolly_zoom`].
    pub fn zoom(&mut self, delta: f32) -> Option<ZoomOutcome> {
        dolly_zoom(
            &mut self.rig,
            &mut self.controls.target,
            delta,
            &self.options.zoom,
        )
    }

    // ── Tile events ────────────────────────────────────────────────────

    /// React to a provider lifecycle event.
    pub fn handle_tile_event(&mut self, event: TileEvent) {
        match event {
            TileEvent::TileSetLoaded => {
                log::info!("Tileset loaded");
                let _ = self.frame_content();
            }
            TileEvent::ModelLoaded => log::info!("Model loaded"),
            TileEvent::LoadError(diagnostic) => {
                log::error!("Load error: {diagnostic}");
            }
        }
    }

    /// Re-center the content on the origin and frame it. Returns `false`
    /// (and changes nothing) when the provider has no bounding sphere.
    pub fn frame_content(&mut self) -> bool {
        let sphere = self.provider.bounding_sphere();
        let Some(plan) =
            plan_framing(sphere, &self.rig.perspective, &self.options.framing)
        else {
            log::debug!("no bounding sphere yet, skipping auto-framing");
            return false;
        };
        log::info!("Bounding sphere: {sphere:?}");

        // The sphere is in world space, so its center already includes the
        // current offset.
        self.content_offset += plan.content_offset;
        self.provider.set_root_translation(self.content_offset);

        apply_framing(&plan, &mut self.rig, &mut self.controls);
        sync_cameras(&mut self.rig, self.controls.target);
        true
    }

    // ── Projection ─────────────────────────────────────────────────────

    /// Ask for `kind` to become the live camera on the next tick.
    pub fn set_projection(&mut self, kind: CameraKind) {
        self.pending_projection = Some(kind);
    }

    /// Ask for the other projection on the next tick.
    pub fn toggle_projection(&mut self) {
        let current = self.pending_projection.unwrap_or(self.rig.active());
        self.pending_projection = Some(current.toggled());
    }

    fn resolve_projection(&mut self) {
        let Some(kind) = self.pending_projection.take() else {
            return;
        };
        let previous = self.rig.active();
        if kind == previous {
            return;
        }

        sync_cameras(&mut self.rig, self.controls.target);
        self.provider.unbind_camera(previous);
        self.rig.set_active(kind);
        self.provider.bind_camera(kind);
        self.provider.set_resolution(kind, self.resolution);
        log::info!("camera mode: {previous:?} -> {kind:?}");
    }

    // ── Frame loop ─────────────────────────────────────────────────────

    /// The viewport changed size. The renderer is resized separately by
    /// whoever owns it.
    pub fn resize(&mut self, resolution: Resolution) {
        self.resolution = resolution;
        self.rig.perspective.aspect = resolution.aspect();
        self.rig.perspective.update_projection();
        sync_cameras(&mut self.rig, self.controls.target);
        self.provider.set_resolution(self.rig.active(), resolution);
    }

    /// Run the per-frame pipeline and return what the draw step needs.
    pub fn tick(&mut self, dt: f32) -> Frame {
        self.frame_index += 1;

        while let Ok(event) = self.events.try_recv() {
            self.handle_tile_event(event);
        }

        let camera_moved = self.controls.update(self.rig.active_pose_mut());
        self.resolve_projection();
        sync_cameras(&mut self.rig, self.controls.target);

        let view = self.rig.view(self.resolution);
        self.provider.set_params(&TileParams::new(
            &self.options.tiles,
            &self.options.debug,
        ));
        self.provider.update(&view);

        Frame {
            index: self.frame_index,
            dt,
            view,
            content_offset: self.content_offset,
            camera_moved,
        }
    }

    /// Add the provider's content group to `renderer`'s scene.
    pub fn attach(&self, renderer: &mut dyn SceneRenderer) {
        renderer.attach(self.provider.root_group());
    }

    /// Draw `frame`.
    ///
    /// # Errors
    ///
    /// Propagates the renderer's draw error.
    pub fn render(
        &self,
        frame: &Frame,
        renderer: &mut dyn SceneRenderer,
    ) -> Result<(), TilesError> {
        renderer.set_group_translation(
            self.provider.root_group(),
            frame.content_offset,
        );
        renderer.draw(&frame.view)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::Sender;

    use glam::Vec2;

    use super::*;
    use crate::camera::CameraView;
    use crate::options::FramingMode;
    use crate::tiles::{BoundingSphere, GroupId};

    #[derive(Default)]
    struct RecordingProvider {
        bound: Vec<CameraKind>,
        max_bound: usize,
        resolutions: Vec<(CameraKind, Resolution)>,
        sphere: Option<BoundingSphere>,
        translation: Vec3,
        sender: Option<Sender<TileEvent>>,
        updates: Vec<CameraKind>,
        params: Option<TileParams>,
    }

    impl TileStreamProvider for RecordingProvider {
        fn bind_camera(&mut self, camera: CameraKind) {
            self.bound.push(camera);
            self.max_bound = self.max_bound.max(self.bound.len());
        }

        fn unbind_camera(&mut self, camera: CameraKind) {
            self.bound.retain(|c| *c != camera);
        }

        fn set_resolution(&mut self, camera: CameraKind, resolution: Resolution) {
            self.resolutions.push((camera, resolution));
        }

        fn bounding_sphere(&self) -> Option<BoundingSphere> {
            self.sphere.map(|s| {
                BoundingSphere::new(s.center + self.translation, s.radius)
            })
        }

        fn subscribe(&mut self, sender: Sender<TileEvent>) {
            self.sender = Some(sender);
        }

        fn set_params(&mut self, params: &TileParams) {
            self.params = Some(params.clone());
        }

        fn root_group(&self) -> GroupId {
            GroupId(7)
        }

        fn set_root_translation(&mut self, translation: Vec3) {
            self.translation = translation;
        }

        fn update(&mut self, view: &CameraView) {
            self.updates.push(view.kind);
        }
    }

    #[derive(Default)]
    struct RecordingRenderer {
        attached: Vec<GroupId>,
        translations: Vec<(GroupId, Vec3)>,
        draws: Vec<CameraKind>,
    }

    impl SceneRenderer for RecordingRenderer {
        fn attach(&mut self, group: GroupId) {
            self.attached.push(group);
        }

        fn detach(&mut self, group: GroupId) {
            self.attached.retain(|g| *g != group);
        }

        fn set_group_translation(&mut self, group: GroupId, translation: Vec3) {
            self.translations.push((group, translation));
        }

        fn resize(&mut self, _resolution: Resolution) {}

        fn draw(&mut self, view: &CameraView) -> Result<(), TilesError> {
            self.draws.push(view.kind);
            Ok(())
        }
    }

    fn session() -> Session<RecordingProvider> {
        Session::new(
            RecordingProvider::default(),
            Options::default(),
            Resolution::new(800, 600),
        )
        .unwrap()
    }

    fn send(session: &Session<RecordingProvider>, event: TileEvent) {
        session
            .provider()
            .sender
            .as_ref()
            .unwrap()
            .send(event)
            .unwrap();
    }

    #[test]
    fn new_binds_perspective_with_resolution() {
        let s = session();
        assert_eq!(s.provider().bound, vec![CameraKind::Perspective]);
        assert_eq!(
            s.provider().resolutions,
            vec![(CameraKind::Perspective, Resolution::new(800, 600))]
        );
    }

    #[test]
    fn toggle_rebinds_exactly_one_camera() {
        let mut s = session();
        s.execute(Command::ToggleProjection);
        let _ = s.tick(0.016);

        assert_eq!(s.active_camera(), CameraKind::Orthographic);
        assert_eq!(s.provider().bound, vec![CameraKind::Orthographic]);
        assert_eq!(s.provider().max_bound, 1);
        assert_eq!(
            s.provider().resolutions.last(),
            Some(&(CameraKind::Orthographic, Resolution::new(800, 600)))
        );
        assert_eq!(s.provider().updates.last(), Some(&CameraKind::Orthographic));

        s.toggle_projection();
        let _ = s.tick(0.016);
        assert_eq!(s.provider().bound, vec![CameraKind::Perspective]);
        assert_eq!(s.provider().max_bound, 1);
    }

    #[test]
    fn double_toggle_before_tick_is_a_no_op() {
        let mut s = session();
        s.toggle_projection();
        s.toggle_projection();
        let _ = s.tick(0.016);
        assert_eq!(s.active_camera(), CameraKind::Perspective);
        assert_eq!(s.provider().resolutions.len(), 1);
    }

    #[test]
    fn orthographic_start_switches_on_first_tick() {
        let mut options = Options::default();
        options.display.orthographic = true;
        let mut s = Session::new(
            RecordingProvider::default(),
            options,
            Resolution::new(800, 600),
        )
        .unwrap();
        let frame = s.tick(0.016);
        assert_eq!(frame.view.kind, CameraKind::Orthographic);
        assert_eq!(s.provider().bound, vec![CameraKind::Orthographic]);
    }

    #[test]
    fn invalid_options_are_rejected_at_construction() {
        let mut options = Options::default();
        options.framing.mode = FramingMode::FieldOfView;
        options.framing.coverage = 0.0;
        let result = Session::new(
            RecordingProvider::default(),
            options,
            Resolution::new(800, 600),
        );
        assert!(matches!(result, Err(TilesError::InvalidOptions(_))));
    }

    #[test]
    fn load_without_sphere_leaves_camera_alone() {
        let mut s = session();
        let _ = s.tick(0.016);
        let position = s.rig().perspective.pose.position;
        let target = s.controls().target;

        send(&s, TileEvent::TileSetLoaded);
        let _ = s.tick(0.016);

        assert!((s.rig().perspective.pose.position - position).length() < 1e-5);
        assert_eq!(s.controls().target, target);
        assert_eq!(s.content_offset(), Vec3::ZERO);
    }

    #[test]
    fn load_frames_and_recenters_content() {
        let mut s = session();
        s.provider_mut().sphere =
            Some(BoundingSphere::new(Vec3::new(100.0, 0.0, 0.0), 5.0));

        send(&s, TileEvent::TileSetLoaded);
        let frame = s.tick(0.016);

        assert_eq!(frame.content_offset, Vec3::new(-100.0, 0.0, 0.0));
        assert_eq!(s.provider().translation, Vec3::new(-100.0, 0.0, 0.0));
        assert_eq!(s.controls().target, Vec3::ZERO);
        let eye = s.rig().perspective.pose.position;
        assert!((eye - Vec3::splat(10.0)).length() < 1e-3);
    }

    #[test]
    fn reframing_keeps_content_centered() {
        let mut s = session();
        s.provider_mut().sphere =
            Some(BoundingSphere::new(Vec3::new(3.0, 4.0, 5.0), 1.0));
        assert!(s.frame_content());
        assert!(s.handle_key("KeyF"));
        assert_eq!(s.content_offset(), Vec3::new(-3.0, -4.0, -5.0));
    }

    #[test]
    fn load_error_is_not_fatal() {
        let mut s = session();
        let before = s.rig().perspective.pose;
        send(&s, TileEvent::LoadError("404 tileset.json".into()));
        send(&s, TileEvent::ModelLoaded);
        let frame = s.tick(0.016);
        assert_eq!(frame.index, 1);
        assert!((s.rig().perspective.pose.position - before.position).length() < 1e-5);
    }

    #[test]
    fn events_from_another_thread_are_handled_next_tick() {
        let mut s = session();
        s.provider_mut().sphere = Some(BoundingSphere::new(Vec3::ZERO, 2.0));
        let tx = s.provider().sender.clone().unwrap();
        std::thread::spawn(move || tx.send(TileEvent::TileSetLoaded).unwrap())
            .join()
            .unwrap();
        let _ = s.tick(0.016);
        let eye = s.rig().perspective.pose.position;
        assert!((eye - Vec3::splat(4.0)).length() < 1e-3);
    }

    #[test]
    fn wheel_zoom_target_survives_tick() {
        let mut s = session();
        s.provider_mut().sphere = Some(BoundingSphere::new(Vec3::ZERO, 5.0));
        assert!(s.frame_content());
        let start = s.rig().perspective.pose.position;
        let forward = s.rig().perspective.pose.forward();
        let distance = start.length();

        assert!(s.handle_input(InputEvent::Scroll { delta: -1.0 }));
        let expected_eye = start + forward * (distance * 0.02);
        let expected_target = expected_eye + forward * (distance * 0.5);
        assert!((s.controls().target - expected_target).length() < 1e-3);

        let _ = s.tick(0.016);
        assert!((s.rig().perspective.pose.position - expected_eye).length() < 1e-3);
        assert!((s.controls().target - expected_target).length() < 1e-3);
        assert_eq!(s.rig().perspective.znear, 0.001);
    }

    #[test]
    fn inverted_wheel_backs_away_on_scroll_up() {
        let mut s = session();
        let mut options = Options::default();
        options.zoom.invert_wheel = true;
        s.set_options(options).unwrap();
        let before = s.rig().perspective.pose.position.length();

        assert!(s.handle_input(InputEvent::Scroll { delta: -1.0 }));
        assert!(s.rig().perspective.pose.position.length() > before);

        // Programmatic zoom commands keep their own sign.
        let outcome = s.zoom(-1.0).unwrap();
        assert!(outcome.amount > 0.0);
    }

    #[test]
    fn tick_pushes_tile_params() {
        let mut s = session();
        s.execute(Command::ToggleDebug);
        let _ = s.tick(0.016);
        let params = s.provider().params.clone().unwrap();
        assert_eq!(params.error_target, 6.0);
        assert_eq!(params.max_depth, 15);
        assert!(!params.debug.enable_debug);
    }

    #[test]
    fn tick_keeps_orthographic_in_sync() {
        let mut s = session();
        s.execute(Command::Rotate {
            delta: Vec2::new(40.0, 10.0),
        });
        let _ = s.tick(0.016);
        let rig = s.rig();
        assert!(
            (rig.orthographic.pose.position - rig.perspective.pose.position)
                .length()
                < 1e-6
        );
        let scale =
            rig.perspective.pose.position.distance(s.controls().target) / 2.0;
        assert!((rig.orthographic.top - rig.orthographic.bottom - 2.0 * scale).abs() < 1e-4);
    }

    #[test]
    fn resize_updates_aspect_and_provider() {
        let mut s = session();
        s.resize(Resolution::new(1000, 500));
        assert_eq!(s.rig().perspective.aspect, 2.0);
        assert_eq!(
            s.provider().resolutions.last(),
            Some(&(CameraKind::Perspective, Resolution::new(1000, 500)))
        );
        assert!((s.rig().orthographic.right + s.rig().orthographic.left).abs() < 1e-6);
    }

    #[test]
    fn render_applies_offset_then_draws() {
        let mut s = session();
        let mut renderer = RecordingRenderer::default();
        s.attach(&mut renderer);
        s.provider_mut().sphere =
            Some(BoundingSphere::new(Vec3::new(0.0, 9.0, 0.0), 1.0));
        assert!(s.frame_content());
        let frame = s.tick(0.016);
        s.render(&frame, &mut renderer).unwrap();

        assert_eq!(renderer.attached, vec![GroupId(7)]);
        assert_eq!(
            renderer.translations,
            vec![(GroupId(7), Vec3::new(0.0, -9.0, 0.0))]
        );
        assert_eq!(renderer.draws, vec![CameraKind::Perspective]);
    }

    #[test]
    fn invalid_options_are_rejected() {
        let mut s = session();
        let mut bad = Options::default();
        bad.camera.znear = 0.0;
        assert!(s.set_options(bad).is_err());
        assert_eq!(s.options(), &Options::default());
    }
}
