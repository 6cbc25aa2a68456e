//! # Scene Controller
//!
//! Owns the physics backend, the camera and the frame library and drives one
//! iteration per display refresh:
//!
//! 1. drain input events (pointer and wheel to the gesture handler, keys here),
//! 2. advance the zoom animation,
//! 3. step the simulation,
//! 4. render.
//!
//! The animation step always sees the previous tick's simulation state.

use crate::backend::{PhysicsBackend, SceneRenderer};
use crate::camera::Camera;
use crate::config::SceneConfig;
use crate::error::ViewError;
use crate::frames::{FrameHandle, FrameLibrary};
use crate::input::{ButtonState, Gesture, InputEvent, InputGestureHandler, Key};

/// Outcome of a single event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneSignal {
    /// Pointer or wheel gesture applied to the camera.
    Gesture(Gesture),
    /// A new frame was loaded at this index.
    FrameChanged(usize),
    /// Playback was paused (`true`) or resumed.
    Paused(bool),
    ViewReset,
    QuitRequested,
    Ignored,
}

/// Summary of one [`SceneController::tick`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickReport {
    /// Index of the frame loaded during this tick, if any.
    pub frame_changed: Option<usize>,
    pub quit_requested: bool,
    /// The zoom animation moved this tick.
    pub animating: bool,
    /// The simulation was stepped (false while paused).
    pub stepped: bool,
}

pub struct SceneController<B> {
    backend: B,
    camera: Camera,
    input: InputGestureHandler,
    frames: FrameLibrary<B>,
    config: SceneConfig,
    paused: bool,
    ticks: u64,
}

impl<B: PhysicsBackend> SceneController<B> {
    pub fn new(backend: B, camera: Camera, config: SceneConfig) -> Self {
        Self {
            backend,
            camera,
            input: InputGestureHandler::new(),
            frames: FrameLibrary::new(),
            paused: config.start_paused,
            config,
            ticks: 0,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn input(&self) -> &InputGestureHandler {
        &self.input
    }

    pub fn frames(&self) -> &FrameLibrary<B> {
        &self.frames
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Number of completed ticks.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn register_frame(&mut self, frame: FrameHandle<B>) {
        self.frames.register(frame);
    }

    pub fn remove_frame(&mut self, frame: &FrameHandle<B>) -> Result<(), ViewError> {
        self.frames.remove(frame)
    }

    /// Drops all frames and empties the world.
    pub fn clear_frames(&mut self) {
        self.frames.clear();
        self.backend.clear_all_bodies();
        self.backend.clear_all_joints();
    }

    /// Resets the world and loads the frame `delta` steps away.
    pub fn change_frame(&mut self, delta: isize) -> Result<usize, ViewError> {
        self.frames.activate(delta, &mut self.backend)
    }

    /// Resets the world and loads the frame at `index`.
    pub fn jump_to_frame(&mut self, index: usize) -> Result<usize, ViewError> {
        self.frames.jump_to(index, &mut self.backend)
    }

    /// Loads the first visible frame and finalizes the backend data.
    pub fn init_frame(&mut self) -> Result<usize, ViewError> {
        let index = self.frames.initialize(&mut self.backend)?;
        log::info!("Scene initialised on frame {index}");
        Ok(index)
    }

    pub fn request_zoom(&mut self, scale: f64) {
        self.camera.request_zoom(scale);
    }

    /// Resizes the camera viewport, e.g. after the host window changed size.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), ViewError> {
        self.camera.resize(width, height)
    }

    /// Routes one event: pointer and wheel to the gesture handler, keys to
    /// playback control. Keys act on release.
    pub fn handle_event(&mut self, event: &InputEvent) -> Result<SceneSignal, ViewError> {
        let InputEvent::Key { key, state } = *event else {
            let gesture = self.input.handle(event, &mut self.camera);
            return Ok(SceneSignal::Gesture(gesture));
        };

        if state != ButtonState::Released {
            return Ok(SceneSignal::Ignored);
        }

        let delta = match key {
            Key::Left => -1,
            Key::Right => 1,
            Key::R => 0,
            Key::Space => {
                self.paused = !self.paused;
                log::debug!("Playback {}", if self.paused { "paused" } else { "resumed" });
                return Ok(SceneSignal::Paused(self.paused));
            }
            Key::Home => {
                self.camera.reset_view();
                return Ok(SceneSignal::ViewReset);
            }
            Key::Escape => return Ok(SceneSignal::QuitRequested),
        };

        self.change_frame(delta).map(SceneSignal::FrameChanged)
    }

    /// Advances the camera zoom animation by the configured animation step.
    pub fn advance_animation(&mut self) -> bool {
        let dt = self.camera.config().animation_dt;
        self.camera.tick_animation(dt)
    }

    /// Steps the backend by one physics timestep unless paused.
    pub fn physics_sim(&mut self) -> bool {
        if self.paused {
            return false;
        }
        self.step_once();
        true
    }

    /// Steps the backend by one physics timestep, paused or not.
    pub fn step_once(&mut self) {
        let dt = self.config.physics_dt();
        self.backend.step_velocity(dt);
        self.backend.step_position(dt);
    }

    pub fn render<R: SceneRenderer<B>>(&self, renderer: &mut R) {
        renderer.render(&self.camera, &self.backend);
    }

    /// Runs one full iteration. An error from any event aborts the tick
    /// before the animation, simulation and render steps.
    pub fn tick<I, R>(&mut self, events: I, renderer: &mut R) -> Result<TickReport, ViewError>
    where
        I: IntoIterator<Item = InputEvent>,
        R: SceneRenderer<B>,
    {
        let mut report = TickReport::default();

        for event in events {
            match self.handle_event(&event)? {
                SceneSignal::FrameChanged(index) => report.frame_changed = Some(index),
                SceneSignal::QuitRequested => report.quit_requested = true,
                _ => {}
            }
        }

        report.animating = self.advance_animation();
        report.stepped = self.physics_sim();
        self.render(renderer);

        self.ticks += 1;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CameraConfig;
    use crate::viewport::Viewport;

    #[derive(Default)]
    struct Steps {
        velocity: Vec<f64>,
        position: Vec<f64>,
    }

    impl PhysicsBackend for Steps {
        fn step_velocity(&mut self, dt: f64) {
            self.velocity.push(dt);
        }
        fn step_position(&mut self, dt: f64) {
            self.position.push(dt);
        }
        fn clear_all_bodies(&mut self) {}
        fn clear_all_joints(&mut self) {}
        fn init_data(&mut self) {}
    }

    struct NoRender;

    const NO_EVENTS: [InputEvent; 0] = [];

    impl<B> SceneRenderer<B> for NoRender {
        fn render(&mut self, _camera: &Camera, _backend: &B) {}
    }

    fn scene() -> SceneController<Steps> {
        let camera = Camera::new(
            Viewport::from_size(800.0, 600.0).unwrap(),
            CameraConfig::default(),
        );
        SceneController::new(Steps::default(), camera, SceneConfig::default())
    }

    fn key(key: Key) -> InputEvent {
        InputEvent::Key {
            key,
            state: ButtonState::Released,
        }
    }

    #[test]
    fn physics_uses_fixed_timestep() {
        let mut scene = scene();
        scene.tick(NO_EVENTS, &mut NoRender).unwrap();
        scene.tick(NO_EVENTS, &mut NoRender).unwrap();

        assert_eq!(scene.backend().velocity, [1.0 / 120.0; 2]);
        assert_eq!(scene.backend().position, [1.0 / 120.0; 2]);
        assert_eq!(scene.ticks(), 2);
    }

    #[test]
    fn space_pauses_simulation_but_not_animation() {
        let mut scene = scene();
        let report = scene.tick([key(Key::Space)], &mut NoRender).unwrap();

        assert!(scene.is_paused());
        assert!(!report.stepped);
        assert!(report.animating);
        assert!(scene.backend().velocity.is_empty());
    }

    #[test]
    fn navigation_keys_on_empty_library_report_no_frames() {
        let mut scene = scene();
        for k in [Key::Left, Key::Right, Key::R] {
            assert_eq!(scene.handle_event(&key(k)), Err(ViewError::NoFrames));
        }

        let result = scene.tick([key(Key::Right)], &mut NoRender);
        assert_eq!(result.map(|_| ()), Err(ViewError::NoFrames));
        assert!(scene.backend().velocity.is_empty());
        assert_eq!(scene.ticks(), 0);
    }

    #[test]
    fn step_once_ignores_pause() {
        let mut scene = scene();
        scene.set_paused(true);
        assert!(!scene.physics_sim());
        scene.step_once();
        assert_eq!(scene.backend().velocity.len(), 1);
        assert!(scene.is_paused());
    }

    #[test]
    fn escape_requests_quit() {
        let mut scene = scene();
        let report = scene.tick([key(Key::Escape)], &mut NoRender).unwrap();
        assert!(report.quit_requested);
    }

    #[test]
    fn home_resets_the_view() {
        let mut scene = scene();
        scene.camera_mut().pan_by(glam::DVec2::new(30.0, 30.0));
        scene.request_zoom(200.0);

        assert_eq!(scene.handle_event(&key(Key::Home)), Ok(SceneSignal::ViewReset));
        assert_eq!(scene.camera().pan_offset(), glam::DVec2::ZERO);
        assert_eq!(scene.camera().target_scale(), 53.0);
    }
}
