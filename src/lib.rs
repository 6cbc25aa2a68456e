//! # phys-viewer
//!
//! View and playback core of an interactive 2D physics visualizer.
//!
//! - **Viewport (`src/viewport.rs`)**: display-space rectangle, y-up corners.
//! - **Camera (`src/camera.rs`)**: world <-> screen mapping, pan, smooth zoom.
//! - **Input (`src/input.rs`)**: pointer and wheel events turned into pan/zoom.
//! - **Frames (`src/frames.rs`)**: ordered snapshots with a wrap-around cursor.
//! - **Scene (`src/scene.rs`)**: ties the above to a [`PhysicsBackend`] and a
//!   [`SceneRenderer`], one tick per display refresh.
//!
//! The host side lives here too so both binaries can share it:
//!
//! - **Demo (`src/demo.rs`)**: [`DemoWorld`], a small gravity-and-damping backend.
//! - **Scenes (`src/scenes.rs`)**: RON frame sets, one embedded by default.
//! - **Settings (`src/settings.rs`)**: the on-disk [`ViewerConfig`].

pub mod backend;
pub mod camera;
pub mod config;
pub mod demo;
pub mod error;
pub mod frames;
pub mod input;
pub mod scene;
pub mod scenes;
pub mod settings;
pub mod viewport;

pub use backend::{PhysicsBackend, SceneRenderer};
pub use camera::{AxisGeometry, Camera, LayerVisibility, WorldRect};
pub use config::{CameraConfig, InvalidConfig, SceneConfig};
pub use demo::{Body, DemoWorld, Shape};
pub use error::ViewError;
pub use frames::{Frame, FrameHandle, FrameLibrary, PlaybackState};
pub use input::{ButtonState, Gesture, InputEvent, InputGestureHandler, Key, PointerButton};
pub use scene::{SceneController, SceneSignal, TickReport};
pub use scenes::{FrameSet, FrameSetError, FrameSpec};
pub use settings::{ConfigError, ViewerConfig};
pub use viewport::Viewport;

pub use glam::DVec2;
