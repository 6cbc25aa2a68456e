//! Frame sets for the demo backend, stored as RON.

use crate::demo::{Body, DemoWorld, Shape};
use crate::frames::{Frame, FrameHandle};
use glam::DVec2;
use rust_embed::RustEmbed;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::rc::Rc;
use thiserror::Error;

/// Embeds all assets from the assets/ directory into the binaries.
/// In debug mode, assets are loaded from the filesystem.
#[derive(RustEmbed)]
#[folder = "assets/"]
pub struct Assets;

/// Name of the embedded default frame set.
pub const BUILTIN_FRAMES: &str = "frames.ron";

#[derive(Error, Debug)]
pub enum FrameSetError {
    #[error("{0} not found in embedded assets")]
    NotEmbedded(&'static str),
    #[error("failed to read frame set: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid UTF-8 in frame set: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    #[error("failed to parse frame set: {0}")]
    Parse(#[from] ron::de::SpannedError),
    #[error("frame set contains no frames")]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSet {
    pub frames: Vec<FrameSpec>,
}

impl FrameSet {
    pub fn parse(source: &str) -> Result<Self, FrameSetError> {
        let set: FrameSet = ron::from_str(source)?;
        if set.frames.is_empty() {
            return Err(FrameSetError::Empty);
        }
        Ok(set)
    }

    /// Wraps every frame in a shared handle, in file order.
    pub fn into_handles(self) -> Vec<FrameHandle<DemoWorld>> {
        self.frames
            .into_iter()
            .map(|f| Rc::new(f) as FrameHandle<DemoWorld>)
            .collect()
    }
}

fn default_gravity() -> [f64; 2] {
    [0.0, -9.8]
}

fn default_density() -> f64 {
    1.0
}

/// One snapshot: everything needed to rebuild the world from empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSpec {
    pub name: String,
    #[serde(default = "default_gravity")]
    pub gravity: [f64; 2],
    #[serde(default)]
    pub ground: Option<f64>,
    #[serde(default)]
    pub bodies: Vec<BodySpec>,
    #[serde(default)]
    pub joints: Vec<JointSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodySpec {
    pub shape: ShapeSpec,
    pub position: [f64; 2],
    #[serde(default)]
    pub velocity: [f64; 2],
    #[serde(default)]
    pub angle: f64,
    #[serde(default)]
    pub angular_velocity: f64,
    /// Zero makes the body static.
    #[serde(default = "default_density")]
    pub density: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShapeSpec {
    Circle { radius: f64 },
    Rect { width: f64, height: f64 },
    Polygon { vertices: Vec<[f64; 2]> },
}

/// Distance joint between two bodies of the same frame, by index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointSpec {
    pub a: usize,
    pub b: usize,
}

impl From<&ShapeSpec> for Shape {
    fn from(spec: &ShapeSpec) -> Self {
        match spec {
            ShapeSpec::Circle { radius } => Shape::Circle { radius: *radius },
            ShapeSpec::Rect { width, height } => Shape::Rect {
                half_extents: DVec2::new(width * 0.5, height * 0.5),
            },
            ShapeSpec::Polygon { vertices } => Shape::Polygon {
                vertices: vertices.iter().copied().map(DVec2::from).collect(),
            },
        }
    }
}

impl From<&BodySpec> for Body {
    fn from(spec: &BodySpec) -> Self {
        let mut body = Body::new(Shape::from(&spec.shape), DVec2::from(spec.position));
        body.velocity = DVec2::from(spec.velocity);
        body.angle = spec.angle;
        body.angular_velocity = spec.angular_velocity;
        body.density = spec.density;
        body
    }
}

impl Frame<DemoWorld> for FrameSpec {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self, world: &mut DemoWorld) {
        world.gravity = DVec2::from(self.gravity);
        world.ground = self.ground;
        for body in &self.bodies {
            world.add_body(Body::from(body));
        }
        for joint in &self.joints {
            if world.add_joint(joint.a, joint.b).is_none() {
                log::warn!(
                    "Frame '{}': joint {} -> {} references a missing body",
                    self.name,
                    joint.a,
                    joint.b
                );
            }
        }
    }
}

/// Loads the frame set embedded in the binary.
pub fn load_builtin_frames() -> Result<FrameSet, FrameSetError> {
    let file = Assets::get(BUILTIN_FRAMES).ok_or(FrameSetError::NotEmbedded(BUILTIN_FRAMES))?;
    let source = std::str::from_utf8(&file.data)?;
    FrameSet::parse(source)
}

/// Loads a frame set from disk.
pub fn load_frames_file(path: &Path) -> Result<FrameSet, FrameSetError> {
    let source = std::fs::read_to_string(path)?;
    FrameSet::parse(&source)
}

/// Loads `path` when given, the embedded set otherwise.
pub fn load_frames(path: Option<&Path>) -> Result<FrameSet, FrameSetError> {
    match path {
        Some(path) => load_frames_file(path),
        None => load_builtin_frames(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::PhysicsBackend;

    fn load_into(frame: &dyn Frame<DemoWorld>, world: &mut DemoWorld) {
        world.clear_all_bodies();
        world.clear_all_joints();
        frame.load(world);
        world.init_data();
    }

    const PENDULUM: &str = r#"(
        frames: [
            (
                name: "pendulum",
                ground: Some(-5.0),
                bodies: [
                    (shape: Circle(radius: 0.2), position: (0.0, 0.0), density: 0.0),
                    (shape: Rect(width: 1.0, height: 0.5), position: (2.0, 0.0)),
                ],
                joints: [(a: 0, b: 1), (a: 0, b: 9)],
            ),
        ],
    )"#;

    #[test]
    fn builtin_frames_parse() {
        let set = load_builtin_frames().unwrap();
        assert!(!set.frames.is_empty());
        assert!(set.frames.iter().all(|f| !f.name.is_empty()));
    }

    #[test]
    fn defaults_fill_missing_fields() {
        let set = FrameSet::parse(PENDULUM).unwrap();
        let frame = &set.frames[0];
        assert_eq!(frame.gravity, [0.0, -9.8]);
        assert_eq!(frame.bodies[1].density, 1.0);
        assert_eq!(frame.bodies[1].velocity, [0.0, 0.0]);
    }

    #[test]
    fn loading_skips_dangling_joints() {
        let set = FrameSet::parse(PENDULUM).unwrap();
        let mut world = DemoWorld::new();
        load_into(&set.frames[0], &mut world);

        assert_eq!(world.bodies().len(), 2);
        assert_eq!(world.joints().len(), 1);
        assert_eq!(world.ground, Some(-5.0));
        assert!(world.is_ready());
        assert_eq!(world.bodies()[0].inv_mass, 0.0);
        assert!((world.bodies()[1].inv_mass - 2.0).abs() < 1e-12);
    }

    #[test]
    fn empty_set_is_rejected() {
        assert!(matches!(
            FrameSet::parse("(frames: [])"),
            Err(FrameSetError::Empty)
        ));
        assert!(matches!(
            FrameSet::parse("(frames: [(nom: 1)])"),
            Err(FrameSetError::Parse(_))
        ));
    }
}
