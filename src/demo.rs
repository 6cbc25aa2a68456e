//! Demonstration physics backend.
//!
//! Point-mass bodies under gravity with linear and angular damping, an
//! optional ground plane they bounce off, and distance joints that are
//! stored and drawn but not solved. Good enough to watch frames play back,
//! not a physics engine.

use crate::backend::PhysicsBackend;
use glam::DVec2;

/// Collision-free body shape, in body-local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle { radius: f64 },
    Rect { half_extents: DVec2 },
    Polygon { vertices: Vec<DVec2> },
}

impl Shape {
    /// Area used to derive inverse mass from density.
    fn area(&self) -> f64 {
        match self {
            Shape::Circle { radius } => std::f64::consts::PI * radius * radius,
            Shape::Rect { half_extents } => 4.0 * half_extents.x * half_extents.y,
            Shape::Polygon { vertices } => {
                let n = vertices.len();
                let twice: f64 = (0..n)
                    .map(|i| vertices[i].perp_dot(vertices[(i + 1) % n]))
                    .sum();
                (twice * 0.5).abs()
            }
        }
    }

    /// Local-space outline for drawing and bounds (empty for circles).
    pub fn outline(&self) -> Vec<DVec2> {
        match self {
            Shape::Circle { .. } => Vec::new(),
            Shape::Rect { half_extents: h } => vec![
                DVec2::new(-h.x, -h.y),
                DVec2::new(h.x, -h.y),
                DVec2::new(h.x, h.y),
                DVec2::new(-h.x, h.y),
            ],
            Shape::Polygon { vertices } => vertices.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub shape: Shape,
    pub position: DVec2,
    pub velocity: DVec2,
    pub angle: f64,
    pub angular_velocity: f64,
    /// Mass per unit area; zero marks a static body.
    pub density: f64,
    /// Derived in [`PhysicsBackend::init_data`].
    pub inv_mass: f64,
}

impl Body {
    pub fn new(shape: Shape, position: DVec2) -> Self {
        Self {
            shape,
            position,
            velocity: DVec2::ZERO,
            angle: 0.0,
            angular_velocity: 0.0,
            density: 1.0,
            inv_mass: 0.0,
        }
    }

    pub fn is_static(&self) -> bool {
        self.density <= 0.0
    }

    /// World-space outline vertices.
    pub fn world_outline(&self) -> Vec<DVec2> {
        let rot = DVec2::from_angle(self.angle);
        self.shape
            .outline()
            .into_iter()
            .map(|v| self.position + rot.rotate(v))
            .collect()
    }

    /// World-space bounding box as `(min, max)`.
    pub fn aabb(&self) -> (DVec2, DVec2) {
        if let Shape::Circle { radius } = self.shape {
            let r = DVec2::splat(radius);
            return (self.position - r, self.position + r);
        }
        self.world_outline()
            .into_iter()
            .fold((DVec2::splat(f64::INFINITY), DVec2::splat(f64::NEG_INFINITY)), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            })
    }

    /// Lowest world-space y the body reaches.
    fn bottom(&self) -> f64 {
        self.aabb().0.y
    }
}

/// Distance joint between two bodies, by index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Joint {
    pub body_a: usize,
    pub body_b: usize,
}

/// Point where a body touched the ground during the last step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub point: DVec2,
    pub body: usize,
}

#[derive(Debug, Clone)]
pub struct DemoWorld {
    pub gravity: DVec2,
    pub linear_damping: f64,
    pub angular_damping: f64,
    /// Height of an infinite ground line, if any.
    pub ground: Option<f64>,
    /// Fraction of normal speed kept after bouncing on the ground.
    pub bounce: f64,
    bodies: Vec<Body>,
    joints: Vec<Joint>,
    contacts: Vec<Contact>,
    ready: bool,
}

impl Default for DemoWorld {
    fn default() -> Self {
        Self {
            gravity: DVec2::new(0.0, -9.8),
            linear_damping: 0.1,
            angular_damping: 0.1,
            ground: None,
            bounce: 0.5,
            bodies: Vec::new(),
            joints: Vec::new(),
            contacts: Vec::new(),
            ready: false,
        }
    }
}

impl DemoWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Whether `init_data` ran since the last body was added.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn add_body(&mut self, body: Body) -> usize {
        self.ready = false;
        self.bodies.push(body);
        self.bodies.len() - 1
    }

    /// Adds a joint; returns `None` when either index is unknown.
    pub fn add_joint(&mut self, body_a: usize, body_b: usize) -> Option<usize> {
        if body_a >= self.bodies.len() || body_b >= self.bodies.len() {
            return None;
        }
        self.joints.push(Joint { body_a, body_b });
        Some(self.joints.len() - 1)
    }

    /// Endpoints of every joint in world space.
    pub fn joint_segments(&self) -> impl Iterator<Item = [DVec2; 2]> + '_ {
        self.joints
            .iter()
            .map(|j| [self.bodies[j.body_a].position, self.bodies[j.body_b].position])
    }

    fn prepare(&mut self) {
        for body in &mut self.bodies {
            let mass = body.density * body.shape.area();
            body.inv_mass = if body.is_static() || mass <= 0.0 {
                0.0
            } else {
                1.0 / mass
            };
        }
        self.ready = true;
    }
}

impl PhysicsBackend for DemoWorld {
    fn step_velocity(&mut self, dt: f64) {
        if !self.ready {
            self.prepare();
        }
        let lin = 1.0 / (1.0 + dt * self.linear_damping);
        let ang = 1.0 / (1.0 + dt * self.angular_damping);
        for body in self.bodies.iter_mut().filter(|b| b.inv_mass > 0.0) {
            body.velocity = (body.velocity + self.gravity * dt) * lin;
            body.angular_velocity *= ang;
        }
    }

    fn step_position(&mut self, dt: f64) {
        self.contacts.clear();
        for (index, body) in self.bodies.iter_mut().enumerate() {
            if body.inv_mass <= 0.0 {
                continue;
            }
            body.position += body.velocity * dt;
            body.angle += body.angular_velocity * dt;

            let Some(ground) = self.ground else {
                continue;
            };
            let penetration = ground - body.bottom();
            if penetration > 0.0 {
                body.position.y += penetration;
                if body.velocity.y < 0.0 {
                    body.velocity.y = -body.velocity.y * self.bounce;
                }
                self.contacts.push(Contact {
                    point: DVec2::new(body.position.x, ground),
                    body: index,
                });
            }
        }
    }

    fn clear_all_bodies(&mut self) {
        self.bodies.clear();
        self.contacts.clear();
        // Joints index into bodies.
        self.joints.clear();
        self.ready = false;
    }

    fn clear_all_joints(&mut self) {
        self.joints.clear();
    }

    fn init_data(&mut self) {
        self.prepare();
        log::debug!(
            "World ready: {} bodies, {} joints",
            self.bodies.len(),
            self.joints.len()
        );
    }
}
