//! Seams to the simulation backend and the renderer.
//!
//! The core never looks inside the physics world; it only drives it through
//! [`PhysicsBackend`] and hands it to a [`SceneRenderer`] once per tick.

use crate::camera::Camera;

/// The operations the scene needs from a physics world.
///
/// All calls are synchronous and infallible from the scene's point of view.
pub trait PhysicsBackend {
    /// Integrates forces into velocities.
    fn step_velocity(&mut self, dt: f64);
    /// Integrates velocities into positions.
    fn step_position(&mut self, dt: f64);
    fn clear_all_bodies(&mut self);
    fn clear_all_joints(&mut self);
    /// Finalizes freshly loaded frame data before the first step.
    fn init_data(&mut self);
}

/// Draws the scene. Every world-space point goes through the camera.
pub trait SceneRenderer<B> {
    fn render(&mut self, camera: &Camera, backend: &B);
}
