//! # Camera
//!
//! Maps simulation space (meters, y-up) to display space (pixels, y-down)
//! and back, and animates zoom changes.
//!
//! The mapping is
//!
//! ```text
//! screen.x = (origin.x + pan.x) + world.x * scale
//! screen.y = (origin.y - pan.y) - world.y * scale
//! ```
//!
//! where `origin` is the viewport midpoint and `scale` is meters-to-pixels.
//! Zoom requests only move the *target* scale; [`Camera::tick_animation`]
//! walks the current scale toward it with a discrete exponential filter.

use crate::config::CameraConfig;
use crate::error::ViewError;
use crate::viewport::Viewport;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::cell::OnceCell;

/// Which scene layers a renderer should draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerVisibility {
    pub bodies: bool,
    pub joints: bool,
    pub axis: bool,
    pub aabbs: bool,
    pub grid: bool,
    pub centers: bool,
    pub contacts: bool,
}

impl Default for LayerVisibility {
    fn default() -> Self {
        Self {
            bodies: true,
            joints: true,
            axis: true,
            aabbs: false,
            grid: false,
            centers: false,
            contacts: false,
        }
    }
}

/// Screen-space geometry of the world axes.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisGeometry {
    /// One point per meter along both axes, alternating x-axis / y-axis.
    pub ticks: Vec<DVec2>,
    /// Endpoints of the horizontal axis.
    pub x_axis: [DVec2; 2],
    /// Endpoints of the vertical axis.
    pub y_axis: [DVec2; 2],
}

/// Axis-aligned rectangle in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldRect {
    pub min: DVec2,
    pub max: DVec2,
}

impl WorldRect {
    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Grows the rectangle by `amount` on every side.
    pub fn expand(&self, amount: f64) -> Self {
        Self {
            min: self.min - DVec2::splat(amount),
            max: self.max + DVec2::splat(amount),
        }
    }
}

/// Scale, pan and viewport of the scene view.
#[derive(Debug, Clone)]
pub struct Camera {
    config: CameraConfig,
    viewport: Viewport,
    origin: DVec2,
    pan_offset: DVec2,
    scale: f64,
    inv_scale: f64,
    target_scale: f64,
    target_inv_scale: f64,
    layers: LayerVisibility,
    axis_cache: OnceCell<AxisGeometry>,
}

impl Camera {
    /// Creates a camera looking at the world origin through `viewport`.
    ///
    /// The current scale starts at `config.initial_scale` and the target at
    /// `config.initial_target_scale`, so the first ticks animate a zoom-in.
    pub fn new(viewport: Viewport, config: CameraConfig) -> Self {
        let scale = if config.initial_scale.is_finite() && config.initial_scale > 0.0 {
            config.initial_scale
        } else {
            config.min_scale
        };
        let initial_target = config.initial_target_scale;

        let mut camera = Self {
            viewport,
            origin: viewport.center(),
            pan_offset: DVec2::ZERO,
            scale,
            inv_scale: 1.0 / scale,
            target_scale: scale,
            target_inv_scale: 1.0 / scale,
            layers: LayerVisibility::default(),
            axis_cache: OnceCell::new(),
            config,
        };
        camera.request_zoom(initial_target);
        camera
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Display-space midpoint of the viewport.
    pub fn origin(&self) -> DVec2 {
        self.origin
    }

    pub fn pan_offset(&self) -> DVec2 {
        self.pan_offset
    }

    /// Current meters-to-pixels scale.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Current pixels-to-meters scale.
    pub fn inv_scale(&self) -> f64 {
        self.inv_scale
    }

    /// Scale the animation is converging to.
    pub fn target_scale(&self) -> f64 {
        self.target_scale
    }

    pub fn target_inv_scale(&self) -> f64 {
        self.target_inv_scale
    }

    /// True while the current scale has not reached the target.
    pub fn is_animating(&self) -> bool {
        self.scale != self.target_scale
    }

    pub fn layers(&self) -> &LayerVisibility {
        &self.layers
    }

    pub fn layers_mut(&mut self) -> &mut LayerVisibility {
        &mut self.layers
    }

    /// Replaces the viewport and recenters the origin on it.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.origin = viewport.center();
        self.invalidate();
    }

    /// Resizes the owned viewport (see [`Viewport::set_dimensions`]) and recenters.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), ViewError> {
        let mut viewport = self.viewport;
        viewport.set_dimensions(width, height)?;
        self.set_viewport(viewport);
        Ok(())
    }

    /// Sets the zoom target. The current scale follows on later animation ticks.
    ///
    /// Targets below `min_scale` are normalized to the floor rather than
    /// rejected; non-finite targets are ignored.
    pub fn request_zoom(&mut self, target_scale: f64) {
        if !target_scale.is_finite() {
            log::warn!("Ignoring non-finite zoom request: {target_scale}");
            return;
        }

        if target_scale < self.config.min_scale {
            log::debug!(
                "Zoom request {target_scale:.3} clamped to {:.3}",
                self.config.min_scale
            );
            self.target_scale = self.config.min_scale;
            self.target_inv_scale = 1.0 / self.config.min_scale;
            return;
        }

        self.target_scale = target_scale;
        self.target_inv_scale = 1.0 / target_scale;
    }

    /// Advances the zoom animation by one step of length `dt`.
    ///
    /// Snaps to the target once the gap is under `snap_epsilon` or the scale
    /// itself has dropped under `min_scale`; otherwise moves a fixed fraction
    /// `exp(restitution / dt) - 1` of the gap. Returns whether the scale changed.
    pub fn tick_animation(&mut self, dt: f64) -> bool {
        let previous = self.scale;
        let gap = self.target_scale - self.scale;

        if gap.abs() < self.config.snap_epsilon || self.scale < self.config.min_scale {
            self.scale = self.target_scale;
        } else {
            self.scale -= (1.0 - (self.config.restitution / dt).exp()) * gap;
        }
        self.inv_scale = 1.0 / self.scale;

        let changed = self.scale != previous;
        if changed {
            self.invalidate();
        }
        changed
    }

    /// Origin shifted by the pan offset, in display space.
    fn screen_anchor(&self) -> DVec2 {
        DVec2::new(
            self.origin.x + self.pan_offset.x,
            self.origin.y - self.pan_offset.y,
        )
    }

    /// Converts a simulation-space point to display pixels.
    pub fn world_to_screen(&self, p: DVec2) -> DVec2 {
        let anchor = self.screen_anchor();
        DVec2::new(anchor.x + p.x * self.scale, anchor.y - p.y * self.scale)
    }

    /// Converts display pixels back to simulation space.
    pub fn screen_to_world(&self, p: DVec2) -> DVec2 {
        let mut res = p - self.screen_anchor();
        res.y = -res.y;
        res * self.inv_scale
    }

    /// Converts a simulation-space length to pixels.
    pub fn world_length_to_screen(&self, len: f64) -> f64 {
        len * self.scale
    }

    /// Accumulates a display-space drag into the pan offset.
    ///
    /// The drag is damped by `pan_damping * reference_scale / scale`, so the
    /// same pointer motion pans the world by the same distance at any zoom.
    pub fn pan_by(&mut self, delta_screen: DVec2) {
        let ratio = self.config.pan_damping * (self.config.reference_scale / self.scale);
        self.pan_offset += delta_screen * ratio;
        self.invalidate();
    }

    /// Recenters the view and zooms back to the start-up target.
    pub fn reset_view(&mut self) {
        self.pan_offset = DVec2::ZERO;
        self.request_zoom(self.config.initial_target_scale);
        self.invalidate();
    }

    /// World-space area currently covered by the viewport.
    pub fn visible_world_rect(&self) -> WorldRect {
        let a = self.screen_to_world(self.viewport.top_left());
        let b = self.screen_to_world(self.viewport.bottom_right());
        WorldRect {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Axis ticks and lines in display space, rebuilt lazily after any
    /// change to the viewport, pan or scale.
    pub fn axis_geometry(&self) -> &AxisGeometry {
        self.axis_cache.get_or_init(|| self.build_axis_geometry())
    }

    fn build_axis_geometry(&self) -> AxisGeometry {
        let n = i64::from(self.config.axis_ticks);
        let mut ticks = Vec::with_capacity((4 * n + 2) as usize);
        for i in -n..=n {
            let i = i as f64;
            ticks.push(self.world_to_screen(DVec2::new(i, 0.0)));
            ticks.push(self.world_to_screen(DVec2::new(0.0, i)));
        }

        let n = n as f64;
        AxisGeometry {
            ticks,
            x_axis: [
                self.world_to_screen(DVec2::new(-n, 0.0)),
                self.world_to_screen(DVec2::new(n, 0.0)),
            ],
            y_axis: [
                self.world_to_screen(DVec2::new(0.0, -n)),
                self.world_to_screen(DVec2::new(0.0, n)),
            ],
        }
    }

    fn invalidate(&mut self) {
        self.axis_cache.take();
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Viewport::default(), CameraConfig::default())
    }
}
