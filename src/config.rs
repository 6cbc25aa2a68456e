//! Tunable parameters for the camera and the scene loop.
//!
//! Defaults are the reference values the visualizer was tuned with. Both
//! structs deserialize with `#[serde(default)]`, so a config file only needs
//! the fields it overrides.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A config value the camera cannot run with.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("camera.{field} = {value}: must be {requirement}")]
pub struct InvalidConfig {
    pub field: &'static str,
    pub value: f64,
    pub requirement: String,
}

fn require(
    field: &'static str,
    value: f64,
    ok: bool,
    requirement: impl Into<String>,
) -> Result<(), InvalidConfig> {
    if value.is_finite() && ok {
        Ok(())
    } else {
        Err(InvalidConfig {
            field,
            value,
            requirement: requirement.into(),
        })
    }
}

/// Camera zoom, animation and drag parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Meters-to-pixels scale the camera starts at.
    pub initial_scale: f64,
    /// Zoom target requested at start-up and by `reset_view`.
    pub initial_target_scale: f64,
    /// Scale at which a one-pixel drag moves the view by half a pixel.
    pub reference_scale: f64,
    /// Floor for zoom requests; also the scale below which animation snaps.
    pub min_scale: f64,
    /// Damping constant of the zoom filter.
    pub restitution: f64,
    /// Fixed animation-frame duration fed to the zoom filter.
    pub animation_dt: f64,
    /// Remaining zoom gap under which the animation snaps to its target.
    pub snap_epsilon: f64,
    /// Fraction of a pointer drag applied to the pan offset.
    pub pan_damping: f64,
    /// Number of one-meter ticks drawn on each half-axis.
    pub axis_ticks: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            initial_scale: 33.0,
            initial_target_scale: 53.0,
            reference_scale: 33.0,
            min_scale: 1.0,
            restitution: 2.0,
            animation_dt: 15.0,
            snap_epsilon: 0.1,
            pan_damping: 0.5,
            axis_ticks: 10,
        }
    }
}

impl CameraConfig {
    /// Checks the values the zoom filter and the clamp floor depend on.
    ///
    /// The filter moves `exp(restitution / animation_dt) - 1` of the gap per
    /// tick; that fraction must stay below 1 or the scale overshoots and can
    /// go negative, so `animation_dt > restitution / ln 2`.
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        require("min_scale", self.min_scale, self.min_scale > 0.0, "> 0")?;
        require("restitution", self.restitution, self.restitution > 0.0, "> 0")?;
        require("snap_epsilon", self.snap_epsilon, self.snap_epsilon > 0.0, "> 0")?;
        require(
            "reference_scale",
            self.reference_scale,
            self.reference_scale > 0.0,
            "> 0",
        )?;
        require("pan_damping", self.pan_damping, true, "finite")?;
        require(
            "initial_target_scale",
            self.initial_target_scale,
            true,
            "finite",
        )?;
        let min_dt = self.restitution / std::f64::consts::LN_2;
        require(
            "animation_dt",
            self.animation_dt,
            self.animation_dt > min_dt,
            format!("> restitution / ln 2 ({min_dt:.3})"),
        )
    }
}

/// Scene loop parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Simulation steps per second; the physics timestep is `1 / fps`.
    pub fps: u32,
    /// Start with the simulation paused.
    pub start_paused: bool,
}

impl SceneConfig {
    /// Physics timestep in seconds.
    pub fn physics_dt(&self) -> f64 {
        1.0 / f64::from(self.fps.max(1))
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            fps: 120,
            start_paused: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let cfg: CameraConfig = ron::from_str("(animation_dt: 30.0)").unwrap();
        assert_eq!(cfg.animation_dt, 30.0);
        assert_eq!(cfg.restitution, 2.0);
        assert_eq!(cfg.reference_scale, 33.0);
    }

    #[test]
    fn defaults_are_valid() {
        assert_eq!(CameraConfig::default().validate(), Ok(()));
    }

    #[test]
    fn animation_step_must_not_overshoot() {
        // restitution 2.0 needs animation_dt above 2 / ln 2 (about 2.885).
        for dt in [0.0, 1.0, 2.0, f64::NAN] {
            let cfg = CameraConfig {
                animation_dt: dt,
                ..Default::default()
            };
            let err = cfg.validate().unwrap_err();
            assert_eq!(err.field, "animation_dt");
        }
        let cfg = CameraConfig {
            animation_dt: 3.0,
            ..Default::default()
        };
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn scale_floor_must_be_positive() {
        for min_scale in [0.0, -1.0, f64::INFINITY] {
            let cfg = CameraConfig {
                min_scale,
                ..Default::default()
            };
            assert_eq!(cfg.validate().unwrap_err().field, "min_scale");
        }
        let cfg = CameraConfig {
            snap_epsilon: 0.0,
            ..Default::default()
        };
        assert_eq!(cfg.validate().unwrap_err().field, "snap_epsilon");
    }

    #[test]
    fn physics_dt_guards_zero_fps() {
        let cfg = SceneConfig {
            fps: 0,
            ..Default::default()
        };
        assert_eq!(cfg.physics_dt(), 1.0);
        assert_eq!(SceneConfig::default().physics_dt(), 1.0 / 120.0);
    }
}
