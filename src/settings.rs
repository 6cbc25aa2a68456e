//! Viewer configuration file.

use crate::config::{CameraConfig, InvalidConfig, SceneConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const APP_DIR: &str = "phys-viewer";
const CONFIG_FILE: &str = "config.ron";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: ron::de::SpannedError,
    },
    #[error("invalid config in {}: {source}", path.display())]
    Invalid {
        path: PathBuf,
        source: InvalidConfig,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub camera: CameraConfig,
    pub scene: SceneConfig,
}

impl ViewerConfig {
    /// Default location: `<config dir>/phys-viewer/config.ron`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = ron::from_str(&source).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config
            .camera
            .validate()
            .map_err(|source| ConfigError::Invalid {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(config)
    }

    /// Reads an explicit path, or the default path when it exists.
    /// Falls back to defaults when neither applies.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            log::info!("Loading config from {}", path.display());
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => {
                log::info!("Loading config from {}", path.display());
                Self::from_file(&path)
            }
            _ => {
                log::debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_sections_are_optional() {
        let config: ViewerConfig = ron::from_str("(scene: (fps: 60))").unwrap();
        assert_eq!(config.scene.fps, 60);
        assert_eq!(config.camera, CameraConfig::default());
    }

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("{name}-{}.ron", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn overshooting_animation_step_is_rejected() {
        let path = write_temp("phys-viewer-bad-dt", "(camera: (animation_dt: 1.0))");
        let result = ViewerConfig::from_file(&path);
        std::fs::remove_file(&path).unwrap();

        match result {
            Err(ConfigError::Invalid { source, .. }) => assert_eq!(source.field, "animation_dt"),
            other => panic!("expected an invalid config error, got {other:?}"),
        }
    }

    #[test]
    fn non_positive_scale_floor_is_rejected() {
        let path = write_temp("phys-viewer-bad-floor", "(camera: (min_scale: 0.0))");
        let result = ViewerConfig::from_file(&path);
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn valid_file_loads() {
        let path = write_temp("phys-viewer-good", "(camera: (animation_dt: 30.0), scene: (fps: 60))");
        let result = ViewerConfig::from_file(&path);
        std::fs::remove_file(&path).unwrap();

        let config = result.unwrap();
        assert_eq!(config.camera.animation_dt, 30.0);
        assert_eq!(config.scene.fps, 60);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = ViewerConfig::load(Some(Path::new("/nonexistent/phys-viewer.ron")));
        assert!(matches!(err, Err(ConfigError::Read { .. })));
    }
}
