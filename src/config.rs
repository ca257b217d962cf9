use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_CAMERA_DELAY_MS, DEFAULT_LOCATION_DELAY_MS,
    DEFAULT_POSITION, DEFAULT_ZOOM,
};
use crate::models::Coordinate;

/// How the simulated geolocation capability behaves
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LocationMode {
    #[default]
    Located,
    Denied,
    Unavailable,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeolocationConfig {
    pub mode: LocationMode,
    /// Fix reported in `located` mode
    pub position: Coordinate,
    pub delay_ms: u64,
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        GeolocationConfig {
            mode: LocationMode::Located,
            position: DEFAULT_POSITION,
            delay_ms: DEFAULT_LOCATION_DELAY_MS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub grant: bool,
    pub delay_ms: u64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        CameraConfig {
            grant: true,
            delay_ms: DEFAULT_CAMERA_DELAY_MS,
        }
    }
}

/// User configuration, read from `~/.transit-tui/config.yaml`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Used before the first fix and when geolocation fails
    pub fallback_position: Coordinate,
    pub zoom: u8,
    pub geolocation: GeolocationConfig,
    pub camera: CameraConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            fallback_position: DEFAULT_POSITION,
            zoom: DEFAULT_ZOOM,
            geolocation: GeolocationConfig::default(),
            camera: CameraConfig::default(),
        }
    }
}

impl Config {
    /// Default config file location
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Load from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Load from `path`; a missing file means defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        tracing::info!(path = %path.display(), "Loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.yaml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.fallback_position, Coordinate::new(28.604, 77.225));
        assert_eq!(config.zoom, 15);
    }

    #[test]
    fn test_partial_file_overrides() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            "zoom: 13\ngeolocation:\n  mode: denied\ncamera:\n  grant: false\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.zoom, 13);
        assert_eq!(config.geolocation.mode, LocationMode::Denied);
        assert_eq!(config.geolocation.delay_ms, DEFAULT_LOCATION_DELAY_MS);
        assert!(!config.camera.grant);
        assert_eq!(config.fallback_position, DEFAULT_POSITION);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "zoom: [not a number").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
