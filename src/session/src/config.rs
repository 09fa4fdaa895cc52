use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = "cubesolve.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: io::Error,
    },
    #[error("Failed to parse configuration file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Timing and physics knobs for playback and the drag controller. Every
/// field is optional in the TOML file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    pub scramble_length: usize,
    pub scramble_delay_ms: u64,
    pub solve_delay_ms: u64,
    /// Velocity multiplier applied every momentum frame.
    pub friction: f64,
    /// Release speed above which momentum kicks in.
    pub release_threshold: f64,
    /// Speed below which momentum stops.
    pub stop_threshold: f64,
    pub drag_sensitivity: f64,
    pub transition_ms: u64,
    pub fit_margin: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        PlaybackConfig {
            scramble_length: cube_core::DEFAULT_SCRAMBLE_LENGTH,
            scramble_delay_ms: 100,
            solve_delay_ms: 200,
            friction: 0.95,
            release_threshold: 0.5,
            stop_threshold: 0.1,
            drag_sensitivity: 0.5,
            transition_ms: 1200,
            fit_margin: 0.96,
        }
    }
}

impl PlaybackConfig {
    /// Read a TOML configuration file.
    ///
    /// # Errors
    ///
    /// If the file can't be read or isn't valid TOML for this struct.
    pub fn load(path: &Path) -> Result<PlaybackConfig, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;

        let config = toml::from_str::<PlaybackConfig>(&text)?;
        info!(target: "session", "Loaded configuration from {path:?}");
        Ok(config)
    }

    /// Load `path` if given, otherwise `cubesolve.toml` in the user's config
    /// directory if it exists, otherwise the defaults.
    ///
    /// # Errors
    ///
    /// If a file that exists can't be read or parsed.
    pub fn load_or_default(path: Option<&Path>) -> Result<PlaybackConfig, ConfigError> {
        if let Some(path) = path {
            return PlaybackConfig::load(path);
        }

        match default_path() {
            Some(path) if path.is_file() => PlaybackConfig::load(&path),
            _ => {
                debug!(target: "session", "No configuration file, using defaults");
                Ok(PlaybackConfig::default())
            }
        }
    }

    pub fn scramble_delay(&self) -> Duration {
        Duration::from_millis(self.scramble_delay_ms)
    }

    pub fn solve_delay(&self) -> Duration {
        Duration::from_millis(self.solve_delay_ms)
    }

    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }
}

pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config = toml::from_str::<PlaybackConfig>("solve_delay_ms = 50\nfriction = 0.9").unwrap();

        assert_eq!(config.solve_delay(), Duration::from_millis(50));
        assert!((config.friction - 0.9).abs() < f64::EPSILON);
        assert_eq!(config.scramble_length, 30);
        assert_eq!(config.scramble_delay(), Duration::from_millis(100));
        assert_eq!(config.transition(), Duration::from_millis(1200));
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(
            toml::from_str::<PlaybackConfig>("").unwrap(),
            PlaybackConfig::default()
        );
    }

    #[test]
    fn test_bad_types_are_rejected() {
        assert!(toml::from_str::<PlaybackConfig>("scramble_length = \"long\"").is_err());
    }

    #[test]
    fn test_missing_file() {
        let path = std::env::temp_dir().join("cubesolve-config-that-does-not-exist.toml");
        assert!(matches!(
            PlaybackConfig::load(&path),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_load_round_trip() {
        let path = std::env::temp_dir().join(format!("cubesolve-config-{}.toml", std::process::id()));
        let config = PlaybackConfig {
            scramble_length: 12,
            ..PlaybackConfig::default()
        };
        fs::write(&path, toml::to_string(&config).unwrap()).unwrap();

        assert_eq!(PlaybackConfig::load(&path).unwrap(), config);
        assert_eq!(PlaybackConfig::load_or_default(Some(&path)).unwrap(), config);
        fs::remove_file(&path).unwrap();
    }
}
