//! Driver settings
//!
//! Read from a JSON file next to the binary. Physics constants are not
//! configurable; these only steer the outer loop.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Environment variable naming an alternate settings file
pub const SETTINGS_ENV: &str = "ASTEROID_FIELD_SETTINGS";
/// Settings file looked up in the working directory
pub const SETTINGS_FILE: &str = "asteroid-field.json";

/// Why a settings file could not be used
#[derive(Debug)]
pub enum SettingsError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Malformed on load, or unserializable on save
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot access {}: {}", path.display(), source),
            Self::Json { path, source } => {
                write!(f, "bad settings JSON for {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

/// Driver settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Target tick rate of the outer loop
    pub frames_per_second: u32,
    /// Show the FPS counter
    pub show_fps: bool,
    /// Fixed RNG seed; derived from the clock when absent
    pub seed: Option<u64>,
    /// Length of the headless demo run, in ticks
    pub demo_ticks: u32,
    /// Sleep between ticks to hold the target rate
    pub pace: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            frames_per_second: 60,
            show_fps: false,
            seed: None,
            demo_ticks: 1800,
            pace: false,
        }
    }
}

impl Settings {
    /// Wall-clock budget for one tick
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.frames_per_second.max(1)))
    }

    /// Settings file to use: the env override, else the default name
    pub fn path() -> PathBuf {
        std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE))
    }

    /// Parse settings from a specific file
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| SettingsError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load settings, falling back to defaults when the file is missing or bad
    pub fn load() -> Self {
        let path = Self::path();
        if !path.exists() {
            log::info!("Using default settings");
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::warn!("{}; using defaults", err);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self).map_err(|source| SettingsError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("asteroid-field-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"seed": 7, "pace": true}"#).unwrap();
        assert_eq!(settings.seed, Some(7));
        assert!(settings.pace);
        assert_eq!(settings.frames_per_second, 60);
        assert_eq!(settings.demo_ticks, 1800);
    }

    #[test]
    fn test_frame_duration() {
        let settings = Settings {
            frames_per_second: 50,
            ..Default::default()
        };
        assert_eq!(settings.frame_duration(), Duration::from_millis(20));
        let zero = Settings {
            frames_per_second: 0,
            ..Default::default()
        };
        assert_eq!(zero.frame_duration(), Duration::from_secs(1));
    }

    #[test]
    fn test_save_then_load() {
        let path = scratch_file("roundtrip");
        let settings = Settings {
            show_fps: true,
            seed: Some(42),
            ..Default::default()
        };
        settings.save(&path).unwrap();
        let loaded = Settings::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_errors() {
        let missing = scratch_file("missing");
        assert!(matches!(
            Settings::load_from(&missing),
            Err(SettingsError::Io { .. })
        ));

        let bad = scratch_file("bad");
        std::fs::write(&bad, "{ not json").unwrap();
        let err = Settings::load_from(&bad).unwrap_err();
        std::fs::remove_file(&bad).ok();
        assert!(matches!(err, SettingsError::Json { .. }));
        assert!(err.to_string().starts_with("bad settings JSON for"));
    }
}
