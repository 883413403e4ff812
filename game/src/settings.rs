use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::intents::Bindings;
use crate::session::SessionConfig;

pub const SETTINGS_PATH_ENV: &str = "FALLING_BLOCKS_SETTINGS";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FieldSettings {
    pub width: usize,
    pub height: usize,
}

impl Default for FieldSettings {
    fn default() -> Self {
        Self {
            width: 10,
            height: 20,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GravitySettings {
    /// Forced descents per second at the start of a game.
    pub initial_fall_speed: f64,
    pub fall_speed_increment: f64,
}

impl Default for GravitySettings {
    fn default() -> Self {
        Self {
            initial_fall_speed: 1.5,
            fall_speed_increment: 0.1,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct VideoSettings {
    pub cell_size: u32,
    pub window_width: u32,
    pub window_height: u32,
    pub vsync: bool,
}

impl Default for VideoSettings {
    fn default() -> Self {
        Self {
            cell_size: 25,
            window_width: 800,
            window_height: 600,
            vsync: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub field: FieldSettings,
    #[serde(default)]
    pub gravity: GravitySettings,
    #[serde(default)]
    pub video: VideoSettings,
    #[serde(default)]
    pub bindings: Bindings,
    /// Fixed piece sequence seed; `None` seeds from the clock.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            field: FieldSettings::default(),
            gravity: GravitySettings::default(),
            video: VideoSettings::default(),
            bindings: Bindings::default(),
            seed: None,
        }
    }
}

impl Settings {
    pub fn sanitized(mut self) -> Self {
        self.version = default_version();
        // Every piece must fit in both orientations.
        self.field.width = self.field.width.clamp(4, 64);
        self.field.height = self.field.height.clamp(4, 64);

        let defaults = GravitySettings::default();
        self.gravity.initial_fall_speed =
            finite_or(self.gravity.initial_fall_speed, defaults.initial_fall_speed).clamp(0.0, 60.0);
        self.gravity.fall_speed_increment =
            finite_or(self.gravity.fall_speed_increment, defaults.fall_speed_increment)
                .clamp(0.0, 10.0);

        self.video.cell_size = self.video.cell_size.clamp(4, 128);
        self.video.window_width = self.video.window_width.clamp(64, 8192);
        self.video.window_height = self.video.window_height.clamp(64, 8192);
        self
    }

    pub fn session_config(&self, seed: u64) -> SessionConfig {
        SessionConfig {
            field_width: self.field.width,
            field_height: self.field.height,
            initial_fall_speed: self.gravity.initial_fall_speed,
            fall_speed_increment: self.gravity.fall_speed_increment,
            seed,
        }
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}

fn default_version() -> u32 {
    1
}

#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$FALLING_BLOCKS_SETTINGS`, else `$XDG_CONFIG_HOME/falling-blocks/settings.json`, else
    /// `~/.config/falling-blocks/settings.json`.
    pub fn from_env() -> Self {
        if let Some(explicit) = std::env::var_os(SETTINGS_PATH_ENV) {
            return Self::new(explicit);
        }

        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(base.join("falling-blocks").join("settings.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing or unreadable files yield defaults.
    pub fn load(&self) -> Settings {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("no settings at {}, using defaults", self.path.display());
                return Settings::default();
            }
            Err(err) => {
                log::warn!("failed to read {}: {err}; using defaults", self.path.display());
                return Settings::default();
            }
        };
        match serde_json::from_slice::<Settings>(&bytes) {
            Ok(settings) => settings.sanitized(),
            Err(err) => {
                log::warn!("invalid settings in {}: {err}; using defaults", self.path.display());
                Settings::default()
            }
        }
    }

    pub fn save(&self, settings: &Settings) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(settings)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitized_clamps_out_of_range_values() {
        let settings = Settings {
            version: 7,
            field: FieldSettings {
                width: 1,
                height: 500,
            },
            gravity: GravitySettings {
                initial_fall_speed: f64::NAN,
                fall_speed_increment: -3.0,
            },
            video: VideoSettings {
                cell_size: 0,
                ..VideoSettings::default()
            },
            ..Settings::default()
        }
        .sanitized();

        assert_eq!(settings.version, 1);
        assert_eq!(settings.field.width, 4);
        assert_eq!(settings.field.height, 64);
        assert_eq!(settings.gravity.initial_fall_speed, 1.5);
        assert_eq!(settings.gravity.fall_speed_increment, 0.0);
        assert_eq!(settings.video.cell_size, 4);
    }

    #[test]
    fn serde_defaults_fill_missing_fields() {
        let parsed: Settings = serde_json::from_str(r#"{"field":{"width":12},"seed":9}"#)
            .expect("settings JSON should parse");
        assert_eq!(parsed.field.width, 12);
        assert_eq!(parsed.field.height, 20);
        assert_eq!(parsed.gravity, GravitySettings::default());
        assert_eq!(parsed.bindings, Bindings::default());
        assert_eq!(parsed.seed, Some(9));
    }

    #[test]
    fn session_config_carries_field_and_gravity() {
        let config = Settings::default().session_config(5);
        assert_eq!((config.field_width, config.field_height), (10, 20));
        assert_eq!(config.initial_fall_speed, 1.5);
        assert_eq!(config.seed, 5);
    }
}
