use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub system: SystemConfig,
    pub camera: CameraConfig,
    pub replay: Option<ReplayConfig>,
    pub session: SessionConfig,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SystemConfig {
    pub log_level: String,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub device_id: u32,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
}

// Replays still images from a directory instead of opening the camera.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ReplayConfig {
    pub directory: PathBuf,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    pub initial_color: Option<String>,
    pub window_title: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        // 25 fps is one frame every 40 ms
        Self {
            device_id: 0,
            width: 640,
            height: 480,
            fps: 25,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_color: None,
            window_title: "chroma".to_string(),
        }
    }
}

impl Config {
    // Load config from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    // Load default config
    pub fn load_default() -> Result<Self> {
        Self::from_file(DEFAULT_CONFIG_PATH)
    }
}
