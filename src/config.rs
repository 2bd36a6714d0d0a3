//! Startup configuration.
//!
//! Every field has a default, so a config file only needs the keys it wants to
//! change:
//!
//! ```json
//! { "cube_color": [0.2, 0.6, 1.0], "camera": { "speed": 0.05 } }
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::camera::Camera;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub window_width: u32,
    pub window_height: u32,
    pub title: String,
    pub camera: CameraConfig,
    /// Tint of the reference cube at the origin.
    pub cube_color: [f32; 3],
    pub clear_color: [f32; 3],
    /// Grab the cursor as soon as the window opens.
    pub start_captured: bool,
    pub vsync: bool,
    pub log_dir: PathBuf,
    /// `env_logger` filter; `RUST_LOG` wins when set.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_width: 800,
            window_height: 600,
            title: "Terrain".to_string(),
            camera: CameraConfig::default(),
            cube_color: [1.0, 0.5, 0.0],
            clear_color: [0.1, 0.1, 0.1],
            start_captured: false,
            vsync: true,
            log_dir: PathBuf::from("logs"),
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Initial camera pose and input tuning.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    /// Radians.
    pub yaw: f32,
    /// Radians.
    pub pitch: f32,
    /// World units per frame.
    pub speed: f32,
    /// Radians per pixel of mouse motion.
    pub mouse_sensitivity: f32,
    pub pitch_limit: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.5, -2.0],
            yaw: 0.0,
            pitch: 0.0,
            speed: 0.02,
            mouse_sensitivity: 0.002,
            pitch_limit: 1.5,
        }
    }
}

impl CameraConfig {
    pub fn camera(&self) -> Camera {
        Camera::new(
            self.position,
            cgmath::Rad(self.yaw),
            cgmath::Rad(self.pitch),
            self.speed,
        )
    }
}
