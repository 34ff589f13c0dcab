use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::engine::MarkerReplay;
use crate::error::ReplayError;

/// Replay session configuration file format
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReplayConfig {
    /// Model descriptor (JSON)
    pub model: PathBuf,
    /// Marker recording (.trc)
    pub recording: PathBuf,
    #[serde(default)]
    pub loop_playback: bool,
    #[serde(default)]
    pub speed_factor: Option<f64>,
    /// Takes precedence over `speed_factor` when both are set
    #[serde(default)]
    pub output_frequency: Option<f64>,
    #[serde(default)]
    pub frames_to_skip: u32,
    /// Per-consumer queue capacity, unbounded when absent
    #[serde(default)]
    pub queue_capacity: Option<usize>,
    #[serde(default = "default_consumers")]
    pub consumers: usize,
}

fn default_consumers() -> usize {
    1
}

impl ReplayConfig {
    pub fn new(model: impl Into<PathBuf>, recording: impl Into<PathBuf>) -> Self {
        Self {
            model: model.into(),
            recording: recording.into(),
            loop_playback: false,
            speed_factor: None,
            output_frequency: None,
            frames_to_skip: 0,
            queue_capacity: None,
            consumers: default_consumers(),
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .context(format!("Failed to read replay config from {:?}", path))?;

        let config: ReplayConfig = serde_json::from_str(&json)
            .context("Failed to deserialize replay config")?;
        config.validate()?;

        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize replay config")?;

        fs::write(path, json).context(format!("Failed to write replay config to {:?}", path))?;

        Ok(())
    }

    pub fn validate(&self) -> std::result::Result<(), ReplayError> {
        for (what, value) in [
            ("speed_factor", self.speed_factor),
            ("output_frequency", self.output_frequency),
        ] {
            if let Some(v) = value {
                if !(v.is_finite() && v > 0.0) {
                    return Err(ReplayError::Config(format!(
                        "{} must be positive, got {}",
                        what, v
                    )));
                }
            }
        }
        if self.queue_capacity == Some(0) {
            return Err(ReplayError::Config("queue_capacity must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Apply the pacing and decimation settings to a constructed replay
    pub fn apply(&self, replay: &mut MarkerReplay) -> std::result::Result<(), ReplayError> {
        if let Some(speed) = self.speed_factor {
            replay.set_speed_factor(speed)?;
        }
        if let Some(freq) = self.output_frequency {
            replay.set_output_frequency(freq)?;
        }
        replay.set_frames_to_skip(self.frames_to_skip);
        Ok(())
    }
}
