use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::timeline::FrameRange;

/// Main configuration for a visualizer run, loadable from TOML.
///
/// The original tool read frame range and frame rate from ambient scene
/// state; here everything the pipeline needs is carried explicitly so a
/// run is fully described by one value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Project timeline settings
    pub project: ProjectConfig,

    /// Frequency band settings
    pub bands: BandConfig,

    /// Bar rig and keyframe mapping settings
    pub animation: AnimationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project: ProjectConfig::default(),
            bands: BandConfig::default(),
            animation: AnimationConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|_| ConfigError::ParseFailed {
            path: path.display().to_string(),
        })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::InvalidValue {
            key: "config".to_string(),
            value: e.to_string(),
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.project.validate()?;
        self.bands.validate()?;
        self.animation.validate()?;
        Ok(())
    }
}

/// Project timeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// First animated frame (inclusive)
    pub frame_start: i64,

    /// Last animated frame (inclusive)
    pub frame_end: i64,

    /// Frames per second
    pub fps: f64,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            frame_start: 1,
            frame_end: 250,
            fps: 24.0,
        }
    }
}

impl ProjectConfig {
    pub fn frame_range(&self) -> FrameRange {
        FrameRange::new(self.frame_start, self.frame_end)
    }

    pub fn frame_count(&self) -> usize {
        self.frame_range().frame_count()
    }

    fn validate(&self) -> Result<()> {
        if self.frame_start > self.frame_end {
            return Err(ConfigError::InvalidValue {
                key: "project.frame_range".to_string(),
                value: format!("{}-{}", self.frame_start, self.frame_end),
            }
            .into());
        }

        if !(self.fps > 0.0 && self.fps.is_finite()) {
            return Err(ConfigError::InvalidValue {
                key: "project.fps".to_string(),
                value: self.fps.to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// Frequency band configuration
///
/// The four cutoffs split the spectrum into the bass, low-mid, mid and
/// high-mid bars. `mid_cutoff` is carried for the panel but shapes no
/// filter: the mid bar spans `lowmid_cutoff` to `highmid_cutoff`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BandConfig {
    /// Upper bound of the bass bar (Hz)
    pub bass_cutoff: f64,

    /// Upper bound of the low-mid bar (Hz)
    pub lowmid_cutoff: f64,

    /// Midrange split point (Hz)
    pub mid_cutoff: f64,

    /// Lower bound of the high-mid bar (Hz)
    pub highmid_cutoff: f64,

    /// Butterworth filter order
    pub filter_order: usize,

    /// Unit-normalize each per-frame series
    pub normalize: bool,
}

impl Default for BandConfig {
    fn default() -> Self {
        Self {
            bass_cutoff: 250.0,
            lowmid_cutoff: 500.0,
            mid_cutoff: 2_000.0,
            highmid_cutoff: 4_000.0,
            filter_order: 4,
            normalize: true,
        }
    }
}

impl BandConfig {
    fn validate(&self) -> Result<()> {
        if self.filter_order == 0 {
            return Err(ConfigError::InvalidValue {
                key: "bands.filter_order".to_string(),
                value: self.filter_order.to_string(),
            }
            .into());
        }

        let chain = [
            self.bass_cutoff,
            self.lowmid_cutoff,
            self.mid_cutoff,
            self.highmid_cutoff,
        ];
        let increasing = chain[0] > 0.0 && chain.windows(2).all(|pair| pair[0] < pair[1]);
        if !increasing {
            return Err(ConfigError::CutoffsNotIncreasing {
                details: format!(
                    "bass={} lowmid={} mid={} highmid={}",
                    self.bass_cutoff, self.lowmid_cutoff, self.mid_cutoff, self.highmid_cutoff
                ),
            }
            .into());
        }

        Ok(())
    }
}

/// Bar rig and keyframe mapping configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Rig name; tracks are named `<name>_Total`, `<name>_Bass`, ...
    pub name: String,

    /// Discard a previous rig of the same name
    pub replace: bool,

    /// Gain applied to every energy value before keyframing
    pub volume_scale: f64,

    /// Base bar height added after scaling
    pub volume_offset: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            name: "Visualizer".to_string(),
            replace: false,
            volume_scale: 10.0,
            volume_offset: 0.1,
        }
    }
}

impl AnimationConfig {
    fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "animation.name".to_string(),
                value: "(empty)".to_string(),
            }
            .into());
        }

        Ok(())
    }
}
