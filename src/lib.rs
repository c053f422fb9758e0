//! # Bandviz
//!
//! Turn a timeline's audio into per-frame frequency-band energies that
//! drive bar-style visualizations.
//!
//! This library extracts the timeline-visible portion of a sound clip,
//! splits it into bass / low-mid / mid / high-mid bands with zero-phase
//! Butterworth filters, reduces each band to one energy value per
//! animation frame, and maps the result into keyframe tracks for a bar
//! rig.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bandviz::{
//!     config::Config,
//!     pipeline::Pipeline,
//!     timeline::{ClipLoader, Timeline, TimelineClip},
//! };
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::default();
//!
//! let clip = ClipLoader::load("song.wav", config.project.frame_start, config.project.fps)?;
//! let mut timeline = Timeline::new();
//! timeline.push(TimelineClip::Sound(clip));
//!
//! let pipeline = Pipeline::new(config);
//! let energies = pipeline.run(&timeline)?;
//! println!("{} frames per band", energies.frame_count());
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - [`timeline`] - Clip model, audio loading and waveform extraction
//! - [`dsp`] - Band filtering and frame aggregation
//! - [`pipeline`] - The orchestrator tying the stages together
//! - [`animation`] - Keyframe tracks and CSV export
//! - [`config`] - Configuration management
//!
//! The pipeline is a batch transform: it runs once over the whole clip
//! and either produces all five band series or fails with the stage that
//! went wrong. There is no streaming or incremental mode.

pub mod animation;
pub mod config;
pub mod dsp;
pub mod error;
pub mod pipeline;
pub mod timeline;

// Re-export commonly used types for convenience
pub use crate::{
    config::Config,
    error::{Result, VisualizerError},
    pipeline::{Band, BandEnergies, Pipeline},
};
