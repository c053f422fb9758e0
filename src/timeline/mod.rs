//! # Timeline Model
//!
//! Clips positioned on an animation timeline, audio-file loading into
//! clips, and extraction of the timeline-visible waveform that feeds the
//! pipeline.
//!
//! Extraction reads exactly one clip per run, chosen by an explicit
//! [`ClipSelection`] policy; mixing multiple clips is out of scope.

pub mod extract;
pub mod loader;
pub mod types;

pub use extract::{ClipSelection, WaveformExtractor};
pub use loader::ClipLoader;
pub use types::{FrameRange, OtherClip, SoundClip, Timeline, TimelineClip};
