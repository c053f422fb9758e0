//! # Animation Output
//!
//! The consumer side of the pipeline: per-frame band energies mapped into
//! named keyframe tracks for a bar rig, plus CSV export of those tracks.

pub mod export;
pub mod keyframes;

pub use export::{write_csv, write_csv_file};
pub use keyframes::{BarRig, Keyframe, KeyframeTrack};
