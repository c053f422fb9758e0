//! # Pipeline
//!
//! The orchestrator that sequences waveform extraction, four-way band
//! filtering and per-frame aggregation into one atomic run.

pub mod engine;

// Re-exports for convenience
pub use engine::{Band, BandEnergies, Pipeline};
