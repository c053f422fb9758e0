//! # Signal Processing
//!
//! The numeric core of the crate: Butterworth band filtering applied with
//! zero net phase, and reduction of sample-indexed signals to per-frame
//! energies.
//!
//! Filters are built as cascades of biquad sections and always run
//! forward and backward over the signal, so the filtered waveform stays
//! aligned sample-for-sample with the raw one. That alignment is what
//! lets [`FrameAggregator`] map both through the same frame windows.

pub mod aggregate;
pub mod biquad;
pub mod butterworth;
pub mod signal;

pub use aggregate::{FrameAggregator, PerFrameSeries};
pub use biquad::{BiquadCoeffs, BiquadState};
pub use butterworth::BandFilter;
pub use signal::Signal;
