use super::signal::Signal;
use crate::error::{AggregateError, Result};
use crate::timeline::FrameRange;

/// A frame-indexed energy series, one value per animation frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PerFrameSeries {
    /// First frame covered by the series
    pub start_frame: i64,

    /// One value per frame, `frame_count` long
    pub values: Vec<f32>,
}

impl PerFrameSeries {
    /// Number of frames covered
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Last frame covered by the series
    pub fn end_frame(&self) -> i64 {
        self.start_frame + self.values.len() as i64 - 1
    }

    /// Value at an absolute frame number, if covered
    pub fn value_at(&self, frame: i64) -> Option<f32> {
        let index = frame.checked_sub(self.start_frame)?;
        if index < 0 {
            return None;
        }
        self.values.get(index as usize).copied()
    }

    /// Euclidean norm of the whole series
    pub fn l2_norm(&self) -> f64 {
        self.values
            .iter()
            .map(|&v| v as f64 * v as f64)
            .sum::<f64>()
            .sqrt()
    }
}

/// Reduces a sample-indexed signal to one mean value per animation frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameAggregator {
    samples_per_frame: f64,
}

impl FrameAggregator {
    /// `samples_per_frame` is the signal's sample rate divided by the
    /// project frame rate; it is generally not an integer.
    pub fn new(samples_per_frame: f64) -> Result<Self> {
        if !(samples_per_frame > 0.0 && samples_per_frame.is_finite()) {
            return Err(AggregateError::InvalidSamplesPerFrame {
                spf: samples_per_frame,
            }
            .into());
        }
        Ok(Self { samples_per_frame })
    }

    pub fn samples_per_frame(&self) -> f64 {
        self.samples_per_frame
    }

    /// Aggregate `signal` over `range`, optionally unit-normalizing.
    ///
    /// Sample `i` lands in frame `floor(i / samples_per_frame)` relative to
    /// the range start and contributes `sample / samples_per_frame`, which
    /// accumulates to the per-frame mean without an explicit windowed pass.
    /// When the sample count is not an exact multiple of the frame window,
    /// trailing samples would index one past the final frame; their bucket
    /// is clamped to it. Frames past the end of the signal stay zero, so
    /// the output length is always exactly the frame count of `range`.
    pub fn aggregate(
        &self,
        signal: &Signal,
        range: &FrameRange,
        normalize: bool,
    ) -> Result<PerFrameSeries> {
        let frame_count = range.frame_count();
        if frame_count == 0 {
            return Ok(PerFrameSeries {
                start_frame: range.start,
                values: Vec::new(),
            });
        }
        let last = frame_count - 1;
        let mut values = vec![0.0f64; frame_count];

        for (i, &sample) in signal.samples.iter().enumerate() {
            let bucket = ((i as f64 / self.samples_per_frame) as usize).min(last);
            values[bucket] += sample as f64 / self.samples_per_frame;
        }

        if normalize {
            let norm = values.iter().map(|v| v * v).sum::<f64>().sqrt();
            if norm == 0.0 {
                return Err(AggregateError::DegenerateSignal.into());
            }
            for value in values.iter_mut() {
                *value /= norm;
            }
        }

        Ok(PerFrameSeries {
            start_frame: range.start,
            values: values.into_iter().map(|v| v as f32).collect(),
        })
    }
}
