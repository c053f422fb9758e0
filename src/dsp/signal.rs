/// A sampled mono waveform with its sample rate.
///
/// The sample rate is carried as a float because it is usually *derived*
/// from an extracted span (`sample_count / duration`) rather than read off
/// the source audio, and the derived value is generally not an integer.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    /// Sample values, one per sampling instant
    pub samples: Vec<f32>,

    /// Samples per second, always positive
    pub sample_rate: f64,
}

impl Signal {
    pub fn new(samples: Vec<f32>, sample_rate: f64) -> Self {
        debug_assert!(sample_rate > 0.0, "sample rate must be positive");
        Self {
            samples,
            sample_rate,
        }
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate
    }

    /// Half the sample rate; the highest representable frequency
    pub fn nyquist(&self) -> f64 {
        0.5 * self.sample_rate
    }
}
