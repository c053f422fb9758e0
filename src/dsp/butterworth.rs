use std::f64::consts::PI;

use super::biquad::{BiquadCoeffs, BiquadState};
use super::signal::Signal;
use crate::error::{FilterError, Result};

/// One band filter: kind plus cutoff frequencies in Hz.
///
/// The band-pass variant cascades the high-pass design at `low_hz` with the
/// low-pass design at `high_hz`. Because the filter is always applied
/// forward and backward, the effective magnitude response is squared, and a
/// set of bands built this way partitions the input exactly:
/// `|LP|^2 + |HP|^2 = 1` holds for Butterworth low/high pairs at the same
/// cutoff, so splitting and re-splitting the high side telescopes to unity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BandFilter {
    Lowpass { cutoff_hz: f64 },
    Highpass { cutoff_hz: f64 },
    Bandpass { low_hz: f64, high_hz: f64 },
}

impl BandFilter {
    /// Design the section cascade for `order` at the signal's sample rate,
    /// then run it forward and backward over the samples (zero phase).
    ///
    /// The output has the same length and sample rate as the input. The
    /// zero net phase shift matters downstream: frame-to-sample alignment
    /// assumes the filtered waveform has no group delay against the raw one.
    pub fn apply(&self, signal: &Signal, order: usize) -> Result<Signal> {
        let sections = self.design(order, signal.sample_rate)?;
        let samples = filtfilt(&sections, &signal.samples, order);
        Ok(Signal::new(samples, signal.sample_rate))
    }

    /// Build the biquad cascade for this filter.
    ///
    /// Cutoffs are normalized to a fraction of Nyquist before design; a
    /// normalized cutoff at or beyond 1.0, or at or below 0.0, is a caller
    /// configuration bug and fails with `InvalidCutoff` instead of being
    /// clamped to something meaningless.
    pub fn design(&self, order: usize, sample_rate: f64) -> Result<Vec<BiquadCoeffs>> {
        if order == 0 {
            return Err(FilterError::InvalidOrder.into());
        }
        let nyquist = 0.5 * sample_rate;
        match *self {
            BandFilter::Lowpass { cutoff_hz } => {
                Ok(lowpass_cascade(normalized(cutoff_hz, nyquist)?, order))
            }
            BandFilter::Highpass { cutoff_hz } => {
                Ok(highpass_cascade(normalized(cutoff_hz, nyquist)?, order))
            }
            BandFilter::Bandpass { low_hz, high_hz } => {
                if low_hz >= high_hz {
                    return Err(FilterError::CutoffPairNotIncreasing { low_hz, high_hz }.into());
                }
                let mut sections = highpass_cascade(normalized(low_hz, nyquist)?, order);
                sections.extend(lowpass_cascade(normalized(high_hz, nyquist)?, order));
                Ok(sections)
            }
        }
    }
}

fn normalized(cutoff_hz: f64, nyquist_hz: f64) -> Result<f64> {
    let w = cutoff_hz / nyquist_hz;
    if !(w > 0.0 && w < 1.0) {
        return Err(FilterError::InvalidCutoff {
            cutoff_hz,
            nyquist_hz,
        }
        .into());
    }
    Ok(w)
}

/// Q values of the second-order sections of an order-`n` Butterworth
/// filter. Odd orders leave one real pole, realized as a first-order
/// section by the cascade builders.
fn section_qs(order: usize) -> Vec<f64> {
    let n = order as f64;
    (0..order / 2)
        .map(|k| {
            let theta = PI * (2.0 * k as f64 + 1.0) / (2.0 * n);
            1.0 / (2.0 * theta.cos())
        })
        .collect()
}

fn lowpass_cascade(normalized_cutoff: f64, order: usize) -> Vec<BiquadCoeffs> {
    let mut sections: Vec<BiquadCoeffs> = section_qs(order)
        .into_iter()
        .map(|q| BiquadCoeffs::lowpass(normalized_cutoff, q))
        .collect();
    if order % 2 == 1 {
        sections.push(BiquadCoeffs::first_order_lowpass(normalized_cutoff));
    }
    sections
}

fn highpass_cascade(normalized_cutoff: f64, order: usize) -> Vec<BiquadCoeffs> {
    let mut sections: Vec<BiquadCoeffs> = section_qs(order)
        .into_iter()
        .map(|q| BiquadCoeffs::highpass(normalized_cutoff, q))
        .collect();
    if order % 2 == 1 {
        sections.push(BiquadCoeffs::first_order_highpass(normalized_cutoff));
    }
    sections
}

/// Forward-backward application of a section cascade.
///
/// The signal is extended on both ends with odd reflections before
/// filtering so the filter state warms up on plausible data instead of
/// zeros; the extensions are discarded afterwards. The extension length
/// scales with the filter order and is capped by the signal length.
fn filtfilt(sections: &[BiquadCoeffs], samples: &[f32], order: usize) -> Vec<f32> {
    if samples.is_empty() {
        return Vec::new();
    }

    let pad = (3 * (2 * order + 1)).min(samples.len() - 1);
    let first = samples[0] as f64;
    let last = samples[samples.len() - 1] as f64;

    let mut extended = Vec::with_capacity(samples.len() + 2 * pad);
    for i in (1..=pad).rev() {
        extended.push(2.0 * first - samples[i] as f64);
    }
    extended.extend(samples.iter().map(|&s| s as f64));
    for i in 1..=pad {
        extended.push(2.0 * last - samples[samples.len() - 1 - i] as f64);
    }

    run_cascade(sections, &mut extended);
    extended.reverse();
    run_cascade(sections, &mut extended);
    extended.reverse();

    extended[pad..pad + samples.len()]
        .iter()
        .map(|&s| s as f32)
        .collect()
}

fn run_cascade(sections: &[BiquadCoeffs], samples: &mut [f64]) {
    for coeffs in sections {
        let mut state = BiquadState::default();
        for sample in samples.iter_mut() {
            *sample = state.process(coeffs, *sample);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VisualizerError;
    use approx::assert_relative_eq;
    use rand::{rngs::SmallRng, Rng, SeedableRng};

    fn sine(freq: f64, sample_rate: f64, seconds: f64) -> Signal {
        let count = (sample_rate * seconds) as usize;
        let samples = (0..count)
            .map(|i| (2.0 * PI * freq * i as f64 / sample_rate).sin() as f32)
            .collect();
        Signal::new(samples, sample_rate)
    }

    #[test]
    fn butterworth_section_qs_match_the_pole_angles() {
        let qs = section_qs(4);
        assert_eq!(qs.len(), 2);
        assert_relative_eq!(qs[0], 0.5412, epsilon = 1e-4);
        assert_relative_eq!(qs[1], 1.3066, epsilon = 1e-4);

        let qs = section_qs(2);
        assert_relative_eq!(qs[0], std::f64::consts::FRAC_1_SQRT_2, epsilon = 1e-12);
    }

    #[test]
    fn cutoff_at_or_beyond_nyquist_is_rejected() {
        let signal = sine(100.0, 8_000.0, 0.25);
        for cutoff_hz in [4_001.0, 4_000.0, 0.0, -10.0] {
            let result = BandFilter::Lowpass { cutoff_hz }.apply(&signal, 4);
            assert!(
                matches!(
                    result,
                    Err(VisualizerError::Filter(FilterError::InvalidCutoff { .. }))
                ),
                "cutoff {cutoff_hz} should be invalid"
            );
        }
    }

    #[test]
    fn bandpass_cutoffs_must_increase() {
        let signal = sine(100.0, 8_000.0, 0.25);
        let result = BandFilter::Bandpass {
            low_hz: 500.0,
            high_hz: 250.0,
        }
        .apply(&signal, 4);
        assert!(matches!(
            result,
            Err(VisualizerError::Filter(
                FilterError::CutoffPairNotIncreasing { .. }
            ))
        ));
    }

    #[test]
    fn zero_order_is_rejected() {
        let signal = sine(100.0, 8_000.0, 0.25);
        let result = BandFilter::Lowpass { cutoff_hz: 1_000.0 }.apply(&signal, 0);
        assert!(matches!(
            result,
            Err(VisualizerError::Filter(FilterError::InvalidOrder))
        ));
    }

    #[test]
    fn output_length_and_rate_match_the_input_for_all_kinds() {
        let mut rng = SmallRng::seed_from_u64(7);
        let samples: Vec<f32> = (0..12_345).map(|_| rng.gen_range(-1.0..1.0)).collect();
        let signal = Signal::new(samples, 44_100.0);

        let filters = [
            BandFilter::Lowpass { cutoff_hz: 250.0 },
            BandFilter::Highpass { cutoff_hz: 4_000.0 },
            BandFilter::Bandpass {
                low_hz: 250.0,
                high_hz: 500.0,
            },
        ];
        for filter in filters {
            for order in [1, 2, 3, 4, 5] {
                let filtered = filter.apply(&signal, order).unwrap();
                assert_eq!(filtered.len(), signal.len());
                assert_eq!(filtered.sample_rate, signal.sample_rate);
            }
        }
    }

    #[test]
    fn passband_sinusoid_keeps_amplitude_and_phase() {
        // 440 Hz sits far below a 2 kHz cutoff; after forward-backward
        // filtering the tone must come through with its amplitude intact
        // and its cross-correlation against the input peaking at lag 0.
        let signal = sine(440.0, 48_000.0, 0.5);
        let filtered = BandFilter::Lowpass { cutoff_hz: 2_000.0 }
            .apply(&signal, 4)
            .unwrap();

        let mid = signal.len() / 3..2 * signal.len() / 3;
        let peak_in = signal.samples[mid.clone()]
            .iter()
            .fold(0.0f32, |acc, &s| acc.max(s.abs()));
        let peak_out = filtered.samples[mid.clone()]
            .iter()
            .fold(0.0f32, |acc, &s| acc.max(s.abs()));
        assert_relative_eq!(peak_out, peak_in, max_relative = 0.01);

        let xcorr = |lag: i64| -> f64 {
            mid.clone()
                .map(|i| {
                    let j = (i as i64 + lag) as usize;
                    signal.samples[i] as f64 * filtered.samples[j] as f64
                })
                .sum()
        };
        let zero_lag = xcorr(0);
        for lag in -8i64..=8 {
            assert!(
                xcorr(lag) <= zero_lag + 1e-9,
                "cross-correlation must peak at lag 0, not {lag}"
            );
        }
    }

    #[test]
    fn stopband_sinusoid_is_strongly_attenuated() {
        // 8 kHz against a 250 Hz low-pass: the squared order-4 response
        // leaves essentially nothing.
        let signal = sine(8_000.0, 48_000.0, 0.25);
        let filtered = BandFilter::Lowpass { cutoff_hz: 250.0 }
            .apply(&signal, 4)
            .unwrap();
        let mid = signal.len() / 3..2 * signal.len() / 3;
        let peak = filtered.samples[mid]
            .iter()
            .fold(0.0f32, |acc, &s| acc.max(s.abs()));
        assert!(peak < 1e-4, "stopband peak {peak} too large");
    }

    #[test]
    fn constant_signal_survives_lowpass_and_dies_in_highpass() {
        let signal = Signal::new(vec![1.0; 8_000], 8_000.0);
        let mid = 3_000..5_000;

        let low = BandFilter::Lowpass { cutoff_hz: 500.0 }
            .apply(&signal, 4)
            .unwrap();
        for &s in &low.samples[mid.clone()] {
            assert_relative_eq!(s, 1.0, epsilon = 1e-3);
        }

        let high = BandFilter::Highpass { cutoff_hz: 500.0 }
            .apply(&signal, 4)
            .unwrap();
        for &s in &high.samples[mid] {
            assert!(s.abs() < 1e-3);
        }
    }

    #[test]
    fn short_signals_are_filtered_without_panicking() {
        for len in [1, 2, 5, 20] {
            let signal = Signal::new(vec![0.5; len], 8_000.0);
            let filtered = BandFilter::Lowpass { cutoff_hz: 1_000.0 }
                .apply(&signal, 4)
                .unwrap();
            assert_eq!(filtered.len(), len);
        }
    }
}
