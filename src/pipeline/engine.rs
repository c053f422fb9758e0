use tracing::{debug, info};

use crate::{
    config::{BandConfig, Config},
    dsp::{BandFilter, FrameAggregator, PerFrameSeries, Signal},
    error::Result,
    timeline::{FrameRange, Timeline, WaveformExtractor},
};

/// The four frequency bars driven by the pipeline, bass to high-mid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Band {
    Bass,
    LowMid,
    Mid,
    HighMid,
}

impl Band {
    pub const ALL: [Band; 4] = [Band::Bass, Band::LowMid, Band::Mid, Band::HighMid];

    /// Label used in rig object and track names
    pub fn label(&self) -> &'static str {
        match self {
            Band::Bass => "Bass",
            Band::LowMid => "Lowmid",
            Band::Mid => "Mid",
            Band::HighMid => "Highmid",
        }
    }
}

/// Five frame-indexed energy series, one per visualizer bar.
#[derive(Debug, Clone)]
pub struct BandEnergies {
    pub total: PerFrameSeries,
    pub bass: PerFrameSeries,
    pub low_mid: PerFrameSeries,
    pub mid: PerFrameSeries,
    pub high_mid: PerFrameSeries,
}

impl BandEnergies {
    pub fn band(&self, band: Band) -> &PerFrameSeries {
        match band {
            Band::Bass => &self.bass,
            Band::LowMid => &self.low_mid,
            Band::Mid => &self.mid,
            Band::HighMid => &self.high_mid,
        }
    }

    /// Number of frames covered by every series
    pub fn frame_count(&self) -> usize {
        self.total.len()
    }
}

/// Sequences extraction, band filtering and frame aggregation.
///
/// The pipeline runs to completion or fails atomically: any error from a
/// stage aborts the run with no partial result, since a partial set of
/// bands is not a usable visualization.
pub struct Pipeline {
    config: Config,
    extractor: WaveformExtractor,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            extractor: WaveformExtractor::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the whole pipeline over `timeline`.
    ///
    /// The band configuration is validated before anything touches the
    /// timeline, so a bad cutoff chain surfaces before extraction and
    /// filtering rather than mid-run.
    pub fn run(&self, timeline: &Timeline) -> Result<BandEnergies> {
        self.config.validate()?;

        info!("Extracting waveform...");
        let signal = self.extractor.extract(timeline, &self.config.project)?;
        info!(
            "   {} samples at {:.1} Hz ({:.2}s)",
            signal.len(),
            signal.sample_rate,
            signal.duration()
        );

        let samples_per_frame = signal.sample_rate / self.config.project.fps;
        let aggregator = FrameAggregator::new(samples_per_frame)?;
        let range = self.config.project.frame_range();
        debug!(
            "Aggregating {:.2} samples per frame over frames {}..={}",
            samples_per_frame, range.start, range.end
        );

        info!(
            "Filtering {} bands at order {}...",
            Band::ALL.len(),
            self.config.bands.filter_order
        );
        let total = aggregator.aggregate(&signal, &range, self.config.bands.normalize)?;
        let bass = self.band_series(Band::Bass, &signal, &aggregator, &range)?;
        let low_mid = self.band_series(Band::LowMid, &signal, &aggregator, &range)?;
        let mid = self.band_series(Band::Mid, &signal, &aggregator, &range)?;
        let high_mid = self.band_series(Band::HighMid, &signal, &aggregator, &range)?;

        info!("Pipeline complete: {} frames per band", total.len());
        Ok(BandEnergies {
            total,
            bass,
            low_mid,
            mid,
            high_mid,
        })
    }

    /// Filter one band out of the raw signal and reduce it to frames.
    ///
    /// Filtering is non-mutating, so every band works from the same
    /// extracted signal; bands cannot interfere with each other.
    fn band_series(
        &self,
        band: Band,
        signal: &Signal,
        aggregator: &FrameAggregator,
        range: &FrameRange,
    ) -> Result<PerFrameSeries> {
        let filter = band_filter(band, &self.config.bands);
        debug!("   {}: {:?}", band.label(), filter);
        let filtered = filter.apply(signal, self.config.bands.filter_order)?;
        aggregator.aggregate(&filtered, range, self.config.bands.normalize)
    }
}

/// Map a band tag to its filter given the configured cutoff chain.
fn band_filter(band: Band, bands: &BandConfig) -> BandFilter {
    match band {
        Band::Bass => BandFilter::Lowpass {
            cutoff_hz: bands.bass_cutoff,
        },
        Band::LowMid => BandFilter::Bandpass {
            low_hz: bands.bass_cutoff,
            high_hz: bands.lowmid_cutoff,
        },
        Band::Mid => BandFilter::Bandpass {
            low_hz: bands.lowmid_cutoff,
            high_hz: bands.highmid_cutoff,
        },
        Band::HighMid => BandFilter::Highpass {
            cutoff_hz: bands.highmid_cutoff,
        },
    }
}
