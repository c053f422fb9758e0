use thiserror::Error;

/// Main error type for the bandviz library
#[derive(Error, Debug)]
pub enum VisualizerError {
    #[error("Timeline error: {0}")]
    Timeline(#[from] TimelineError),

    #[error("Audio loading error: {0}")]
    Load(#[from] LoadError),

    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),

    #[error("Aggregation error: {0}")]
    Aggregate(#[from] AggregateError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while selecting and extracting timeline audio
#[derive(Error, Debug)]
pub enum TimelineError {
    #[error("no unmuted sound clip overlaps the project frame range")]
    NoAudioSource,

    #[error("clip '{name}' produced an empty sample window")]
    EmptyWindow { name: String },
}

/// Errors raised while decoding audio files into clips
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to load audio file: {path}")]
    LoadFailed { path: String },

    #[error("unsupported audio format: {format}")]
    UnsupportedFormat { format: String },

    #[error("invalid audio parameters: {details}")]
    InvalidParameters { details: String },
}

/// Errors raised during filter design and application
#[derive(Error, Debug)]
pub enum FilterError {
    #[error("cutoff {cutoff_hz} Hz is outside the open interval (0, {nyquist_hz}) Hz")]
    InvalidCutoff { cutoff_hz: f64, nyquist_hz: f64 },

    #[error("band-pass cutoffs must be increasing: {low_hz} Hz >= {high_hz} Hz")]
    CutoffPairNotIncreasing { low_hz: f64, high_hz: f64 },

    #[error("filter order must be at least 1")]
    InvalidOrder,
}

/// Errors raised while reducing a signal to per-frame energies
#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("cannot normalize a zero-energy series")]
    DegenerateSignal,

    #[error("samples-per-frame must be positive and finite, got {spf}")]
    InvalidSamplesPerFrame { spf: f64 },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("band cutoffs must be strictly increasing: {details}")]
    CutoffsNotIncreasing { details: String },
}

/// Convenience type alias for Results using VisualizerError
pub type Result<T> = std::result::Result<T, VisualizerError>;

impl VisualizerError {
    /// Pipeline stage that produced the error, for run failure reports.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Config(_) => "configuration",
            Self::Load(_) => "audio loading",
            Self::Timeline(_) => "waveform extraction",
            Self::Filter(_) => "band filtering",
            Self::Aggregate(_) => "frame aggregation",
            Self::Io(_) => "io",
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Timeline(TimelineError::NoAudioSource) => {
                "No usable audio found. Add an unmuted sound clip that overlaps the project frame range.".to_string()
            }
            Self::Load(LoadError::LoadFailed { path }) => {
                format!("Could not load audio file '{path}'. Please check the file exists and is a supported format.")
            }
            Self::Filter(FilterError::InvalidCutoff { cutoff_hz, nyquist_hz }) => {
                format!("Band cutoff {cutoff_hz} Hz cannot be represented at this sample rate (Nyquist: {nyquist_hz} Hz). Lower the cutoff or use audio with a higher sample rate.")
            }
            Self::Aggregate(AggregateError::DegenerateSignal) => {
                "The clip is silent over the selected frame range; disable normalization or choose another clip.".to_string()
            }
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_names_follow_pipeline_order() {
        let err: VisualizerError = TimelineError::NoAudioSource.into();
        assert_eq!(err.stage(), "waveform extraction");

        let err: VisualizerError = FilterError::InvalidOrder.into();
        assert_eq!(err.stage(), "band filtering");

        let err: VisualizerError = AggregateError::DegenerateSignal.into();
        assert_eq!(err.stage(), "frame aggregation");
    }

    #[test]
    fn user_message_mentions_nyquist_for_bad_cutoffs() {
        let err: VisualizerError = FilterError::InvalidCutoff {
            cutoff_hz: 4001.0,
            nyquist_hz: 4000.0,
        }
        .into();
        assert!(err.user_message().contains("4001"));
        assert!(err.user_message().contains("4000"));
    }
}
