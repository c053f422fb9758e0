use tracing::debug;

use super::types::{SoundClip, Timeline};
use crate::config::ProjectConfig;
use crate::dsp::Signal;
use crate::error::{Result, TimelineError};

/// Policy for choosing the clip that feeds the pipeline.
///
/// Mixing multiple clips is unsupported: exactly one clip is read per run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClipSelection {
    /// The first clip in timeline order that is an unmuted sound clip
    /// overlapping the project frame range.
    #[default]
    FirstEligible,
}

/// Pulls one mono signal out of the timeline for the project frame range.
#[derive(Debug, Clone, Copy, Default)]
pub struct WaveformExtractor {
    selection: ClipSelection,
}

impl WaveformExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selection(selection: ClipSelection) -> Self {
        Self { selection }
    }

    /// Extract the timeline-visible portion of the selected clip's audio.
    ///
    /// Clip bounds are clamped to the project frame range on both ends, so
    /// the signal spans exactly the visible part of the clip. The sample
    /// rate is derived from the extracted span (`sample_count / duration`)
    /// rather than taken from the source audio, since the host may have
    /// resampled the clip; all downstream Nyquist and samples-per-frame
    /// math must use the derived rate.
    pub fn extract(&self, timeline: &Timeline, project: &ProjectConfig) -> Result<Signal> {
        let clip = self
            .select_clip(timeline, project)
            .ok_or(TimelineError::NoAudioSource)?;

        let fps = project.fps;
        let start_frame = clip.start_frame.max(project.frame_start);
        let end_frame = clip.end_frame.min(project.frame_end);
        let start_time = start_frame as f64 / fps;
        let end_time = end_frame as f64 / fps;

        let samples = clip.window(start_time, end_time, fps);
        if samples.is_empty() {
            return Err(TimelineError::EmptyWindow {
                name: clip.name.clone(),
            }
            .into());
        }

        let sample_rate = samples.len() as f64 / (end_time - start_time);
        debug!(
            "Extracted {} samples from '{}' over {:.2}s-{:.2}s, derived rate {:.1} Hz",
            samples.len(),
            clip.name,
            start_time,
            end_time,
            sample_rate
        );

        Ok(Signal::new(samples, sample_rate))
    }

    fn select_clip<'a>(
        &self,
        timeline: &'a Timeline,
        project: &ProjectConfig,
    ) -> Option<&'a SoundClip> {
        match self.selection {
            ClipSelection::FirstEligible => timeline.sound_clips().find(|sound| {
                !sound.muted
                    && sound.start_frame < project.frame_end
                    && sound.end_frame > project.frame_start
            }),
        }
    }
}
