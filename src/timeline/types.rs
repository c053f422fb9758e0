/// An inclusive span of animation frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRange {
    pub start: i64,
    pub end: i64,
}

impl FrameRange {
    /// Callers guarantee `start <= end`; configuration validation enforces
    /// it before a range ever reaches the pipeline.
    pub fn new(start: i64, end: i64) -> Self {
        debug_assert!(start <= end, "frame range must not be empty");
        Self { start, end }
    }

    /// Number of frames, both ends included
    pub fn frame_count(&self) -> usize {
        (self.end - self.start + 1).max(0) as usize
    }

    pub fn contains(&self, frame: i64) -> bool {
        (self.start..=self.end).contains(&frame)
    }
}

/// A sound strip positioned on the timeline.
///
/// Samples are interleaved, `channels` per sampling instant, and represent
/// audio that starts playing at `start_frame`.
#[derive(Debug, Clone)]
pub struct SoundClip {
    pub name: String,
    pub muted: bool,
    pub channels: u16,
    /// Sample rate of the stored samples, in Hz
    pub sample_rate: u32,
    pub samples: Vec<f32>,
    pub start_frame: i64,
    pub end_frame: i64,
}

impl SoundClip {
    /// Number of sampling instants (interleaved frames of audio)
    pub fn sample_frames(&self) -> usize {
        self.samples.len() / self.channels.max(1) as usize
    }

    /// Duration of the stored audio in seconds
    pub fn audio_duration(&self) -> f64 {
        self.sample_frames() as f64 / self.sample_rate as f64
    }

    /// Channel-averaged mono samples for an absolute timeline-time window.
    ///
    /// `start_time` and `end_time` are seconds on the project timeline; the
    /// clip starts playing at `start_frame / fps`. The window is clipped to
    /// the stored audio, so asking past either end yields fewer samples
    /// rather than an error.
    pub fn window(&self, start_time: f64, end_time: f64, fps: f64) -> Vec<f32> {
        let clip_start = self.start_frame as f64 / fps;
        let rate = self.sample_rate as f64;
        let total = self.sample_frames() as i64;

        let begin = (((start_time - clip_start) * rate).round() as i64).clamp(0, total) as usize;
        let end = (((end_time - clip_start) * rate).round() as i64).clamp(0, total) as usize;
        if begin >= end {
            return Vec::new();
        }

        let channels = self.channels.max(1) as usize;
        self.samples[begin * channels..end * channels]
            .chunks(channels)
            .map(|instant| instant.iter().sum::<f32>() / channels as f32)
            .collect()
    }
}

/// A non-audio strip (video, image, effect). It occupies timeline space
/// but never contributes to waveform extraction.
#[derive(Debug, Clone)]
pub struct OtherClip {
    pub name: String,
    pub start_frame: i64,
    pub end_frame: i64,
}

#[derive(Debug, Clone)]
pub enum TimelineClip {
    Sound(SoundClip),
    Other(OtherClip),
}

/// An ordered collection of clips. The order is the host's enumeration
/// order and defines clip-selection priority.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    pub clips: Vec<TimelineClip>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, clip: TimelineClip) {
        self.clips.push(clip);
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Sound clips in timeline order, muted or not
    pub fn sound_clips(&self) -> impl Iterator<Item = &SoundClip> {
        self.clips.iter().filter_map(|clip| match clip {
            TimelineClip::Sound(sound) => Some(sound),
            TimelineClip::Other(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn stereo_clip() -> SoundClip {
        // Left channel counts up, right channel counts down; the mono mix
        // of every instant is therefore a constant 2.0.
        let samples = vec![1.0, 3.0, 2.0, 2.0, 3.0, 1.0, 4.0, 0.0];
        SoundClip {
            name: "test".into(),
            muted: false,
            channels: 2,
            sample_rate: 4,
            samples,
            start_frame: 0,
            end_frame: 24,
        }
    }

    #[test]
    fn frame_range_is_inclusive_on_both_ends() {
        let range = FrameRange::new(1, 250);
        assert_eq!(range.frame_count(), 250);
        assert!(range.contains(1));
        assert!(range.contains(250));
        assert!(!range.contains(251));
    }

    #[test]
    fn timelines_enumerate_sound_clips_in_order() {
        let mut timeline = Timeline::new();
        assert!(timeline.is_empty());
        timeline.push(TimelineClip::Other(OtherClip {
            name: "titles".into(),
            start_frame: 0,
            end_frame: 10,
        }));
        timeline.push(TimelineClip::Sound(stereo_clip()));
        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline.sound_clips().count(), 1);
    }

    #[test]
    fn window_averages_channels_to_mono() {
        let clip = stereo_clip();
        let mono = clip.window(0.0, 1.0, 24.0);
        assert_eq!(mono, vec![2.0, 2.0, 2.0, 2.0]);
    }

    #[test]
    fn window_is_clipped_to_the_stored_audio() {
        let clip = stereo_clip();
        // The clip holds one second of audio; asking for three returns one.
        let mono = clip.window(0.0, 3.0, 24.0);
        assert_eq!(mono.len(), 4);

        // A window entirely before the clip is empty.
        assert!(clip.window(-2.0, -1.0, 24.0).is_empty());
    }

    #[test]
    fn window_respects_the_clip_position() {
        let mut clip = stereo_clip();
        clip.start_frame = 24; // clip starts at t = 1s
        let mono = clip.window(1.0, 1.5, 24.0);
        assert_eq!(mono, vec![2.0, 2.0]);
    }

    #[test]
    fn clip_duration_comes_from_sample_frames() {
        let clip = stereo_clip();
        assert_eq!(clip.sample_frames(), 4);
        assert_relative_eq!(clip.audio_duration(), 1.0);
    }
}
