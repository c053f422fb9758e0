use crate::config::AnimationConfig;
use crate::dsp::PerFrameSeries;
use crate::pipeline::{Band, BandEnergies};

/// One keyframed scalar at one animation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe {
    pub frame: i64,
    pub value: f32,
}

/// A named sequence of keyframes, one per frame of the project range.
///
/// The target name addresses an object property in the host scene, e.g.
/// the height scale of the bar named `Visualizer_Bass`.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeTrack {
    pub target: String,
    pub keyframes: Vec<Keyframe>,
}

impl KeyframeTrack {
    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }
}

/// Turns aggregated band energies into keyframe tracks for a bar rig.
///
/// Each energy value maps through `abs(value * volume_scale) +
/// volume_offset`, so bars always extend upward from a small base height
/// no matter the sign of the underlying waveform mean.
#[derive(Debug, Clone)]
pub struct BarRig {
    /// Rig name; track targets are `<name>_Total`, `<name>_Bass`, ...
    pub name: String,

    /// Tells the consumer to discard a previous rig of the same name
    /// before applying these tracks. The scene store lives host-side, so
    /// this is surfaced rather than acted on here.
    pub replace: bool,

    pub volume_scale: f64,
    pub volume_offset: f64,
}

impl BarRig {
    pub fn from_config(animation: &AnimationConfig) -> Self {
        Self {
            name: animation.name.clone(),
            replace: animation.replace,
            volume_scale: animation.volume_scale,
            volume_offset: animation.volume_offset,
        }
    }

    /// Build the five bar tracks, total first, then bass through high-mid.
    pub fn build_tracks(&self, energies: &BandEnergies) -> Vec<KeyframeTrack> {
        let mut tracks = Vec::with_capacity(1 + Band::ALL.len());
        tracks.push(self.track("Total", &energies.total));
        for band in Band::ALL {
            tracks.push(self.track(band.label(), energies.band(band)));
        }
        tracks
    }

    fn track(&self, suffix: &str, series: &PerFrameSeries) -> KeyframeTrack {
        let keyframes = series
            .values
            .iter()
            .enumerate()
            .map(|(i, &value)| Keyframe {
                frame: series.start_frame + i as i64,
                value: (value as f64 * self.volume_scale).abs() as f32
                    + self.volume_offset as f32,
            })
            .collect();

        KeyframeTrack {
            target: format!("{}_{}", self.name, suffix),
            keyframes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::PerFrameSeries;
    use approx::assert_abs_diff_eq;

    fn series(start_frame: i64, values: Vec<f32>) -> PerFrameSeries {
        PerFrameSeries {
            start_frame,
            values,
        }
    }

    fn energies() -> BandEnergies {
        BandEnergies {
            total: series(1, vec![0.5, -0.5, 0.0]),
            bass: series(1, vec![0.1, 0.2, 0.3]),
            low_mid: series(1, vec![0.0; 3]),
            mid: series(1, vec![0.0; 3]),
            high_mid: series(1, vec![0.0; 3]),
        }
    }

    fn rig() -> BarRig {
        BarRig {
            name: "Visualizer".into(),
            replace: false,
            volume_scale: 10.0,
            volume_offset: 0.1,
        }
    }

    #[test]
    fn tracks_are_named_after_the_rig() {
        let tracks = rig().build_tracks(&energies());
        let names: Vec<&str> = tracks.iter().map(|t| t.target.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Visualizer_Total",
                "Visualizer_Bass",
                "Visualizer_Lowmid",
                "Visualizer_Mid",
                "Visualizer_Highmid",
            ]
        );
    }

    #[test]
    fn every_frame_of_the_range_is_keyed() {
        let tracks = rig().build_tracks(&energies());
        for track in &tracks {
            assert_eq!(track.len(), 3);
            assert_eq!(track.keyframes[0].frame, 1);
            assert_eq!(track.keyframes[2].frame, 3);
        }
    }

    #[test]
    fn values_map_through_scale_magnitude_and_offset() {
        let tracks = rig().build_tracks(&energies());
        let total = &tracks[0];

        // 0.5 * 10 -> 5, plus the 0.1 base height
        assert_abs_diff_eq!(total.keyframes[0].value, 5.1, epsilon = 1e-6);
        // Negative means fold upward: |-0.5 * 10| + 0.1
        assert_abs_diff_eq!(total.keyframes[1].value, 5.1, epsilon = 1e-6);
        // Silence leaves the base height
        assert_abs_diff_eq!(total.keyframes[2].value, 0.1, epsilon = 1e-6);
    }

    #[test]
    fn replace_flag_carries_from_config() {
        let mut config = crate::config::AnimationConfig::default();
        config.replace = true;
        config.name = "Bars".into();
        let rig = BarRig::from_config(&config);
        assert!(rig.replace);
        assert_eq!(rig.name, "Bars");
    }
}
