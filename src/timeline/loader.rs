use std::fs::File;
use std::path::Path;

use symphonia::core::audio::{AudioBufferRef, Signal as SymphoniaSignal};
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use super::types::SoundClip;
use crate::error::{LoadError, Result};

/// Decodes audio files into timeline clips.
///
/// The clip is positioned at `start_frame` and its `end_frame` is computed
/// from the decoded duration at the project frame rate.
pub struct ClipLoader;

impl ClipLoader {
    pub fn load<P: AsRef<Path>>(path: P, start_frame: i64, fps: f64) -> Result<SoundClip> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "wav" => Self::load_wav(path, start_frame, fps),
            "mp3" | "flac" | "ogg" | "m4a" | "aac" => {
                Self::load_with_symphonia(path, start_frame, fps)
            }
            _ => Err(LoadError::UnsupportedFormat { format: extension }.into()),
        }
    }

    /// Load WAV files using the hound crate (most reliable for WAV)
    fn load_wav(path: &Path, start_frame: i64, fps: f64) -> Result<SoundClip> {
        let reader = hound::WavReader::open(path).map_err(|_| LoadError::LoadFailed {
            path: path.display().to_string(),
        })?;

        let spec = reader.spec();
        let samples: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => reader
                .into_samples::<f32>()
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|_| LoadError::LoadFailed {
                    path: path.display().to_string(),
                })?,
            hound::SampleFormat::Int => {
                let bit_depth = spec.bits_per_sample;
                let ints: std::result::Result<Vec<i32>, _> = reader.into_samples().collect();
                ints.map_err(|_| LoadError::LoadFailed {
                    path: path.display().to_string(),
                })?
                .into_iter()
                .map(|sample| Self::int_to_float(sample, bit_depth))
                .collect()
            }
        };

        Ok(Self::clip_from_samples(
            path,
            samples,
            spec.sample_rate,
            spec.channels,
            start_frame,
            fps,
        ))
    }

    /// Load various formats using Symphonia
    fn load_with_symphonia(path: &Path, start_frame: i64, fps: f64) -> Result<SoundClip> {
        let file = File::open(path).map_err(|_| LoadError::LoadFailed {
            path: path.display().to_string(),
        })?;
        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        let mut hint = Hint::new();
        if let Some(extension) = path.extension().and_then(|ext| ext.to_str()) {
            hint.with_extension(extension);
        }

        let meta_opts: MetadataOptions = Default::default();
        let fmt_opts: FormatOptions = Default::default();
        let probed = symphonia::default::get_probe()
            .format(&hint, mss, &fmt_opts, &meta_opts)
            .map_err(|_| LoadError::LoadFailed {
                path: path.display().to_string(),
            })?;

        let mut format = probed.format;
        let track = format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or_else(|| LoadError::LoadFailed {
                path: path.display().to_string(),
            })?;
        let track_id = track.id;

        let codec_params = &track.codec_params;
        let sample_rate = codec_params
            .sample_rate
            .ok_or_else(|| LoadError::InvalidParameters {
                details: "no sample rate found".to_string(),
            })?;
        let channels = codec_params
            .channels
            .ok_or_else(|| LoadError::InvalidParameters {
                details: "no channel information found".to_string(),
            })?
            .count() as u16;

        let dec_opts: DecoderOptions = Default::default();
        let mut decoder = symphonia::default::get_codecs()
            .make(codec_params, &dec_opts)
            .map_err(|_| LoadError::LoadFailed {
                path: path.display().to_string(),
            })?;

        let mut samples = Vec::new();
        loop {
            let packet = match format.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::ResetRequired) => {
                    decoder.reset();
                    continue;
                }
                Err(_) => break, // end of stream
            };

            if packet.track_id() != track_id {
                continue;
            }

            match decoder.decode(&packet) {
                Ok(decoded) => Self::append_interleaved(&decoded, &mut samples),
                Err(SymphoniaError::DecodeError(_)) => continue,
                Err(_) => break,
            }
        }

        Ok(Self::clip_from_samples(
            path,
            samples,
            sample_rate,
            channels,
            start_frame,
            fps,
        ))
    }

    fn clip_from_samples(
        path: &Path,
        samples: Vec<f32>,
        sample_rate: u32,
        channels: u16,
        start_frame: i64,
        fps: f64,
    ) -> SoundClip {
        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("clip")
            .to_string();
        let sample_frames = samples.len() / channels.max(1) as usize;
        let duration = sample_frames as f64 / sample_rate as f64;
        let end_frame = start_frame + (duration * fps).round() as i64;

        SoundClip {
            name,
            muted: false,
            channels,
            sample_rate,
            samples,
            start_frame,
            end_frame,
        }
    }

    /// Convert integer sample to float (-1.0 to 1.0)
    fn int_to_float(sample: i32, bit_depth: u16) -> f32 {
        match bit_depth {
            8 => (sample as f32 - 128.0) / 128.0,
            16 => sample as f32 / 32768.0,
            24 => sample as f32 / 8388608.0,
            32 => sample as f32 / 2147483648.0,
            _ => sample as f32 / 32768.0,
        }
    }

    /// Interleave a decoded Symphonia buffer into f32 samples
    fn append_interleaved(buffer: &AudioBufferRef, output: &mut Vec<f32>) {
        macro_rules! interleave {
            ($buf:expr, $convert:expr) => {{
                let channels = $buf.spec().channels.count();
                let frames = $buf.frames();
                for frame_idx in 0..frames {
                    for ch in 0..channels {
                        output.push($convert($buf.chan(ch)[frame_idx]));
                    }
                }
            }};
        }

        match buffer {
            AudioBufferRef::F32(buf) => interleave!(buf, |s: f32| s),
            AudioBufferRef::F64(buf) => interleave!(buf, |s: f64| s as f32),
            AudioBufferRef::S32(buf) => interleave!(buf, |s: i32| s as f32 / 2147483648.0),
            AudioBufferRef::S16(buf) => interleave!(buf, |s: i16| s as f32 / 32768.0),
            _ => {
                tracing::warn!("unsupported audio buffer format, skipping packet");
            }
        }
    }
}
