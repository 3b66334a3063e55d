//! Sample buffers: WAV loading, mono conversion, and linear-interpolation resampling.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SampleError {
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),
    #[error("WAV file contains no samples")]
    Empty,
}

/// A mono sample buffer at a known sample rate.
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl SampleBuffer {
    pub fn from_mono(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Load a WAV file from disk at `target_sample_rate`.
    pub fn load(path: &Path, target_sample_rate: u32) -> Result<Self, SampleError> {
        let file = File::open(path).map_err(|source| SampleError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_wav(BufReader::new(file), target_sample_rate)
    }

    /// Decode WAV data, converting to mono f32 at `target_sample_rate`.
    ///
    /// Integer and float formats are accepted. Channels are averaged; a
    /// different source rate is resampled linearly.
    pub fn from_wav<R: Read + Seek>(
        reader: R,
        target_sample_rate: u32,
    ) -> Result<Self, SampleError> {
        let wav = hound::WavReader::new(reader)?;
        let spec = wav.spec();
        let channels = spec.channels.max(1) as usize;

        let raw: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Int => {
                let full_scale = (1u64 << (spec.bits_per_sample.max(1) - 1)) as f32;
                wav.into_samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / full_scale))
                    .collect::<Result<_, _>>()?
            }
            hound::SampleFormat::Float => wav.into_samples::<f32>().collect::<Result<_, _>>()?,
        };

        let mono: Vec<f32> = raw
            .chunks_exact(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect();
        if mono.is_empty() {
            return Err(SampleError::Empty);
        }

        let samples = if spec.sample_rate == target_sample_rate {
            mono
        } else {
            resample_linear(&mono, spec.sample_rate, target_sample_rate)
        };

        Ok(Self {
            samples,
            sample_rate: target_sample_rate,
        })
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Freeze into a buffer the mixer can share without copying.
    pub fn into_shared(self) -> Arc<[f32]> {
        Arc::from(self.samples)
    }
}

fn resample_linear(input: &[f32], source_rate: u32, target_rate: u32) -> Vec<f32> {
    if input.len() < 2 || source_rate == 0 || target_rate == 0 {
        return input.to_vec();
    }

    let ratio = source_rate as f64 / target_rate as f64;
    let output_len = (input.len() as f64 / ratio).ceil() as usize;
    let last = input.len() - 1;

    (0..output_len)
        .map(|i| {
            let pos = i as f64 * ratio;
            let idx = (pos as usize).min(last);
            let frac = (pos - idx as f64) as f32;
            match input.get(idx + 1) {
                Some(&next) => input[idx] * (1.0 - frac) + next * frac,
                None => input[idx],
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn wav_i16(samples: &[i16], sample_rate: u32, channels: u16) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::new(&mut buf, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
        buf.into_inner()
    }

    fn wav_f32(samples: &[f32], sample_rate: u32, channels: u16) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let mut writer = hound::WavWriter::new(&mut buf, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
        buf.into_inner()
    }

    #[test]
    fn decodes_16bit_int() {
        let wav = wav_i16(&[0, 16384, -16384], 44100, 1);
        let buf = SampleBuffer::from_wav(Cursor::new(wav), 44100).unwrap();
        assert_eq!(buf.len(), 3);
        assert!((buf.samples()[1] - 0.5).abs() < 1e-3);
        assert!((buf.samples()[2] + 0.5).abs() < 1e-3);
    }

    #[test]
    fn averages_stereo_to_mono() {
        let wav = wav_f32(&[0.8, 0.2, -0.4, -0.6], 48000, 2);
        let buf = SampleBuffer::from_wav(Cursor::new(wav), 48000).unwrap();
        assert_eq!(buf.len(), 2);
        assert!((buf.samples()[0] - 0.5).abs() < 1e-6);
        assert!((buf.samples()[1] + 0.5).abs() < 1e-6);
    }

    #[test]
    fn resamples_to_target_rate() {
        let src: Vec<f32> = (0..100).map(|i| i as f32 / 100.0).collect();
        let buf = SampleBuffer::from_wav(Cursor::new(wav_f32(&src, 22050, 1)), 44100).unwrap();
        assert_eq!(buf.sample_rate(), 44100);
        assert!(buf.len() >= 195 && buf.len() <= 205);
        assert!(buf.samples()[0].abs() < 1e-6);
    }

    #[test]
    fn empty_wav_is_an_error() {
        let result = SampleBuffer::from_wav(Cursor::new(wav_f32(&[], 44100, 1)), 44100);
        assert!(matches!(result, Err(SampleError::Empty)));
    }

    #[test]
    fn garbage_is_a_wav_error() {
        let result = SampleBuffer::from_wav(Cursor::new(b"not a wav".to_vec()), 44100);
        assert!(matches!(result, Err(SampleError::Wav(_))));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = SampleBuffer::load(Path::new("/nonexistent/r_e.wav"), 44100).unwrap_err();
        assert!(err.to_string().contains("r_e.wav"));
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        std::fs::write(&path, wav_i16(&[1000, -1000, 0, 0], 8000, 1)).unwrap();
        let buf = SampleBuffer::load(&path, 8000).unwrap();
        assert_eq!(buf.len(), 4);
    }

    #[test]
    fn resample_edge_cases() {
        assert!(resample_linear(&[], 44100, 22050).is_empty());
        assert_eq!(resample_linear(&[0.5], 44100, 22050), vec![0.5]);
        let halved = resample_linear(&vec![0.25; 100], 44100, 22050);
        assert_eq!(halved.len(), 50);
        assert!(halved.iter().all(|&s| (s - 0.25).abs() < 1e-6));
    }

    #[test]
    fn shared_buffer_keeps_samples() {
        let shared = SampleBuffer::from_mono(vec![0.1, 0.2], 44100).into_shared();
        assert_eq!(&shared[..], &[0.1, 0.2]);
    }
}
