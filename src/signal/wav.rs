//! WAV file signal
//!
//! Decodes the whole file up front into a mono buffer and loops it.

use anyhow::{bail, Context, Result};
use hound::{SampleFormat, WavReader};
use std::path::Path;

use super::SignalSource;

/// A looping signal read from a WAV file
#[derive(Debug, Clone)]
pub struct WavSignal {
    name: String,
    samples: Vec<f32>,
    sample_rate: u32,
}

impl WavSignal {
    /// Load a WAV file, mixing all channels down to mono
    pub fn open(path: &Path) -> Result<Self> {
        let reader = WavReader::open(path)
            .with_context(|| format!("failed to open WAV file: {:?}", path))?;
        let spec = reader.spec();
        let channels = spec.channels.max(1) as usize;

        let interleaved: Vec<f32> = match spec.sample_format {
            SampleFormat::Float => reader
                .into_samples::<f32>()
                .collect::<Result<_, _>>()
                .context("failed to decode WAV samples")?,
            SampleFormat::Int => {
                let scale = (1_i64 << (spec.bits_per_sample.saturating_sub(1))) as f32;
                reader
                    .into_samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / scale))
                    .collect::<Result<_, _>>()
                    .context("failed to decode WAV samples")?
            }
        };

        if interleaved.is_empty() {
            bail!("WAV file {:?} contains no samples", path);
        }

        let samples = interleaved
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
            .collect();

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "wav".to_string());

        log::debug!("loaded {:?}: {} Hz, {} channel(s)", path, spec.sample_rate, channels);

        Ok(Self {
            name,
            samples,
            sample_rate: spec.sample_rate,
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of mono samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Iterate consecutive, non-overlapping windows from the start
    pub fn windows(&self, size: usize) -> impl Iterator<Item = &[f32]> {
        self.samples.chunks(size.max(1))
    }
}

impl SignalSource for WavSignal {
    fn name(&self) -> &str {
        &self.name
    }

    fn fill_window(&self, time_secs: f64, window: &mut [f32]) {
        let len = self.samples.len();
        let start = (time_secs.max(0.0) * self.sample_rate as f64) as usize;
        for (i, sample) in window.iter_mut().enumerate() {
            *sample = self.samples[(start + i) % len];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::{WavSpec, WavWriter};
    use tempfile::NamedTempFile;

    fn write_wav(path: &Path, channels: u16, frames: &[f32]) {
        let spec = WavSpec {
            channels,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(path, spec).unwrap();
        for &sample in frames {
            writer.write_sample((sample * i16::MAX as f32) as i16).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_open_mono() {
        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), 1, &[0.5; 800]);

        let signal = WavSignal::open(file.path()).unwrap();
        assert_eq!(signal.sample_rate(), 8000);
        assert_eq!(signal.len(), 800);
        assert!((signal.duration_secs() - 0.1).abs() < 1e-9);
        assert!((signal.samples[0] - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_stereo_mixdown() {
        let file = NamedTempFile::new().unwrap();
        // left 0.5, right -0.5 cancels out
        let interleaved: Vec<f32> = (0..400).map(|i| if i % 2 == 0 { 0.5 } else { -0.5 }).collect();
        write_wav(file.path(), 2, &interleaved);

        let signal = WavSignal::open(file.path()).unwrap();
        assert_eq!(signal.len(), 200);
        assert!(signal.samples.iter().all(|s| s.abs() < 1e-3));
    }

    #[test]
    fn test_window_loops() {
        let file = NamedTempFile::new().unwrap();
        let ramp: Vec<f32> = (0..10).map(|i| i as f32 / 20.0).collect();
        write_wav(file.path(), 1, &ramp);

        let signal = WavSignal::open(file.path()).unwrap();
        let mut window = [0.0; 15];
        signal.fill_window(0.0, &mut window);
        assert!((window[10] - window[0]).abs() < 1e-6);
        assert!((window[12] - window[2]).abs() < 1e-6);
    }

    #[test]
    fn test_open_missing_file() {
        assert!(WavSignal::open(Path::new("/nonexistent/cue.wav")).is_err());
    }
}
