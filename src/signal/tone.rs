//! Generated test tones

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::{SignalSource, DEFAULT_SAMPLE_RATE};

/// Waveform types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Waveform {
    Sine,
    Triangle,
    Saw,
    Square,
    /// White noise, seeded from the sample index
    Noise,
}

/// A periodic tone with optional on/off pulsing
#[derive(Debug, Clone)]
pub struct Tone {
    name: String,
    waveform: Waveform,
    frequency: f64,
    amplitude: f32,
    sample_rate: u32,
    /// Seconds per on/off cycle; `None` plays continuously
    pulse_period: Option<f64>,
}

impl Tone {
    pub fn new(name: impl Into<String>, waveform: Waveform, frequency: f64, amplitude: f32) -> Self {
        Self {
            name: name.into(),
            waveform,
            frequency,
            amplitude,
            sample_rate: DEFAULT_SAMPLE_RATE,
            pulse_period: None,
        }
    }

    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate.max(1);
        self
    }

    /// Sound for the first half of every `period` seconds
    pub fn with_pulse(mut self, period: f64) -> Self {
        self.pulse_period = (period > 0.0).then_some(period);
        self
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    fn is_sounding(&self, time: f64) -> bool {
        match self.pulse_period {
            Some(period) => time.rem_euclid(period) < period / 2.0,
            None => true,
        }
    }

    fn sample_at(&self, index: u64) -> f64 {
        let phase = (index as f64 * self.frequency / self.sample_rate as f64).fract();
        match self.waveform {
            Waveform::Sine => (phase * 2.0 * PI).sin(),
            Waveform::Triangle => 1.0 - 4.0 * (phase - 0.5).abs(),
            Waveform::Saw => 2.0 * phase - 1.0,
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Noise => {
                // xorshift over the index keeps noise replayable
                let mut x = index.wrapping_mul(0x9E37_79B9_7F4A_7C15) | 1;
                x ^= x << 13;
                x ^= x >> 7;
                x ^= x << 17;
                (x as f64 / u64::MAX as f64) * 2.0 - 1.0
            }
        }
    }
}

impl SignalSource for Tone {
    fn name(&self) -> &str {
        &self.name
    }

    fn fill_window(&self, time_secs: f64, window: &mut [f32]) {
        let start = (time_secs.max(0.0) * self.sample_rate as f64) as u64;
        let step = 1.0 / self.sample_rate as f64;
        for (i, sample) in window.iter_mut().enumerate() {
            let time = time_secs + i as f64 * step;
            *sample = if self.is_sounding(time) {
                self.sample_at(start + i as u64) as f32 * self.amplitude
            } else {
                0.0
            };
        }
    }
}
