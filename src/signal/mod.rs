//! Amplitude signals feeding the loudness measurement
//!
//! A signal fills a sample window for a given point in time. Windows are
//! a pure function of time, so replaying a frame yields the same samples.

mod tone;
mod wav;

pub use tone::{Tone, Waveform};
pub use wav::WavSignal;

/// Sample rate assumed for generated signals
pub const DEFAULT_SAMPLE_RATE: u32 = 48_000;

/// Trait for amplitude sources
pub trait SignalSource: Send {
    /// Get the name of this source
    fn name(&self) -> &str;

    /// Fill `window` with the samples starting at `time_secs`
    fn fill_window(&self, time_secs: f64, window: &mut [f32]);
}

/// A source that never makes a sound
#[derive(Debug, Clone, Default)]
pub struct Silence;

impl SignalSource for Silence {
    fn name(&self) -> &str {
        "silence"
    }

    fn fill_window(&self, _time_secs: f64, window: &mut [f32]) {
        window.fill(0.0);
    }
}
