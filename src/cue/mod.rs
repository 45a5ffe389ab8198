//! Cue configuration and state
//!
//! A cue ties one emitter to an on-screen indicator. Its authored
//! settings are layered over mixer-group defaults to produce a
//! [`CueConfig`] that the mapper reads every frame.

mod config;
mod layering;
mod state;

pub use config::{CueConfig, ImageRef, Rgb};
pub use layering::{CueOverrides, CueSettings, MixerGroupDefaults};
pub use state::CueRuntimeState;
