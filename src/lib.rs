//! audiocue - On-screen indicators for off-screen and distant sounds
//!
//! Maps a sound emitter's position and live loudness to a screen-space
//! waypoint that stays inside the viewport, flips sides when the source
//! is behind the viewer, and fades or grows with distance or volume.

pub mod camera;
pub mod config;
pub mod cue;
pub mod engine;
pub mod error;
pub mod mapping;
pub mod scene;
pub mod signal;
pub mod viz;

pub use config::SceneConfig;
pub use cue::{CueConfig, CueSettings, MixerGroupDefaults};
pub use engine::{Controller, FrameInput, FrameReport};
pub use error::CueError;
pub use mapping::{CueMapper, Indicator};
pub use scene::Scene;
