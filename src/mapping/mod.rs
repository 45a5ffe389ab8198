//! Mapping from emitter, listener and signal to indicator parameters
//!
//! Every function here is pure: given the same inputs it returns the same
//! indicator, independent of any other cue.

mod loudness;
mod mapper;
mod range;
mod screen;
mod visibility;

pub use loudness::{compute_loudness_decibels, rms, SAMPLE_WINDOW};
pub use mapper::{compute_opacity, compute_size, CueInputs, CueMapper, Indicator, Mapper};
pub use range::{
    inverse_lerp, lerp, map_decibels_to_range, map_distance_to_range, DecibelRangeMapper,
    DistanceRangeMapper, DECIBEL_CEILING, DECIBEL_FLOOR,
};
pub use screen::{compute_screen_position, CameraPose, Projector, Viewport};
pub use visibility::{compute_visibility, ActivationEdge, Edge};
