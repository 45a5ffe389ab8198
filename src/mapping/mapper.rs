//! Mapper trait and the per-cue mapping pass

use glam::{Vec2, Vec3};
use serde::Serialize;

use super::{
    compute_loudness_decibels, compute_screen_position, compute_visibility, CameraPose,
    DecibelRangeMapper, DistanceRangeMapper, Projector, Viewport,
};
use crate::cue::CueConfig;
use crate::error::CueError;

/// Trait for mapping functions
pub trait Mapper: Send + Sync {
    /// Get the name of this mapper
    fn name(&self) -> &str;

    /// Map an input value to an output value
    fn map(&self, input: f32) -> f32;
}

/// Opacity for this frame, by distance or by loudness
pub fn compute_opacity(config: &CueConfig, decibels: f32, distance: f32) -> f32 {
    if config.opacity_based_on_distance {
        DistanceRangeMapper::new(config.max_distance, config.min_opacity, config.max_opacity).map(distance)
    } else {
        DecibelRangeMapper::new(config.min_opacity, config.max_opacity).map(decibels)
    }
}

/// Indicator size for this frame, by loudness or by distance
pub fn compute_size(config: &CueConfig, decibels: f32, distance: f32) -> f32 {
    if config.size_based_on_volume {
        DecibelRangeMapper::new(config.min_size, config.max_size).map(decibels)
    } else {
        DistanceRangeMapper::new(config.max_distance, config.min_size, config.max_size)
            .with_invert(true)
            .map(distance)
    }
}

/// Everything sampled from the host for one cue in one frame
#[derive(Debug, Clone, Copy)]
pub struct CueInputs<'a> {
    pub emitter: Vec3,
    pub listener: Option<Vec3>,
    pub camera: CameraPose,
    pub viewport: Viewport,
    /// Latest amplitude window of the emitter
    pub samples: &'a [f32],
    pub is_playing: bool,
    pub is_muted: bool,
}

/// What the host draws for a visible cue
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Indicator {
    /// Centre in pixels, origin bottom-left
    pub position: Vec2,
    pub opacity: f32,
    /// Edge length in pixels
    pub size: f32,
    pub distance: f32,
    pub decibels: f32,
}

/// Maps one cue's inputs to its indicator
#[derive(Debug, Clone, Copy)]
pub struct CueMapper<'a> {
    config: &'a CueConfig,
}

impl<'a> CueMapper<'a> {
    pub fn new(config: &'a CueConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CueConfig {
        self.config
    }

    /// Visibility for this frame
    pub fn is_visible(&self, inputs: &CueInputs<'_>) -> Result<bool, CueError> {
        let listener = inputs.listener.ok_or(CueError::NoListener)?;
        Ok(compute_visibility(
            inputs.emitter,
            listener,
            self.config,
            inputs.is_playing,
            inputs.is_muted,
        ))
    }

    /// Compute the indicator, or `None` when the cue is hidden
    ///
    /// Size is computed before position since the indicator's extent
    /// bounds where it may sit.
    pub fn evaluate<P: Projector + ?Sized>(
        &self,
        inputs: &CueInputs<'_>,
        projector: &P,
    ) -> Result<Option<Indicator>, CueError> {
        if !self.is_visible(inputs)? {
            return Ok(None);
        }
        let listener = inputs.listener.ok_or(CueError::NoListener)?;

        let distance = inputs.emitter.distance(listener);
        let decibels = compute_loudness_decibels(inputs.samples, self.config.rms_multiplier);
        let opacity = compute_opacity(self.config, decibels, distance);
        let size = compute_size(self.config, decibels, distance);

        let position = compute_screen_position(
            inputs.emitter,
            self.config.offset,
            &inputs.camera,
            projector,
            inputs.viewport,
            Vec2::splat(size / 2.0),
        );

        Ok(Some(Indicator {
            position,
            opacity,
            size,
            distance,
            decibels,
        }))
    }
}
