//! Resolved per-cue configuration

use glam::Vec3;
use serde::{Deserialize, Serialize};

pub(crate) fn default_min_opacity() -> f32 { 0.2 }
pub(crate) fn default_max_opacity() -> f32 { 1.0 }
pub(crate) fn default_min_size() -> f32 { 100.0 }
pub(crate) fn default_max_size() -> f32 { 200.0 }
pub(crate) fn default_rms_multiplier() -> f32 { 50.0 }
pub(crate) fn default_max_distance() -> f32 { 500.0 }

/// An RGB color with components in `0..1`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb(pub [f32; 3]);

impl Rgb {
    pub const WHITE: Rgb = Rgb([1.0, 1.0, 1.0]);

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self([r, g, b])
    }

    pub fn r(&self) -> f32 { self.0[0] }
    pub fn g(&self) -> f32 { self.0[1] }
    pub fn b(&self) -> f32 { self.0[2] }

    /// Combine with an alpha channel
    pub fn with_alpha(&self, alpha: f32) -> [f32; 4] {
        [self.0[0], self.0[1], self.0[2], alpha]
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::WHITE
    }
}

/// The image drawn for a cue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Name the host uses to look up the image asset
    pub name: String,

    /// Tint; the alpha channel is driven by the cue's opacity
    #[serde(default)]
    pub color: Rgb,
}

impl ImageRef {
    pub fn new(name: impl Into<String>, color: Rgb) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }
}

/// Fully resolved settings for one cue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CueConfig {
    /// Added to the emitter position before projecting to the screen
    pub offset: Vec3,
    pub min_opacity: f32,
    pub max_opacity: f32,
    /// Indicator size in pixels
    pub min_size: f32,
    pub max_size: f32,
    /// The cue is hidden at or beyond this distance from the listener
    pub max_distance: f32,
    /// Loudness sensitivity applied before decibel conversion
    pub rms_multiplier: f32,
    pub size_based_on_volume: bool,
    pub opacity_based_on_distance: bool,
}

impl Default for CueConfig {
    fn default() -> Self {
        Self {
            offset: Vec3::ZERO,
            min_opacity: default_min_opacity(),
            max_opacity: default_max_opacity(),
            min_size: default_min_size(),
            max_size: default_max_size(),
            max_distance: default_max_distance(),
            rms_multiplier: default_rms_multiplier(),
            size_based_on_volume: false,
            opacity_based_on_distance: false,
        }
    }
}

impl CueConfig {
    /// Check the value ranges
    ///
    /// A zero `max_distance` passes: mapping treats it as a degenerate
    /// range and falls back to the lower bounds.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.min_opacity) || !(0.0..=1.0).contains(&self.max_opacity) {
            return Err(format!(
                "opacity range {}..{} must lie within 0..1",
                self.min_opacity, self.max_opacity
            ));
        }
        if self.min_opacity > self.max_opacity {
            return Err(format!(
                "min_opacity {} exceeds max_opacity {}",
                self.min_opacity, self.max_opacity
            ));
        }
        if self.min_size <= 0.0 {
            return Err(format!("min_size {} must be positive", self.min_size));
        }
        if self.min_size > self.max_size {
            return Err(format!(
                "min_size {} exceeds max_size {}",
                self.min_size, self.max_size
            ));
        }
        if self.max_distance.is_nan() || self.max_distance < 0.0 {
            return Err(format!("max_distance {} must not be negative", self.max_distance));
        }
        if self.rms_multiplier.is_nan() || self.rms_multiplier <= 0.0 {
            return Err(format!(
                "rms_multiplier {} must be positive",
                self.rms_multiplier
            ));
        }
        if !self.offset.is_finite() {
            return Err("offset must be finite".to_string());
        }
        Ok(())
    }
}
