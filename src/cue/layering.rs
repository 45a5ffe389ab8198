//! Layered cue settings
//!
//! A cue's explicit values win; anything it leaves unset is inherited
//! from its mixer group's defaults, and from the built-in defaults when
//! the cue does not use group data.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::config::{
    default_max_opacity, default_max_size, default_min_opacity, default_min_size,
    default_rms_multiplier, CueConfig, ImageRef,
};

/// Shared defaults for every cue routed through one mixer group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixerGroupDefaults {
    /// Mixer group name, matched against an emitter's output group
    pub name: String,

    #[serde(default)]
    pub image: Option<ImageRef>,

    #[serde(default)]
    pub offset: Vec3,

    #[serde(default = "default_min_opacity")]
    pub min_opacity: f32,

    #[serde(default = "default_max_opacity")]
    pub max_opacity: f32,

    #[serde(default = "default_rms_multiplier")]
    pub rms_multiplier: f32,

    #[serde(default = "default_min_size")]
    pub min_size: f32,

    #[serde(default = "default_max_size")]
    pub max_size: f32,

    #[serde(default)]
    pub opacity_based_on_distance: bool,

    #[serde(default)]
    pub size_based_on_volume: bool,
}

impl MixerGroupDefaults {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl Default for MixerGroupDefaults {
    fn default() -> Self {
        Self {
            name: String::new(),
            image: None,
            offset: Vec3::ZERO,
            min_opacity: default_min_opacity(),
            max_opacity: default_max_opacity(),
            rms_multiplier: default_rms_multiplier(),
            min_size: default_min_size(),
            max_size: default_max_size(),
            opacity_based_on_distance: false,
            size_based_on_volume: false,
        }
    }
}

/// Values a cue sets explicitly
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CueOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<Vec3>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_opacity: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_opacity: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rms_multiplier: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_size: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_size: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity_based_on_distance: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_based_on_volume: Option<bool>,
    /// Replaces the range reported by the emitter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_distance: Option<f32>,
}

impl CueOverrides {
    /// Merge over `group` (or the built-in defaults)
    pub fn resolve_config(&self, group: Option<&MixerGroupDefaults>, emitter_max_distance: f32) -> CueConfig {
        let fallback = MixerGroupDefaults::default();
        let base = group.unwrap_or(&fallback);

        CueConfig {
            offset: self.offset.unwrap_or(base.offset),
            min_opacity: self.min_opacity.unwrap_or(base.min_opacity),
            max_opacity: self.max_opacity.unwrap_or(base.max_opacity),
            min_size: self.min_size.unwrap_or(base.min_size),
            max_size: self.max_size.unwrap_or(base.max_size),
            max_distance: self.max_distance.unwrap_or(emitter_max_distance),
            rms_multiplier: self.rms_multiplier.unwrap_or(base.rms_multiplier),
            size_based_on_volume: self.size_based_on_volume.unwrap_or(base.size_based_on_volume),
            opacity_based_on_distance: self
                .opacity_based_on_distance
                .unwrap_or(base.opacity_based_on_distance),
        }
    }

    /// The image to draw, own first
    pub fn resolve_image<'a>(&'a self, group: Option<&'a MixerGroupDefaults>) -> Option<&'a ImageRef> {
        self.image
            .as_ref()
            .or_else(|| group.and_then(|g| g.image.as_ref()))
    }
}

fn default_enabled() -> bool { true }

/// Authored settings for one cue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CueSettings {
    /// Display name; blank means "use the clip or emitter name"
    #[serde(default)]
    pub name: String,

    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Name of the emitter this cue follows
    #[serde(default)]
    pub emitter: Option<String>,

    /// Inherit unset values from the emitter's mixer group
    #[serde(default)]
    pub use_mixer_group_data: bool,

    #[serde(default)]
    pub overrides: CueOverrides,
}

impl CueSettings {
    pub fn new(emitter: impl Into<String>) -> Self {
        Self {
            name: String::new(),
            enabled: true,
            emitter: Some(emitter.into()),
            use_mixer_group_data: false,
            overrides: CueOverrides::default(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_mixer_group_data(mut self, enabled: bool) -> Self {
        self.use_mixer_group_data = enabled;
        self
    }

    pub fn with_overrides(mut self, overrides: CueOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Label used in logs before the cue has been resolved
    pub fn label(&self) -> &str {
        if !self.name.is_empty() {
            &self.name
        } else {
            self.emitter.as_deref().unwrap_or("<unassigned>")
        }
    }
}
