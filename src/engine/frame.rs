//! Per-frame inputs and outputs of the controller

use glam::Vec3;
use serde::Serialize;

use crate::mapping::{CameraPose, Edge, Indicator, Viewport};

/// One emitter as sampled by the host this frame
#[derive(Debug, Clone, PartialEq)]
pub struct EmitterFrame {
    pub name: String,
    /// Name of the clip being played, if any
    pub clip: Option<String>,
    pub position: Vec3,
    /// Audible range reported by the audio source
    pub max_distance: f32,
    /// Mixer group the emitter outputs to
    pub output_group: Option<String>,
    pub is_playing: bool,
    pub is_muted: bool,
    /// Latest amplitude window
    pub samples: Vec<f32>,
}

impl EmitterFrame {
    pub fn new(name: impl Into<String>, position: Vec3) -> Self {
        Self {
            name: name.into(),
            clip: None,
            position,
            max_distance: 500.0,
            output_group: None,
            is_playing: true,
            is_muted: false,
            samples: Vec::new(),
        }
    }

    pub fn with_clip(mut self, clip: impl Into<String>) -> Self {
        self.clip = Some(clip.into());
        self
    }

    pub fn with_max_distance(mut self, max_distance: f32) -> Self {
        self.max_distance = max_distance;
        self
    }

    pub fn with_output_group(mut self, group: impl Into<String>) -> Self {
        self.output_group = Some(group.into());
        self
    }

    pub fn with_samples(mut self, samples: Vec<f32>) -> Self {
        self.samples = samples;
        self
    }

    /// Display name for a cue that has none of its own
    pub fn display_name(&self) -> &str {
        self.clip.as_deref().unwrap_or(&self.name)
    }
}

/// Everything the host supplies for one frame
#[derive(Debug, Clone)]
pub struct FrameInput<'a> {
    /// `None` when the scene has no listener
    pub listener: Option<Vec3>,
    pub camera: CameraPose,
    pub viewport: Viewport,
    pub emitters: &'a [EmitterFrame],
}

impl<'a> FrameInput<'a> {
    pub fn emitter(&self, name: &str) -> Option<&'a EmitterFrame> {
        self.emitters.iter().find(|e| e.name == name)
    }
}

/// Output for one cue
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CueFrame {
    pub cue: String,
    pub active: bool,
    /// Present iff `active`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indicator: Option<Indicator>,
    /// Base color with opacity as alpha
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<[f32; 4]>,
    /// Image asset to draw
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl CueFrame {
    pub fn inactive(cue: impl Into<String>) -> Self {
        Self {
            cue: cue.into(),
            active: false,
            indicator: None,
            color: None,
            image: None,
        }
    }
}

/// Visibility transition, telling the host to create or destroy a visual
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CueEvent {
    pub cue: String,
    pub kind: CueEventKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CueEventKind {
    Activated,
    Deactivated,
}

impl From<Edge> for CueEventKind {
    fn from(edge: Edge) -> Self {
        match edge {
            Edge::Activated => Self::Activated,
            Edge::Deactivated => Self::Deactivated,
        }
    }
}

/// A cue that could not be updated this frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedCue {
    pub cue: String,
    pub reason: String,
}

/// Result of one controller pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FrameReport {
    pub frame: u64,
    pub cues: Vec<CueFrame>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<CueEvent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedCue>,
}

impl FrameReport {
    pub fn active_count(&self) -> usize {
        self.cues.iter().filter(|c| c.active).count()
    }

    pub fn cue(&self, name: &str) -> Option<&CueFrame> {
        self.cues.iter().find(|c| c.cue == name)
    }
}
