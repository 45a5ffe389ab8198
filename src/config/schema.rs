//! Configuration schema definitions

use anyhow::{bail, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

use crate::cue::{CueSettings, MixerGroupDefaults};
use crate::mapping::Viewport;
use crate::signal::Waveform;

/// A scene driven frame by frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Screen size in pixels (default: 1920x1080)
    #[serde(default = "default_viewport")]
    pub viewport: Viewport,

    /// Frames per second of simulated time (default: 60)
    #[serde(default = "default_frame_rate")]
    pub frame_rate: f32,

    #[serde(default)]
    pub camera: CameraConfig,

    #[serde(default)]
    pub listener: ListenerConfig,

    /// Master switch for all cues
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Shared defaults per mixer group
    #[serde(default)]
    pub mixer_groups: Vec<MixerGroupDefaults>,

    /// Sound sources in the scene
    #[serde(default)]
    pub emitters: Vec<EmitterConfig>,

    /// Indicators, each following one emitter
    #[serde(default)]
    pub cues: Vec<CueSettings>,
}

fn default_viewport() -> Viewport { Viewport::new(1920.0, 1080.0) }
fn default_frame_rate() -> f32 { 60.0 }
fn default_enabled() -> bool { true }

impl SceneConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.viewport.width < 1.0 || self.viewport.height < 1.0 {
            bail!("Viewport must be at least 1x1 pixels");
        }
        if !(self.frame_rate > 0.0 && self.frame_rate <= 1000.0) {
            bail!("Frame rate must be between 0 and 1000");
        }
        if !(1.0..=179.0).contains(&self.camera.fov_degrees) {
            bail!("Camera field of view must be between 1 and 179 degrees");
        }

        let mut group_names = HashSet::new();
        for group in &self.mixer_groups {
            if !group_names.insert(group.name.as_str()) {
                bail!("Mixer group '{}' is defined more than once", group.name);
            }
        }

        let mut emitter_names = HashSet::new();
        for emitter in &self.emitters {
            if emitter.name.is_empty() {
                bail!("Every emitter needs a name");
            }
            if !emitter_names.insert(emitter.name.as_str()) {
                bail!("Emitter '{}' is defined more than once", emitter.name);
            }
            if emitter.max_distance < 0.0 {
                bail!("Emitter '{}' has a negative max_distance", emitter.name);
            }
            if let Some(orbit) = &emitter.orbit {
                if orbit.period_secs <= 0.0 {
                    bail!("Emitter '{}' orbit period must be positive", emitter.name);
                }
            }
            emitter.signal.validate(&emitter.name)?;
        }

        // Cues must reference existing emitters and resolve to sane ranges
        for cue in &self.cues {
            let Some(emitter_name) = cue.emitter.as_deref() else {
                continue;
            };
            let Some(emitter) = self.emitter(emitter_name) else {
                bail!("Cue '{}' references unknown emitter '{}'", cue.label(), emitter_name);
            };
            let group = if cue.use_mixer_group_data {
                emitter
                    .output_group
                    .as_deref()
                    .and_then(|name| self.mixer_groups.iter().find(|g| g.name == name))
            } else {
                None
            };
            let resolved = cue.overrides.resolve_config(group, emitter.max_distance);
            if let Err(reason) = resolved.validate() {
                bail!("Cue '{}': {}", cue.label(), reason);
            }
        }

        Ok(())
    }

    pub fn emitter(&self, name: &str) -> Option<&EmitterConfig> {
        self.emitters.iter().find(|e| e.name == name)
    }
}

/// Camera placement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_camera_position")]
    pub position: Vec3,

    /// Degrees; 0 looks down -Z, positive turns left
    #[serde(default)]
    pub yaw_degrees: f32,

    #[serde(default)]
    pub pitch_degrees: f32,

    /// Vertical field of view (default: 60)
    #[serde(default = "default_fov")]
    pub fov_degrees: f32,
}

fn default_camera_position() -> Vec3 { Vec3::new(0.0, 1.7, 0.0) }
fn default_fov() -> f32 { 60.0 }

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: default_camera_position(),
            yaw_degrees: 0.0,
            pitch_degrees: 0.0,
            fov_degrees: default_fov(),
        }
    }
}

/// Where the audio listener sits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListenerMode {
    /// Attached to the camera
    #[default]
    Camera,
    /// At a fixed world position
    Fixed,
    /// No listener in the scene
    None,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListenerConfig {
    #[serde(default)]
    pub mode: ListenerMode,

    /// Used when `mode` is `fixed`
    #[serde(default)]
    pub position: Vec3,
}

/// A sound source in the scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmitterConfig {
    pub name: String,

    /// Clip name, used as the cue's display name when it has none
    #[serde(default)]
    pub clip: Option<String>,

    pub position: Vec3,

    /// Audible range (default: 500)
    #[serde(default = "default_max_distance")]
    pub max_distance: f32,

    /// Mixer group the source outputs to
    #[serde(default)]
    pub output_group: Option<String>,

    #[serde(default = "default_enabled")]
    pub playing: bool,

    #[serde(default)]
    pub muted: bool,

    /// Circle around `position` in the horizontal plane
    #[serde(default)]
    pub orbit: Option<OrbitConfig>,

    #[serde(default)]
    pub signal: SignalConfig,
}

fn default_max_distance() -> f32 { 500.0 }

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrbitConfig {
    pub radius: f32,
    pub period_secs: f32,
}

/// Types of amplitude signals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    #[default]
    Silence,
    Tone,
    Wav,
}

/// Amplitude signal of an emitter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalConfig {
    #[serde(default)]
    pub kind: SignalKind,

    /// Tone waveform (default: sine)
    #[serde(default = "default_waveform")]
    pub waveform: Waveform,

    /// Tone frequency in Hz (default: 220)
    #[serde(default = "default_frequency")]
    pub frequency: f64,

    /// Tone peak amplitude 0.0-1.0 (default: 0.2)
    #[serde(default = "default_amplitude")]
    pub amplitude: f32,

    /// On/off cycle length in seconds
    #[serde(default)]
    pub pulse_secs: Option<f64>,

    /// WAV file, relative to the scene file
    #[serde(default)]
    pub path: Option<PathBuf>,
}

fn default_waveform() -> Waveform { Waveform::Sine }
fn default_frequency() -> f64 { 220.0 }
fn default_amplitude() -> f32 { 0.2 }

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            kind: SignalKind::Silence,
            waveform: default_waveform(),
            frequency: default_frequency(),
            amplitude: default_amplitude(),
            pulse_secs: None,
            path: None,
        }
    }
}

impl SignalConfig {
    fn validate(&self, emitter: &str) -> Result<()> {
        match self.kind {
            SignalKind::Silence => {}
            SignalKind::Tone => {
                if !(0.0..=1.0).contains(&self.amplitude) {
                    bail!("Emitter '{}' tone amplitude must be between 0.0 and 1.0", emitter);
                }
                if self.frequency < 0.0 {
                    bail!("Emitter '{}' tone frequency must not be negative", emitter);
                }
            }
            SignalKind::Wav => {
                if self.path.is_none() {
                    bail!("Emitter '{}' uses a wav signal without a path", emitter);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cue::{CueOverrides, ImageRef, Rgb};

    fn emitter(name: &str) -> EmitterConfig {
        serde_yaml::from_str(&format!("name: {}\nposition: [0.0, 0.0, -5.0]\n", name)).unwrap()
    }

    fn scene() -> SceneConfig {
        serde_yaml::from_str("{}").unwrap()
    }

    #[test]
    fn test_scene_defaults() {
        let config = scene();
        assert_eq!(config.viewport, Viewport::new(1920.0, 1080.0));
        assert_eq!(config.frame_rate, 60.0);
        assert_eq!(config.listener.mode, ListenerMode::Camera);
        assert_eq!(config.camera.fov_degrees, 60.0);
        assert!(config.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_emitter_config() {
        let yaml = r#"
name: campfire
clip: crackle
position: [4.0, 0.0, -10.0]
max_distance: 30
output_group: ambience
orbit:
  radius: 3.0
  period_secs: 8.0
signal:
  kind: tone
  waveform: noise
  amplitude: 0.3
  pulse_secs: 2.0
"#;
        let config: EmitterConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.name, "campfire");
        assert_eq!(config.position, Vec3::new(4.0, 0.0, -10.0));
        assert_eq!(config.max_distance, 30.0);
        assert!(config.playing);
        assert!(!config.muted);
        assert_eq!(config.signal.kind, SignalKind::Tone);
        assert_eq!(config.signal.waveform, Waveform::Noise);
        assert_eq!(config.signal.frequency, 220.0);
        assert_eq!(config.orbit.unwrap().period_secs, 8.0);
    }

    #[test]
    fn test_listener_config() {
        let yaml = "mode: fixed\nposition: [1.0, 2.0, 3.0]\n";
        let config: ListenerConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.mode, ListenerMode::Fixed);
        assert_eq!(config.position, Vec3::new(1.0, 2.0, 3.0));

        let config: ListenerConfig = serde_yaml::from_str("mode: none\n").unwrap();
        assert_eq!(config.mode, ListenerMode::None);
    }

    #[test]
    fn test_unknown_emitter_reference() {
        let mut config = scene();
        config.emitters.push(emitter("fire"));
        config.cues.push(CueSettings::new("river"));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("unknown emitter 'river'"));
    }

    #[test]
    fn test_unassigned_cue_is_allowed() {
        let mut config = scene();
        let mut cue = CueSettings::new("fire");
        cue.emitter = None;
        config.cues.push(cue);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_duplicate_names() {
        let mut config = scene();
        config.emitters.push(emitter("fire"));
        config.emitters.push(emitter("fire"));
        assert!(config.validate().is_err());

        let mut config = scene();
        config.mixer_groups.push(MixerGroupDefaults::new("sfx"));
        config.mixer_groups.push(MixerGroupDefaults::new("sfx"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_cue_range() {
        let mut config = scene();
        config.emitters.push(emitter("fire"));
        config.cues.push(CueSettings::new("fire").with_overrides(CueOverrides {
            image: Some(ImageRef::new("dot", Rgb::WHITE)),
            min_size: Some(400.0),
            ..Default::default()
        }));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("min_size"));
    }

    #[test]
    fn test_invalid_group_range_caught_through_cue() {
        let mut config = scene();
        let mut fire = emitter("fire");
        fire.output_group = Some("sfx".to_string());
        config.emitters.push(fire);
        config.mixer_groups.push(MixerGroupDefaults {
            max_opacity: 2.0,
            ..MixerGroupDefaults::new("sfx")
        });
        config
            .cues
            .push(CueSettings::new("fire").with_mixer_group_data(true));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_wav_signal_requires_path() {
        let mut config = scene();
        let mut fire = emitter("fire");
        fire.signal.kind = SignalKind::Wav;
        config.emitters.push(fire);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_viewport() {
        let mut config = scene();
        config.viewport = Viewport::new(0.0, 1080.0);
        assert!(config.validate().is_err());
    }
}
