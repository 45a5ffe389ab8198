//! Scene driver
//!
//! Plays the host's role for a scene loaded from YAML. Each step it moves
//! the emitters, fills their amplitude windows, places the listener and
//! hands the frame to the [`Controller`], using a [`PerspectiveCamera`] as
//! the projector.

use anyhow::{Context, Result};
use glam::Vec3;
use std::path::Path;

use crate::camera::PerspectiveCamera;
use crate::config::{EmitterConfig, ListenerMode, SceneConfig, SignalConfig, SignalKind};
use crate::engine::{Controller, EmitterFrame, FrameInput, FrameReport};
use crate::mapping::SAMPLE_WINDOW;
use crate::signal::{Silence, SignalSource, Tone, WavSignal};

struct SceneEmitter {
    config: EmitterConfig,
    signal: Box<dyn SignalSource>,
}

impl SceneEmitter {
    fn position_at(&self, time: f64) -> Vec3 {
        let centre = self.config.position;
        match &self.config.orbit {
            Some(orbit) => {
                let angle = (time / orbit.period_secs as f64 * std::f64::consts::TAU) as f32;
                centre + Vec3::new(angle.cos(), 0.0, angle.sin()) * orbit.radius
            }
            None => centre,
        }
    }
}

fn build_signal(name: &str, config: &SignalConfig, base_dir: &Path) -> Result<Box<dyn SignalSource>> {
    let signal: Box<dyn SignalSource> = match config.kind {
        SignalKind::Silence => Box::new(Silence),
        SignalKind::Tone => {
            let mut tone = Tone::new(name, config.waveform, config.frequency, config.amplitude);
            if let Some(period) = config.pulse_secs {
                tone = tone.with_pulse(period);
            }
            Box::new(tone)
        }
        SignalKind::Wav => {
            let path = config
                .path
                .as_deref()
                .with_context(|| format!("emitter '{}' has no wav path", name))?;
            let wav = WavSignal::open(&base_dir.join(path))
                .with_context(|| format!("failed to load signal for emitter '{}'", name))?;
            log::debug!(
                "emitter '{}': {:.1}s of audio at {} Hz",
                name,
                wav.duration_secs(),
                wav.sample_rate()
            );
            Box::new(wav)
        }
    };
    Ok(signal)
}

/// A scene being simulated frame by frame
pub struct Scene {
    camera: PerspectiveCamera,
    listener: ListenerMode,
    listener_position: Vec3,
    frame_rate: f32,
    emitters: Vec<SceneEmitter>,
    frames: Vec<EmitterFrame>,
    controller: Controller,
    frame: u64,
}

impl Scene {
    /// Build a scene; relative WAV paths resolve against `base_dir`
    pub fn from_config(config: SceneConfig, base_dir: &Path) -> Result<Self> {
        let camera = PerspectiveCamera::new(config.camera.position, config.viewport)
            .with_yaw_degrees(config.camera.yaw_degrees)
            .with_pitch_degrees(config.camera.pitch_degrees)
            .with_fov_degrees(config.camera.fov_degrees);

        let mut emitters = Vec::with_capacity(config.emitters.len());
        for emitter in config.emitters {
            let signal = build_signal(&emitter.name, &emitter.signal, base_dir)?;
            emitters.push(SceneEmitter { config: emitter, signal });
        }

        let frames = emitters
            .iter()
            .map(|e| {
                let mut frame = EmitterFrame::new(e.config.name.clone(), e.config.position)
                    .with_max_distance(e.config.max_distance)
                    .with_samples(vec![0.0; SAMPLE_WINDOW]);
                frame.clip = e.config.clip.clone();
                frame.output_group = e.config.output_group.clone();
                frame.is_playing = e.config.playing;
                frame.is_muted = e.config.muted;
                frame
            })
            .collect();

        let mut controller = Controller::new(config.mixer_groups, config.cues);
        controller.set_enabled(config.enabled);

        Ok(Self {
            camera,
            listener: config.listener.mode,
            listener_position: config.listener.position,
            frame_rate: config.frame_rate,
            emitters,
            frames,
            controller,
            frame: 0,
        })
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut PerspectiveCamera {
        &mut self.camera
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut Controller {
        &mut self.controller
    }

    /// Emitter state as of the last step
    pub fn emitter_frames(&self) -> &[EmitterFrame] {
        &self.frames
    }

    /// Mute or unmute an emitter by name
    pub fn set_muted(&mut self, emitter: &str, muted: bool) -> bool {
        match self.frames.iter_mut().find(|f| f.name == emitter) {
            Some(frame) => {
                frame.is_muted = muted;
                true
            }
            None => false,
        }
    }

    pub fn frame_rate(&self) -> f32 {
        self.frame_rate
    }

    /// Simulated time of the next step
    pub fn time_secs(&self) -> f64 {
        self.frame as f64 / self.frame_rate as f64
    }

    /// Listener position this frame
    pub fn listener(&self) -> Option<Vec3> {
        match self.listener {
            ListenerMode::Camera => Some(self.camera.position),
            ListenerMode::Fixed => Some(self.listener_position),
            ListenerMode::None => None,
        }
    }

    /// Advance one frame
    pub fn step(&mut self) -> FrameReport {
        let time = self.time_secs();
        for (emitter, frame) in self.emitters.iter().zip(self.frames.iter_mut()) {
            frame.position = emitter.position_at(time);
            emitter.signal.fill_window(time, &mut frame.samples);
        }

        let input = FrameInput {
            listener: self.listener(),
            camera: self.camera.pose(),
            viewport: self.camera.viewport,
            emitters: &self.frames,
        };
        let report = self.controller.process_frame(&input, &self.camera);
        self.frame += 1;

        for event in &report.events {
            log::trace!("frame {}: cue '{}' {:?}", report.frame, event.cue, event.kind);
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::CueEventKind;

    const SCENE: &str = r#"
viewport: { width: 1920, height: 1080 }
camera:
  position: [0.0, 0.0, 0.0]
mixer_groups:
  - name: sfx
    image: { name: dot, color: [1.0, 0.5, 0.0] }
emitters:
  - name: ahead
    position: [0.0, 0.0, -10.0]
    max_distance: 50
    output_group: sfx
    signal: { kind: tone, amplitude: 0.3 }
  - name: behind
    position: [0.0, 0.0, 10.0]
    max_distance: 50
    output_group: sfx
    signal: { kind: tone, amplitude: 0.3 }
  - name: distant
    position: [0.0, 0.0, -200.0]
    max_distance: 50
    output_group: sfx
cues:
  - { emitter: ahead, use_mixer_group_data: true }
  - { emitter: behind, use_mixer_group_data: true }
  - { emitter: distant, use_mixer_group_data: true }
"#;

    fn scene() -> Scene {
        let config: SceneConfig = serde_yaml::from_str(SCENE).unwrap();
        config.validate().unwrap();
        Scene::from_config(config, Path::new(".")).unwrap()
    }

    #[test]
    fn test_step_reports_all_cues() {
        let mut scene = scene();
        let report = scene.step();
        assert_eq!(report.frame, 0);
        assert_eq!(report.cues.len(), 3);
        assert!(report.cue("ahead").unwrap().active);
        assert!(report.cue("behind").unwrap().active);
        assert!(!report.cue("distant").unwrap().active);
        assert_eq!(report.events.len(), 2);
    }

    #[test]
    fn test_emitter_ahead_lands_near_centre() {
        let mut scene = scene();
        let report = scene.step();
        let indicator = report.cue("ahead").unwrap().indicator.unwrap();
        assert!((indicator.position.x - 960.0).abs() < 1.0);
        assert!((indicator.position.y - 540.0).abs() < 1.0);
    }

    #[test]
    fn test_emitter_behind_is_pushed_to_edge() {
        let mut scene = scene();
        let report = scene.step();
        let indicator = report.cue("behind").unwrap().indicator.unwrap();
        // Dead behind projects onto the centre column, which flips left
        assert_eq!(indicator.position.x, indicator.size / 2.0);
        assert!((indicator.position.y - 540.0).abs() < 1.0);
    }

    #[test]
    fn test_turning_moves_cue() {
        let mut scene = scene();
        let before = scene.step().cue("ahead").unwrap().indicator.unwrap();
        scene.camera_mut().turn(10.0);
        let after = scene.step().cue("ahead").unwrap().indicator.unwrap();
        // Turning left pushes the emitter towards the right edge
        assert!(after.position.x > before.position.x);
    }

    #[test]
    fn test_mute_deactivates() {
        let mut scene = scene();
        scene.step();
        assert!(scene.set_muted("ahead", true));
        assert!(!scene.set_muted("nobody", true));
        let report = scene.step();
        assert!(!report.cue("ahead").unwrap().active);
        assert!(report
            .events
            .iter()
            .any(|e| e.cue == "ahead" && e.kind == CueEventKind::Deactivated));
    }

    #[test]
    fn test_listener_modes() {
        let mut config: SceneConfig = serde_yaml::from_str(SCENE).unwrap();
        config.listener.mode = ListenerMode::None;
        let mut scene = Scene::from_config(config, Path::new(".")).unwrap();
        assert_eq!(scene.listener(), None);
        let report = scene.step();
        assert_eq!(report.active_count(), 0);
        assert_eq!(report.skipped.len(), 3);
    }

    #[test]
    fn test_orbit_moves_emitter() {
        let yaml = r#"
emitters:
  - name: bird
    position: [0.0, 5.0, -20.0]
    orbit: { radius: 4.0, period_secs: 1.0 }
"#;
        let config: SceneConfig = serde_yaml::from_str(yaml).unwrap();
        let mut scene = Scene::from_config(config, Path::new(".")).unwrap();
        scene.step();
        let start = scene.emitter_frames()[0].position;
        assert!((start - Vec3::new(4.0, 5.0, -20.0)).length() < 1e-4);

        // A quarter period later at 60 fps
        for _ in 0..15 {
            scene.step();
        }
        let quarter = scene.emitter_frames()[0].position;
        assert!((quarter - Vec3::new(0.0, 5.0, -16.0)).length() < 1e-3);
    }

    #[test]
    fn test_missing_wav_fails() {
        let yaml = r#"
emitters:
  - name: river
    position: [0.0, 0.0, -5.0]
    signal: { kind: wav, path: does-not-exist.wav }
"#;
        let config: SceneConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(Scene::from_config(config, Path::new("/nonexistent")).is_err());
    }

    #[test]
    fn test_time_advances() {
        let mut scene = scene();
        assert_eq!(scene.time_secs(), 0.0);
        scene.step();
        scene.step();
        assert!((scene.time_secs() - 2.0 / 60.0).abs() < 1e-9);
    }
}
