//! Cue controller
//!
//! Runs the per-frame pass over every cue: resolves layered settings the
//! first time a cue is seen, decides visibility, maps the indicator and
//! reports activation edges. A failing cue is skipped without affecting
//! the others.

mod frame;
mod recorder;

pub use frame::{CueEvent, CueEventKind, CueFrame, EmitterFrame, FrameInput, FrameReport, SkippedCue};
pub use recorder::FrameRecorder;

use crate::cue::{CueConfig, CueRuntimeState, CueSettings, ImageRef, MixerGroupDefaults};
use crate::error::CueError;
use crate::mapping::{ActivationEdge, CueInputs, CueMapper, Edge, Projector};

/// Settings resolved for a cue, cached until it is redrawn
#[derive(Debug, Clone)]
struct ResolvedCue {
    name: String,
    config: CueConfig,
    image: ImageRef,
}

struct CueSlot {
    settings: CueSettings,
    resolved: Option<ResolvedCue>,
    edge: ActivationEdge,
    state: Option<CueRuntimeState>,
    last_fault: Option<CueError>,
}

impl CueSlot {
    fn new(settings: CueSettings) -> Self {
        Self {
            settings,
            resolved: None,
            edge: ActivationEdge::new(),
            state: None,
            last_fault: None,
        }
    }

    fn name(&self) -> &str {
        match &self.resolved {
            Some(resolved) => &resolved.name,
            None => self.settings.label(),
        }
    }

    /// Drop the indicator, reporting the edge if it was shown
    fn deactivate(&mut self) -> Option<CueEvent> {
        self.state = None;
        let edge = self.edge.reset()?;
        log::debug!("cue '{}' deactivated", self.name());
        Some(CueEvent {
            cue: self.name().to_string(),
            kind: edge.into(),
        })
    }

    /// Log a fault once per occurrence rather than every frame
    fn report_fault(&mut self, err: &CueError) {
        if self.last_fault.as_ref() == Some(err) {
            return;
        }
        match err {
            CueError::NoListener => {}
            CueError::MissingAssignment { .. } => log::error!("{}", err),
            CueError::InvalidConfig { .. } => log::warn!("{}", err),
        }
        self.last_fault = Some(err.clone());
    }
}

/// Resolve a cue against its emitter and the mixer-group table
fn resolve(
    settings: &CueSettings,
    emitter: &EmitterFrame,
    groups: &[MixerGroupDefaults],
) -> Result<ResolvedCue, CueError> {
    let name = if settings.name.is_empty() {
        emitter.display_name().to_string()
    } else {
        settings.name.clone()
    };

    let group = match (settings.use_mixer_group_data, emitter.output_group.as_deref()) {
        (true, Some(group_name)) => Some(
            groups
                .iter()
                .find(|g| g.name == group_name)
                .ok_or_else(|| CueError::missing(&name, "mixer group data"))?,
        ),
        _ => None,
    };

    let config = settings.overrides.resolve_config(group, emitter.max_distance);
    let image = settings
        .overrides
        .resolve_image(group)
        .cloned()
        .ok_or_else(|| CueError::missing(&name, "image"))?;

    if let Err(reason) = config.validate() {
        log::warn!("{}", CueError::InvalidConfig { cue: name.clone(), reason });
    }

    log::debug!("cue '{}' resolved (group: {:?})", name, group.map(|g| &g.name));
    Ok(ResolvedCue { name, config, image })
}

/// Update one cue for this frame
fn update_slot<P: Projector + ?Sized>(
    slot: &mut CueSlot,
    groups: &[MixerGroupDefaults],
    input: &FrameInput<'_>,
    projector: &P,
    events: &mut Vec<CueEvent>,
) -> Result<CueFrame, CueError> {
    if !slot.settings.enabled {
        events.extend(slot.deactivate());
        return Ok(CueFrame::inactive(slot.name()));
    }

    let emitter = match slot.settings.emitter.as_deref().and_then(|name| input.emitter(name)) {
        Some(emitter) => emitter,
        None => {
            events.extend(slot.deactivate());
            slot.resolved = None;
            return Err(CueError::missing(slot.settings.label(), "emitter"));
        }
    };

    let resolved = match slot.resolved.take() {
        Some(resolved) => resolved,
        None => match resolve(&slot.settings, emitter, groups) {
            Ok(resolved) => resolved,
            Err(err) => {
                events.extend(slot.deactivate());
                return Err(err);
            }
        },
    };

    let inputs = CueInputs {
        emitter: emitter.position,
        listener: input.listener,
        camera: input.camera,
        viewport: input.viewport,
        samples: &emitter.samples,
        is_playing: emitter.is_playing,
        is_muted: emitter.is_muted,
    };
    let evaluated = CueMapper::new(&resolved.config).evaluate(&inputs, projector);
    let base_color = resolved.image.color;
    slot.resolved = Some(resolved);

    let indicator = match evaluated {
        Ok(indicator) => indicator,
        Err(err) => {
            events.extend(slot.deactivate());
            return Err(err);
        }
    };

    match slot.edge.update(indicator.is_some()) {
        Some(Edge::Activated) => {
            slot.state = Some(CueRuntimeState::new(base_color));
            log::debug!("cue '{}' activated", slot.name());
            events.push(CueEvent {
                cue: slot.name().to_string(),
                kind: Edge::Activated.into(),
            });
        }
        Some(Edge::Deactivated) => {
            slot.state = None;
            log::debug!("cue '{}' deactivated", slot.name());
            events.push(CueEvent {
                cue: slot.name().to_string(),
                kind: Edge::Deactivated.into(),
            });
        }
        None => {}
    }

    let Some(indicator) = indicator else {
        return Ok(CueFrame::inactive(slot.name()));
    };
    let color = match slot.state.as_mut() {
        Some(state) => {
            state.record(indicator.position, indicator.size);
            state.base_color.with_alpha(indicator.opacity)
        }
        None => return Ok(CueFrame::inactive(slot.name())),
    };

    Ok(CueFrame {
        cue: slot.name().to_string(),
        active: true,
        indicator: Some(indicator),
        color: Some(color),
        image: slot.resolved.as_ref().map(|r| r.image.name.clone()),
    })
}

/// Drives every cue once per frame
pub struct Controller {
    enabled: bool,
    mixer_groups: Vec<MixerGroupDefaults>,
    slots: Vec<CueSlot>,
    frame: u64,
    listener_missing: bool,
    pending_events: Vec<CueEvent>,
}

impl Controller {
    /// Create a controller for the given mixer groups and cues
    pub fn new(mixer_groups: Vec<MixerGroupDefaults>, cues: Vec<CueSettings>) -> Self {
        Self {
            enabled: true,
            mixer_groups,
            slots: cues.into_iter().map(CueSlot::new).collect(),
            frame: 0,
            listener_missing: false,
            pending_events: Vec::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Switch the whole controller; disabling hides every cue next frame
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn cue_count(&self) -> usize {
        self.slots.len()
    }

    /// Number of frames processed
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub fn mixer_groups(&self) -> &[MixerGroupDefaults] {
        &self.mixer_groups
    }

    pub fn settings(&self, index: usize) -> Option<&CueSettings> {
        self.slots.get(index).map(|s| &s.settings)
    }

    /// Edit a cue's settings; call [`Controller::redraw_cue`] to apply
    pub fn settings_mut(&mut self, index: usize) -> Option<&mut CueSettings> {
        self.slots.get_mut(index).map(|s| &mut s.settings)
    }

    /// Resolved configuration, once the cue has been initialised
    pub fn resolved_config(&self, index: usize) -> Option<&CueConfig> {
        self.slots
            .get(index)
            .and_then(|s| s.resolved.as_ref())
            .map(|r| &r.config)
    }

    pub fn runtime_state(&self, index: usize) -> Option<&CueRuntimeState> {
        self.slots.get(index).and_then(|s| s.state.as_ref())
    }

    /// Re-resolve one cue next frame, dropping its current indicator
    pub fn redraw_cue(&mut self, index: usize) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) => {
                self.pending_events.extend(slot.deactivate());
                slot.resolved = None;
                slot.last_fault = None;
                true
            }
            None => false,
        }
    }

    /// Re-resolve every cue next frame
    pub fn redraw_all(&mut self) {
        for index in 0..self.slots.len() {
            self.redraw_cue(index);
        }
    }

    fn note_listener(&mut self, present: bool) {
        if !present && !self.listener_missing {
            log::warn!("{}; cues are suppressed", CueError::NoListener);
        } else if present && self.listener_missing {
            log::info!("audio listener found; cues resume");
        }
        self.listener_missing = !present;
    }

    /// Run one frame over all cues
    pub fn process_frame<P: Projector + ?Sized>(&mut self, input: &FrameInput<'_>, projector: &P) -> FrameReport {
        let mut report = FrameReport {
            frame: self.frame,
            ..Default::default()
        };
        self.frame += 1;
        report.events.append(&mut self.pending_events);

        if !self.enabled {
            for slot in &mut self.slots {
                report.events.extend(slot.deactivate());
                report.cues.push(CueFrame::inactive(slot.name()));
            }
            return report;
        }

        self.note_listener(input.listener.is_some());

        for slot in &mut self.slots {
            match update_slot(slot, &self.mixer_groups, input, projector, &mut report.events) {
                Ok(frame) => {
                    slot.last_fault = None;
                    report.cues.push(frame);
                }
                Err(err) => {
                    slot.report_fault(&err);
                    report.skipped.push(SkippedCue {
                        cue: slot.name().to_string(),
                        reason: err.to_string(),
                    });
                    report.cues.push(CueFrame::inactive(slot.name()));
                }
            }
        }

        report
    }
}
