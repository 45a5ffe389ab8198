//! Visibility test and activation edge detection

use glam::Vec3;

use crate::cue::CueConfig;

/// Whether a cue should currently be shown
///
/// The range test is strict: an emitter exactly at `max_distance` is
/// hidden.
pub fn compute_visibility(
    emitter: Vec3,
    listener: Vec3,
    config: &CueConfig,
    is_playing: bool,
    is_muted: bool,
) -> bool {
    emitter.distance(listener) < config.max_distance && is_playing && !is_muted
}

/// A change in a cue's visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Activated,
    Deactivated,
}

/// Edge detector over a per-frame visibility flag
///
/// Reports at most one edge per update. The first update only reports
/// `Activated` if the cue starts out visible.
#[derive(Debug, Clone, Default)]
pub struct ActivationEdge {
    active: bool,
}

impl ActivationEdge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Feed this frame's visibility
    pub fn update(&mut self, visible: bool) -> Option<Edge> {
        let edge = match (self.active, visible) {
            (false, true) => Some(Edge::Activated),
            (true, false) => Some(Edge::Deactivated),
            _ => None,
        };
        self.active = visible;
        edge
    }

    /// Force inactive, reporting the edge if one occurs
    pub fn reset(&mut self) -> Option<Edge> {
        self.update(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(max_distance: f32) -> CueConfig {
        CueConfig {
            max_distance,
            ..Default::default()
        }
    }

    #[test]
    fn test_visible_in_range() {
        let cfg = config(10.0);
        assert!(compute_visibility(Vec3::new(3.0, 4.0, 0.0), Vec3::ZERO, &cfg, true, false));
    }

    #[test]
    fn test_hidden_exactly_at_max_distance() {
        let cfg = config(5.0);
        assert!(!compute_visibility(Vec3::new(3.0, 4.0, 0.0), Vec3::ZERO, &cfg, true, false));
        assert!(compute_visibility(Vec3::new(3.0, 3.9, 0.0), Vec3::ZERO, &cfg, true, false));
    }

    #[test]
    fn test_hidden_when_muted_or_stopped() {
        let cfg = config(10.0);
        let emitter = Vec3::new(1.0, 0.0, 0.0);
        assert!(!compute_visibility(emitter, Vec3::ZERO, &cfg, true, true));
        assert!(!compute_visibility(emitter, Vec3::ZERO, &cfg, false, false));
        assert!(!compute_visibility(emitter, Vec3::ZERO, &cfg, false, true));
    }

    #[test]
    fn test_zero_range_never_visible() {
        let cfg = config(0.0);
        assert!(!compute_visibility(Vec3::ZERO, Vec3::ZERO, &cfg, true, false));
    }

    #[test]
    fn test_edge_sequence() {
        let mut edge = ActivationEdge::new();
        assert_eq!(edge.update(false), None);
        assert_eq!(edge.update(true), Some(Edge::Activated));
        assert_eq!(edge.update(true), None);
        assert!(edge.is_active());
        assert_eq!(edge.update(false), Some(Edge::Deactivated));
        assert_eq!(edge.update(false), None);
        assert_eq!(edge.update(true), Some(Edge::Activated));
    }

    #[test]
    fn test_edge_reset() {
        let mut edge = ActivationEdge::new();
        assert_eq!(edge.reset(), None);
        edge.update(true);
        assert_eq!(edge.reset(), Some(Edge::Deactivated));
        assert!(!edge.is_active());
    }
}
