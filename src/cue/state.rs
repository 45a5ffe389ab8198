//! Runtime state of an active cue

use glam::Vec2;

use super::Rgb;

/// Exists only while the cue's indicator is shown
#[derive(Debug, Clone, PartialEq)]
pub struct CueRuntimeState {
    pub active: bool,
    /// Captured when the cue was resolved; only alpha changes per frame
    pub base_color: Rgb,
    pub last_screen_position: Vec2,
    pub last_size: f32,
}

impl CueRuntimeState {
    pub fn new(base_color: Rgb) -> Self {
        Self {
            active: true,
            base_color,
            last_screen_position: Vec2::ZERO,
            last_size: 0.0,
        }
    }

    /// Remember the latest outputs
    pub fn record(&mut self, position: Vec2, size: f32) {
        self.last_screen_position = position;
        self.last_size = size;
    }
}
