//! Viewport widget for ratatui

use glam::Vec2;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Widget},
};

use crate::engine::CueFrame;
use crate::mapping::Viewport;

/// A widget that draws active indicators at their screen positions
pub struct ScreenView<'a> {
    cues: &'a [CueFrame],
    viewport: Viewport,
    block: Option<Block<'a>>,
}

impl<'a> ScreenView<'a> {
    pub fn new(cues: &'a [CueFrame], viewport: Viewport) -> Self {
        Self {
            cues,
            viewport,
            block: None,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    fn render_indicators(&self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        // Crosshair at the viewport centre
        let (cx, cy) = cell_for(self.viewport.center(), self.viewport, area);
        buf.set_string(cx, cy, "+", Style::default().fg(Color::DarkGray));

        for cue in self.cues.iter().filter(|c| c.active) {
            let Some(indicator) = cue.indicator else {
                continue;
            };
            let color = cue.color.unwrap_or([1.0, 1.0, 1.0, indicator.opacity]);
            let (x, y) = cell_for(indicator.position, self.viewport, area);
            buf.set_string(x, y, glyph(indicator.size), Style::default().fg(shade(color)));
        }
    }
}

impl Widget for ScreenView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner_area = match &self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.clone().render(area, buf);
                inner
            }
            None => area,
        };

        self.render_indicators(inner_area, buf);
    }
}

/// Terminal cell for a screen position
///
/// Screen y grows upward while terminal rows grow downward.
pub fn cell_for(position: Vec2, viewport: Viewport, area: Rect) -> (u16, u16) {
    let u = (position.x / viewport.width.max(1.0)).clamp(0.0, 1.0);
    let v = (position.y / viewport.height.max(1.0)).clamp(0.0, 1.0);
    let col = (u * area.width.saturating_sub(1) as f32).round() as u16;
    let row = ((1.0 - v) * area.height.saturating_sub(1) as f32).round() as u16;
    (area.x + col, area.y + row)
}

/// Glyph for an indicator of the given size in pixels
pub fn glyph(size: f32) -> &'static str {
    if size < 125.0 {
        "·"
    } else if size < 175.0 {
        "•"
    } else {
        "●"
    }
}

/// Terminal color for an RGBA indicator color, dimmed by its alpha
pub fn shade(color: [f32; 4]) -> Color {
    let channel = |c: f32| ((c * color[3]).clamp(0.0, 1.0) * 255.0).round() as u8;
    Color::Rgb(channel(color[0]), channel(color[1]), channel(color[2]))
}
