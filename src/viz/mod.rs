//! Terminal preview of a running scene
//!
//! Provides a TUI showing:
//! - The viewport with every active indicator
//! - A table of cue states
//! - Camera heading and playback controls

mod screen_view;

pub use screen_view::{cell_for, glyph, shade, ScreenView};

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame, Terminal,
};

use crate::engine::FrameReport;
use crate::scene::Scene;

/// Degrees turned per arrow key press
pub const TURN_STEP_DEGREES: f32 = 5.0;

/// Preview state
pub struct PreviewState {
    pub running: bool,
    pub paused: bool,
    pub report: FrameReport,
}

impl PreviewState {
    pub fn new() -> Self {
        Self {
            running: true,
            paused: false,
            report: FrameReport::default(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stop(&mut self) {
        self.running = false;
    }
}

impl Default for PreviewState {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply a key press; returns false when the preview should close
pub fn handle_key(scene: &mut Scene, state: &mut PreviewState, code: KeyCode, modifiers: KeyModifiers) -> bool {
    match (code, modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => state.stop(),
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => state.stop(),
        (KeyCode::Char(' '), _) => state.paused = !state.paused,
        (KeyCode::Left, _) => scene.camera_mut().turn(TURN_STEP_DEGREES),
        (KeyCode::Right, _) => scene.camera_mut().turn(-TURN_STEP_DEGREES),
        (KeyCode::Char('r'), _) => scene.controller_mut().redraw_all(),
        _ => {}
    }
    state.is_running()
}

/// Run the preview TUI until the user quits
pub fn run_preview(scene: &mut Scene) -> Result<()> {
    let frame_time = Duration::from_secs_f32(1.0 / scene.frame_rate());
    let mut state = PreviewState::new();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = (|| -> Result<()> {
        let mut next_frame = Instant::now();
        while state.is_running() {
            let now = Instant::now();
            if state.paused {
                next_frame = now;
            } else if now >= next_frame {
                state.report = scene.step();
                next_frame = (next_frame + frame_time).max(now);
            }

            terminal.draw(|f| draw_ui(f, scene, &state))?;

            let timeout = next_frame.saturating_duration_since(Instant::now()).min(Duration::from_millis(50));
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    handle_key(scene, &mut state, key.code, key.modifiers);
                }
            }
        }
        Ok(())
    })();

    // Cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result
}

fn draw_ui(f: &mut Frame, scene: &Scene, state: &PreviewState) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),      // Viewport
            Constraint::Length(state.report.cues.len() as u16 + 3),
            Constraint::Length(3),   // Status
        ])
        .split(area);

    let view = ScreenView::new(&state.report.cues, scene.camera().viewport)
        .block(Block::default().borders(Borders::ALL).title(" Screen "));
    f.render_widget(view, chunks[0]);

    draw_cue_table(f, chunks[1], &state.report);
    draw_status(f, chunks[2], scene, state);
}

fn draw_cue_table(f: &mut Frame, area: Rect, report: &FrameReport) {
    let rows = report.cues.iter().map(|cue| {
        let skipped = report.skipped.iter().find(|s| s.cue == cue.cue);
        match (&cue.indicator, skipped) {
            (Some(indicator), _) => Row::new(vec![
                cue.cue.clone(),
                "active".to_string(),
                format!("{:.1}", indicator.distance),
                format_decibels(indicator.decibels),
                format!("{:.2}", indicator.opacity),
                format!("{:.0}", indicator.size),
            ]),
            (None, Some(skip)) => Row::new(vec![cue.cue.clone(), "skipped".to_string(), skip.reason.clone()])
                .style(Style::default().fg(Color::Red)),
            (None, None) => Row::new(vec![cue.cue.clone(), "hidden".to_string()])
                .style(Style::default().fg(Color::DarkGray)),
        }
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(16),
            Constraint::Length(8),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(8),
            Constraint::Length(6),
        ],
    )
    .header(
        Row::new(vec!["cue", "state", "distance", "dB", "opacity", "size"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(Block::default().borders(Borders::ALL).title(" Cues "));

    f.render_widget(table, area);
}

fn format_decibels(db: f32) -> String {
    if db.is_finite() {
        format!("{:.1}", db)
    } else {
        "-inf".to_string()
    }
}

fn draw_status(f: &mut Frame, area: Rect, scene: &Scene, state: &PreviewState) {
    let status = if state.paused { "PAUSED" } else { "RUNNING" };
    let status_color = if state.paused { Color::Yellow } else { Color::Green };

    let text = Line::from(vec![
        Span::raw("  Status: "),
        Span::styled(status, Style::default().fg(status_color)),
        Span::raw(format!(
            "  |  t={:.1}s  yaw={:.0}°  active={}",
            scene.time_secs(),
            scene.camera().yaw.to_degrees(),
            state.report.active_count()
        )),
        Span::raw("  |  "),
        Span::raw("←/→: turn  |  r: redraw  |  Space: pause  |  q: quit"),
    ]);

    let paragraph = Paragraph::new(text).block(Block::default().borders(Borders::ALL));

    f.render_widget(paragraph, area);
}
