//! History viewer TUI application
//!
//! Header, video panel and timeline over a live catalog. The simulated
//! element is ticked on every loop iteration and its notifications are fed
//! back into the viewer, the same way a browser delivers media events.

use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::{DateTime, Utc};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::app::App;
use super::sim::SimulatedElement;
use super::status_footer::{render_footer, render_status_line};
use super::widgets::{time_at_column, TimelineBar, VideoPanel};
use crate::config::PlaybackConfig;
use crate::format::{format_duration, format_timestamp, header_text};
use crate::playback::PlaybackReport;
use crate::source::{CatalogPoller, CatalogUpdate};
use crate::theme::current_theme;
use crate::timeline::Scrubber;
use crate::viewer::{offset_marker, HeaderView, HistoryViewer};

/// Control flow signal from input handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Quit,
}

/// What a key does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    TogglePlay,
    /// Move the marker without settling (scrubber drag)
    Drag(i64),
    /// Settle on the dragged position
    Release,
    /// Settled jump by seconds
    Step(i64),
    NextEvent,
    PreviousEvent,
    FirstEvent,
    LastEvent,
    ToggleHelp,
}

/// Map a key press to an action.
pub fn key_action(key: KeyEvent, seek_step: i64) -> Option<Action> {
    let far = seek_step.saturating_mul(12);
    let action = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char(' ') => Action::TogglePlay,
        KeyCode::Left if key.modifiers.contains(KeyModifiers::SHIFT) => Action::Drag(far.saturating_neg()),
        KeyCode::Right if key.modifiers.contains(KeyModifiers::SHIFT) => Action::Drag(far),
        KeyCode::Left => Action::Drag(seek_step.saturating_neg()),
        KeyCode::Right => Action::Drag(seek_step),
        KeyCode::Enter => Action::Release,
        KeyCode::Char(',') | KeyCode::Char('<') => Action::Step(seek_step.saturating_neg()),
        KeyCode::Char('.') | KeyCode::Char('>') => Action::Step(seek_step),
        KeyCode::Char('n') => Action::NextEvent,
        KeyCode::Char('p') => Action::PreviousEvent,
        KeyCode::Home => Action::FirstEvent,
        KeyCode::End => Action::LastEvent,
        KeyCode::Char('?') => Action::ToggleHelp,
        _ => return None,
    };
    Some(action)
}

const FOOTER_KEYS: &[(&str, &str)] = &[
    ("space", "play/pause"),
    ("←/→", "drag"),
    ("enter", "release"),
    (",/.", "step"),
    ("n/p", "event"),
    ("?", "help"),
    ("q", "quit"),
];

const HELP_LINES: &[(&str, &str)] = &[
    ("Space", "Play / pause"),
    ("<-/->", "Drag the marker (Shift: larger steps)"),
    ("Enter", "Release: load video at the marker"),
    (", / .", "Jump back / forward and load"),
    ("n / p", "Next / previous event"),
    ("Home/End", "First / latest event"),
    ("Mouse", "Click or drag the timeline, release to load"),
    ("?", "Toggle this help"),
    ("q / Esc", "Quit"),
];

pub struct ViewerApp {
    viewer: HistoryViewer<SimulatedElement>,
    scrubber: Scrubber,
    poller: Option<CatalogPoller>,
    /// Transient status message and whether it is an error
    status: Option<(String, bool)>,
    show_help: bool,
    /// Where the timeline bar was last drawn, for mouse hit testing
    timeline_area: Rect,
    seek_step: i64,
    tick: Duration,
    /// Marker requested on the command line, applied to the first catalog
    start_at: Option<DateTime<Utc>>,
}

impl ViewerApp {
    pub fn new(
        viewer: HistoryViewer<SimulatedElement>,
        poller: Option<CatalogPoller>,
        settings: &PlaybackConfig,
    ) -> Self {
        Self {
            viewer,
            scrubber: Scrubber::new(),
            poller,
            status: Some(("Loading events...".to_string(), false)),
            show_help: false,
            timeline_area: Rect::default(),
            seek_step: settings.seek_step(),
            tick: settings.tick(),
            start_at: None,
        }
    }

    /// Open at `at` instead of the latest event once events arrive.
    pub fn start_at(mut self, at: Option<DateTime<Utc>>) -> Self {
        self.start_at = at;
        self
    }

    pub fn viewer(&self) -> &HistoryViewer<SimulatedElement> {
        &self.viewer
    }

    pub fn scrubber(&self) -> &Scrubber {
        &self.scrubber
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_ref().map(|(text, _)| text.as_str())
    }

    /// Run the event loop until the user quits.
    pub fn run(mut self) -> Result<()> {
        let mut app = App::new(self.tick)?;
        let mut last_tick = Instant::now();

        loop {
            self.poll_updates();
            app.draw(|frame| self.render(frame))?;

            if let Some(event) = app.next_event()? {
                if self.handle_event(event) == InputResult::Quit {
                    break;
                }
            }

            let elapsed = last_tick.elapsed();
            if elapsed >= self.tick {
                self.advance(elapsed.as_secs_f64());
                last_tick = Instant::now();
            }
        }

        app.restore()
    }

    /// Drain pending catalog updates from the poller.
    pub fn poll_updates(&mut self) {
        let mut updates = Vec::new();
        if let Some(poller) = &self.poller {
            while let Some(update) = poller.try_next() {
                updates.push(update);
            }
        }
        for update in updates {
            self.apply_update(update);
        }
    }

    pub fn apply_update(&mut self, update: CatalogUpdate) {
        match update {
            CatalogUpdate::Catalog { catalog, stats } => {
                let durations = catalog
                    .events()
                    .iter()
                    .map(|e| (e.id.clone(), e.duration_secs()))
                    .collect::<Vec<_>>();
                self.viewer
                    .controller_mut()
                    .element_mut()
                    .set_durations(durations);
                self.viewer.set_catalog(catalog);
                if !self.viewer.catalog().is_empty() {
                    if let Some(at) = self.start_at.take() {
                        self.viewer.seek_to(at);
                    }
                }

                let mut text = format!("{} events", stats.kept());
                if stats.open > 0 {
                    text.push_str(&format!(", {} in progress", stats.open));
                }
                if stats.malformed > 0 {
                    text.push_str(&format!(", {} malformed skipped", stats.malformed));
                }
                self.status = Some((text, false));
            }
            CatalogUpdate::Failed(message) => {
                self.status = Some((format!("Refresh failed: {}", message), true));
            }
        }
    }

    /// Advance the simulated element by `secs` and deliver its notifications.
    pub fn advance(&mut self, secs: f64) {
        self.viewer.controller_mut().element_mut().tick(secs);
        self.pump_media_events();
    }

    fn pump_media_events(&mut self) {
        loop {
            let events = self.viewer.controller_mut().element_mut().drain_events();
            if events.is_empty() {
                return;
            }
            for event in events {
                if let Some(PlaybackReport::Failed(message)) = self.viewer.on_media_event(event) {
                    self.status = Some((format!("Video failed: {}", message), true));
                }
            }
        }
    }

    pub fn handle_event(&mut self, event: Event) -> InputResult {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key),
            Event::Mouse(mouse) => {
                self.handle_mouse(mouse);
                InputResult::Continue
            }
            _ => InputResult::Continue,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> InputResult {
        // Any key closes the help overlay
        if self.show_help {
            self.show_help = false;
            return InputResult::Continue;
        }
        match key_action(key, self.seek_step) {
            Some(action) => self.apply_action(action),
            None => InputResult::Continue,
        }
    }

    pub fn apply_action(&mut self, action: Action) -> InputResult {
        match action {
            Action::Quit => return InputResult::Quit,
            Action::ToggleHelp => self.show_help = !self.show_help,
            Action::TogglePlay => self.viewer.toggle_playing(),
            Action::Drag(secs) => {
                let from = self
                    .scrubber
                    .drag_position()
                    .unwrap_or_else(|| self.viewer.marker());
                let to = offset_marker(from, secs, self.viewer.catalog());
                let change = self.scrubber.drag(self.viewer.catalog(), to);
                self.viewer.on_timeline_change(change);
            }
            Action::Release => {
                if let Some(change) = self.scrubber.release(self.viewer.catalog()) {
                    self.viewer.on_timeline_change(change);
                }
            }
            Action::Step(secs) => {
                let to = offset_marker(self.viewer.marker(), secs, self.viewer.catalog());
                let change = self.scrubber.seek(self.viewer.catalog(), to);
                self.viewer.on_timeline_change(change);
            }
            Action::NextEvent => {
                self.scrubber.cancel();
                if !self.viewer.next_event() {
                    self.status = Some(("Already at the latest event".to_string(), false));
                }
            }
            Action::PreviousEvent => {
                self.scrubber.cancel();
                if !self.viewer.previous_event() {
                    self.status = Some(("No earlier event".to_string(), false));
                }
            }
            Action::FirstEvent => {
                self.scrubber.cancel();
                if let Some(first) = self.viewer.catalog().events().first() {
                    self.viewer.seek_to(first.start);
                }
            }
            Action::LastEvent => {
                self.scrubber.cancel();
                if let Some(last) = self.viewer.catalog().events().last() {
                    self.viewer.seek_to(last.start);
                }
            }
        }
        // Video commands may have made the element emit synchronously.
        self.pump_media_events();
        InputResult::Continue
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => {
                let area = self.timeline_area;
                let on_bar = mouse.row == area.y
                    && mouse.column >= area.x
                    && mouse.column < area.x + area.width;
                // Once dragging, follow the pointer even off the bar row.
                if !on_bar && !self.scrubber.is_dragging() {
                    return;
                }
                let Some(span) = self.viewer.catalog().span() else {
                    return;
                };
                let column = mouse.column.saturating_sub(area.x) as usize;
                let to = time_at_column(column, area.width as usize, span);
                let change = self.scrubber.drag(self.viewer.catalog(), to);
                self.viewer.on_timeline_change(change);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.apply_action(Action::Release);
            }
            _ => {}
        }
    }

    /// Draw the whole screen.
    pub fn render(&mut self, frame: &mut Frame) {
        let theme = current_theme();
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(5),
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        let header = self.viewer.header();
        let header_style = match header {
            HeaderView::Event(_) => theme.accent_bold_style(),
            HeaderView::NoEvent => theme.text_secondary_style(),
        };
        frame.render_widget(
            Paragraph::new(header_text(header)).style(header_style),
            chunks[0],
        );

        let controller = self.viewer.controller();
        frame.render_widget(
            VideoPanel::new(controller.state(), controller.element()),
            chunks[1],
        );

        self.timeline_area = chunks[2];
        frame.render_widget(
            TimelineBar::new(self.viewer.catalog(), self.viewer.marker())
                .dragging(self.scrubber.is_dragging()),
            chunks[2],
        );

        let (status, is_error) = match &self.status {
            Some((text, is_error)) => (format!("{}  {}", self.position_text(), text), *is_error),
            None => (self.position_text(), false),
        };
        render_status_line(frame, chunks[3], &status, is_error);
        render_footer(frame, chunks[4], FOOTER_KEYS);

        if self.show_help {
            render_help_modal(frame, area);
        }
    }

    fn position_text(&self) -> String {
        let playing = if self.viewer.is_playing() { "▶" } else { "⏸" };
        let mut text = format!("{} {}", playing, format_timestamp(self.viewer.marker()));
        if let Some(offset) = self.viewer.playback().offset_secs {
            text.push_str(&format!(" +{}", format_duration(offset)));
        }
        if self.scrubber.is_dragging() {
            text.push_str(" (dragging)");
        }
        text
    }
}

/// Render the help modal overlay.
pub fn render_help_modal(frame: &mut Frame, area: Rect) {
    let theme = current_theme();

    let modal_width = 60.min(area.width.saturating_sub(4));
    let modal_height = (HELP_LINES.len() as u16 + 4).min(area.height.saturating_sub(2));
    let x = (area.width.saturating_sub(modal_width)) / 2;
    let y = (area.height.saturating_sub(modal_height)) / 2;
    let modal_area = Rect::new(x, y, modal_width, modal_height);

    frame.render_widget(Clear, modal_area);

    let mut lines = vec![Line::from("")];
    for (key, desc) in HELP_LINES {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<10}", key), theme.accent_bold_style()),
            Span::styled(desc.to_string(), theme.text_style()),
        ]));
    }
    let help = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent))
                .title(" Help "),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(help, modal_area);
}
