//! Video panel widget
//!
//! Stands in for the video surface: shows what the element has loaded,
//! its phase and position, and whether the poster arrived.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::format::format_duration;
use crate::playback::{MediaElement, Phase, PlayerState};
use crate::theme::current_theme;
use crate::tui::SimulatedElement;

/// Text lines for the panel body.
pub fn video_lines(state: &PlayerState, element: &SimulatedElement) -> Vec<String> {
    let Some(source) = state.source.as_ref() else {
        return vec!["(no video)".to_string()];
    };

    let position = match element.duration() {
        Some(duration) => format!(
            "{} / {}",
            format_duration(element.current_time()),
            format_duration(duration)
        ),
        None => format_duration(element.current_time()),
    };
    let poster = if state.poster_ready {
        "poster loaded"
    } else {
        "poster loading"
    };
    let status = match state.phase {
        Phase::Loading => "buffering...",
        Phase::ReadyPaused => "paused",
        Phase::ReadyPlaying if element.is_paused() => "waiting to play",
        Phase::ReadyPlaying => "playing",
        Phase::Empty => "",
    };

    vec![
        status.to_string(),
        position,
        String::new(),
        source.manifest_url.clone(),
        format!("{} ({})", source.poster_url, poster),
    ]
}

pub struct VideoPanel<'a> {
    state: &'a PlayerState,
    element: &'a SimulatedElement,
}

impl<'a> VideoPanel<'a> {
    pub fn new(state: &'a PlayerState, element: &'a SimulatedElement) -> Self {
        Self { state, element }
    }
}

impl Widget for VideoPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = current_theme();
        let lines: Vec<Line> = video_lines(self.state, self.element)
            .into_iter()
            .map(Line::from)
            .collect();
        let title = format!(" video: {} ", self.state.phase.label());
        Paragraph::new(lines)
            .style(theme.text_style())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.text_secondary))
                    .title(title),
            )
            .render(area, buf);
    }
}
