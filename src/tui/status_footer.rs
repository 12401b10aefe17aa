//! Status line and footer rendering
//!
//! The status line carries transient messages (fetch failures, catalog
//! counts); the footer lists keybinding hints.

use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::{current_theme, Theme};

/// Render a status line, in the error color when `is_error`.
pub fn render_status_line(frame: &mut Frame, area: Rect, text: &str, is_error: bool) {
    let theme = current_theme();
    let style = if is_error {
        theme.error_style()
    } else {
        theme.text_secondary_style()
    };
    frame.render_widget(Paragraph::new(text.to_string()).style(style), area);
}

/// Render a centered footer with keybinding hints.
///
/// `&[("q", "quit"), ("?", "help")]` renders as `"q: quit | ?: help"`.
pub fn render_footer(frame: &mut Frame, area: Rect, keys: &[(&str, &str)]) {
    let theme = current_theme();
    let footer = Paragraph::new(Line::from(build_footer_spans(keys, &theme)))
        .style(Style::default().fg(theme.text_secondary))
        .alignment(Alignment::Center);
    frame.render_widget(footer, area);
}

fn build_footer_spans(keys: &[(&str, &str)], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(keys.len() * 3);
    for (i, (key, desc)) in keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", theme.text_secondary_style()));
        }
        spans.push(Span::styled(key.to_string(), theme.accent_style()));
        spans.push(Span::styled(
            format!(": {}", desc),
            theme.text_secondary_style(),
        ));
    }
    spans
}
