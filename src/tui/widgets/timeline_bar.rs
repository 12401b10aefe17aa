//! Timeline bar widget
//!
//! One row showing the catalog's span with recorded events filled in and
//! the marker on top, plus a row of time labels underneath.

use chrono::{DateTime, Utc};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::event::{duration_to_secs, secs_to_duration, Event, EventCatalog};
use crate::format::format_timestamp;
use crate::theme::current_theme;

const GAP: char = '─';
const RECORDED: char = '█';
const MARKER: char = '┃';

/// Fraction of `span` at which `at` lies, clamped to `[0, 1]`.
fn ratio_in_span(at: DateTime<Utc>, span: (DateTime<Utc>, DateTime<Utc>)) -> f64 {
    let total = duration_to_secs(span.1 - span.0);
    if total <= 0.0 {
        return 0.0;
    }
    (duration_to_secs(at - span.0) / total).clamp(0.0, 1.0)
}

fn column_for(at: DateTime<Utc>, width: usize, span: (DateTime<Utc>, DateTime<Utc>)) -> usize {
    if width == 0 {
        return 0;
    }
    (ratio_in_span(at, span) * (width - 1) as f64).round() as usize
}

/// Time represented by `column` of a bar `width` cells wide.
///
/// The first column maps to the span start and the last to the span end, so
/// clicking either edge reaches the catalog bounds.
pub fn time_at_column(
    column: usize,
    width: usize,
    span: (DateTime<Utc>, DateTime<Utc>),
) -> DateTime<Utc> {
    if width <= 1 {
        return span.0;
    }
    let ratio = (column.min(width - 1)) as f64 / (width - 1) as f64;
    span.0 + secs_to_duration(ratio * duration_to_secs(span.1 - span.0))
}

/// Build the bar cells.
///
/// Returns the characters and the marker column (`None` when there is no
/// span to draw the marker against).
pub fn build_timeline_chars(
    width: usize,
    span: Option<(DateTime<Utc>, DateTime<Utc>)>,
    events: &[Event],
    marker: DateTime<Utc>,
) -> (Vec<char>, Option<usize>) {
    let mut bar = vec![GAP; width];
    let Some(span) = span else {
        return (bar, None);
    };
    if width == 0 {
        return (bar, None);
    }

    for event in events {
        let from = column_for(event.start, width, span);
        let to = column_for(event.end, width, span).max(from + 1).min(width);
        for cell in &mut bar[from..to] {
            *cell = RECORDED;
        }
    }

    let marker_col = column_for(marker, width, span);
    bar[marker_col] = MARKER;
    (bar, Some(marker_col))
}

/// Timeline widget over a catalog.
pub struct TimelineBar<'a> {
    catalog: &'a EventCatalog,
    marker: DateTime<Utc>,
    dragging: bool,
}

impl<'a> TimelineBar<'a> {
    pub fn new(catalog: &'a EventCatalog, marker: DateTime<Utc>) -> Self {
        Self {
            catalog,
            marker,
            dragging: false,
        }
    }

    /// Highlight the marker while a drag is in progress.
    pub fn dragging(mut self, dragging: bool) -> Self {
        self.dragging = dragging;
        self
    }
}

impl Widget for TimelineBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let theme = current_theme();
        let span = self.catalog.span();
        let (bar, marker_col) =
            build_timeline_chars(area.width as usize, span, self.catalog.events(), self.marker);

        let mut marker_style = Style::default().fg(theme.marker);
        if self.dragging {
            marker_style = marker_style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
        }

        let spans: Vec<Span> = bar
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                let style = if Some(i) == marker_col {
                    marker_style
                } else if c == RECORDED {
                    Style::default().fg(theme.event_span)
                } else {
                    theme.text_secondary_style()
                };
                Span::styled(c.to_string(), style)
            })
            .collect();
        Paragraph::new(Line::from(spans)).render(Rect { height: 1, ..area }, buf);

        if area.height < 2 {
            return;
        }
        let labels = match span {
            Some((start, end)) => {
                let left = format_timestamp(start);
                let right = format_timestamp(end);
                let pad = (area.width as usize).saturating_sub(left.len() + right.len());
                format!("{}{}{}", left, " ".repeat(pad), right)
            }
            None => "no recordings".to_string(),
        };
        Paragraph::new(labels)
            .style(theme.text_secondary_style())
            .render(
                Rect {
                    y: area.y + 1,
                    height: 1,
                    ..area
                },
                buf,
            );
    }
}
