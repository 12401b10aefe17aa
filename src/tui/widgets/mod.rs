//! TUI widgets for the history viewer

pub mod timeline_bar;
pub mod video_panel;

pub use timeline_bar::{build_timeline_chars, time_at_column, TimelineBar};
pub use video_panel::{video_lines, VideoPanel};
