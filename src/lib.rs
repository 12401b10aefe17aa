//! camhist - review recorded camera events on a timeline
//!
//! The pieces, bottom up:
//!
//! - [`event`]: raw records and the normalized [`event::EventCatalog`]
//! - [`timeline`]: marker time to active event resolution, scrubbing
//! - [`playback`]: the player state machine and [`playback::PlaybackController`]
//! - [`viewer`]: [`viewer::HistoryViewer`], which ties them together
//! - [`source`]: where events come from (HTTP API, JSON file) and polling
//! - [`tui`]: the terminal front end

pub mod cli;
pub mod config;
pub mod event;
pub mod format;
pub mod media;
pub mod playback;
pub mod source;
pub mod theme;
pub mod timeline;
pub mod tui;
pub mod viewer;

pub use config::Config;
pub use event::{Event, EventCatalog};
pub use viewer::{HistoryViewer, ViewerOptions};
