//! TUI (Text User Interface) for the history viewer
//!
//! Renders the viewer with ratatui/crossterm and drives a simulated media
//! element in place of a video surface.

pub mod app;
pub mod sim;
pub mod status_footer;
pub mod viewer_app;
pub mod widgets;

pub use app::App;
pub use sim::SimulatedElement;
pub use viewer_app::{key_action, Action, InputResult, ViewerApp};
