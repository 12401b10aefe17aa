//! Playback control for event video.
//!
//! The controller owns one [`MediaElement`] and reconciles it with the
//! active event, the video offset and the desired playing flag.
//!
//! # Architecture
//!
//! - `state`: pure state machine (`transition`) producing [`Effect`]s
//! - `controller`: applies effects to the element, drops stale media events
//! - `element`: the [`MediaElement`] trait and media event types
//!
//! Every source assignment bumps a generation counter. Media events carry
//! the generation they were emitted for, and anything older than the
//! current generation is ignored.

mod controller;
mod element;
mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use controller::PlaybackController;
pub use element::{MediaElement, MediaEvent, MediaEventKind, PlayRejected, ReadyState};
pub use state::{transition, Effect, Phase, PlaybackReport, PlayerInput, PlayerState, Transition};
