//! Media backends.
//!
//! The playback core never decodes audio itself. It drives a
//! `MediaBackend` with plain commands and hears back through `MediaEvent`s
//! on a channel. Every event carries the generation of the `load` it
//! belongs to so that late events from a previous track can be dropped.

mod error;
mod fetch;
mod null;
mod player;
mod thread;
mod types;

pub use error::MediaError;
pub use null::NullBackend;
pub use player::RodioBackend;
pub use types::{MediaEvent, MediaEventKind};

/// Commands understood by a media backend. Implementations must not block
/// the caller for longer than it takes to hand the command over.
pub trait MediaBackend {
    /// Start loading `url`; the backend stays paused until `play`.
    fn load(&mut self, generation: u64, url: &str);
    fn play(&mut self);
    fn pause(&mut self);
    /// Pause and rewind to the start.
    fn stop(&mut self);
    fn seek(&mut self, seconds: f64);
}

#[cfg(test)]
mod tests;
