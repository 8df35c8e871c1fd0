//! Playback state: the session, the artist-scoped sequencer and the clock.
//!
//! Everything here is plain data driven by the app layer; nothing in this
//! module touches a media backend directly.

mod clock;
mod error;
mod sequencer;
mod session;

pub use clock::{ClockMode, DragGesture, PlaybackClock, TickOutcome, clamp_fraction};
pub use error::PlaybackError;
pub use sequencer::{Direction, needs_rescope, scope_for_artist, step};
pub use session::{PlaybackSession, PlayerStatus};

#[cfg(test)]
mod tests;
