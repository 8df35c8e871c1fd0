use rand::Rng;
use tracing::debug;

use crate::library::{Track, TrackDuration};

use super::clock::{ClockMode, PlaybackClock};
use super::error::PlaybackError;
use super::sequencer::{Direction, needs_rescope, scope_for_artist, step};

/// Transport state of the session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum PlayerStatus {
    #[default]
    Stopped,
    Loaded,
    Playing,
    Paused,
    /// The media layer reported an error for the current track.
    Errored,
}

/// The single playback session.
///
/// `scoped_playlist` holds the current artist's tracks and is only rebuilt
/// when a track of a different artist is loaded (or it is empty).
#[derive(Debug, Clone)]
pub struct PlaybackSession {
    current_track: Option<Track>,
    /// Whether `current_track` is an entry of `full_playlist`. False once a
    /// refresh dropped it; its id then means nothing in the new list.
    listed: bool,
    status: PlayerStatus,
    pub clock: PlaybackClock,
    full_playlist: Vec<Track>,
    scoped_playlist: Vec<Track>,
    shuffle: bool,
    last_error: Option<String>,
    fallback_duration: f64,
}

impl PlaybackSession {
    /// `fallback_duration` is used by simulated clocks for tracks whose
    /// duration is unknown.
    pub fn new(mode: ClockMode, fallback_duration: f64) -> Self {
        Self {
            current_track: None,
            listed: false,
            status: PlayerStatus::Stopped,
            clock: PlaybackClock::new(mode),
            full_playlist: Vec::new(),
            scoped_playlist: Vec::new(),
            shuffle: false,
            last_error: None,
            fallback_duration,
        }
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current_track.as_ref()
    }

    pub fn current_id(&self) -> Option<u32> {
        self.current_track.as_ref().map(|t| t.id)
    }

    /// The current track's id, if it belongs to the loaded list.
    pub fn listed_id(&self) -> Option<u32> {
        self.current_id().filter(|_| self.listed)
    }

    pub fn status(&self) -> PlayerStatus {
        self.status
    }

    pub fn is_playing(&self) -> bool {
        self.status == PlayerStatus::Playing
    }

    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn set_shuffle(&mut self, on: bool) {
        self.shuffle = on;
    }

    pub fn toggle_shuffle(&mut self) -> bool {
        self.shuffle = !self.shuffle;
        self.shuffle
    }

    #[cfg(test)]
    pub fn full_playlist(&self) -> &[Track] {
        &self.full_playlist
    }

    pub fn scoped_playlist(&self) -> &[Track] {
        &self.scoped_playlist
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Point the session at a freshly loaded track list.
    ///
    /// Ids are per-load, so the current track is matched by its source
    /// reference. When it is gone it stays loaded but the scoped list is
    /// cleared.
    pub fn replace_playlist(&mut self, full: Vec<Track>) {
        self.full_playlist = full;

        let Some(current) = self.current_track.as_ref() else {
            self.scoped_playlist.clear();
            return;
        };

        match self
            .full_playlist
            .iter()
            .find(|t| t.source_ref == current.source_ref)
            .cloned()
        {
            Some(mut fresh) => {
                if fresh.duration == TrackDuration::Unknown {
                    fresh.duration = current.duration;
                }
                self.scoped_playlist = scope_for_artist(&self.full_playlist, &fresh.artist);
                self.current_track = Some(fresh);
                self.listed = true;
            }
            None => {
                debug!(source_ref = %current.source_ref, "current track vanished after refresh");
                self.scoped_playlist.clear();
                self.listed = false;
            }
        }
    }

    /// Replace the current track, rescoping lazily and rewinding the clock.
    /// The status becomes `Loaded`.
    pub fn load(&mut self, track: Track) {
        if needs_rescope(&self.scoped_playlist, &track.artist) {
            self.scoped_playlist = scope_for_artist(&self.full_playlist, &track.artist);
            debug!(artist = %track.artist, tracks = self.scoped_playlist.len(), "rescoped playlist");
        }

        let duration = match self.clock.mode() {
            ClockMode::Simulated => track.duration.seconds().unwrap_or(self.fallback_duration),
            ClockMode::Bound => track.duration.seconds().unwrap_or(0.0),
        };
        self.clock.reset(duration);
        self.current_track = Some(track);
        self.listed = true;
        self.status = PlayerStatus::Loaded;
        self.last_error = None;
    }

    /// Explicit pick from the full library.
    pub fn select(&mut self, id: u32) -> Result<&Track, PlaybackError> {
        let track = self
            .full_playlist
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or(PlaybackError::UnknownTrack(id))?;
        self.load(track);
        self.current_track.as_ref().ok_or(PlaybackError::UnknownTrack(id))
    }

    /// Move within the scoped playlist and load the result. Returns whether
    /// playback should resume (it does when the session was playing).
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        direction: Direction,
        rng: &mut R,
    ) -> Result<bool, PlaybackError> {
        let was_playing = self.is_playing();
        let next = step(
            &self.scoped_playlist,
            self.current_id(),
            self.shuffle,
            direction,
            rng,
        )
        .cloned()
        .ok_or(PlaybackError::NoTrackAvailable)?;

        self.load(next);
        if was_playing {
            self.status = PlayerStatus::Playing;
        }
        Ok(was_playing)
    }

    pub fn next<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<bool, PlaybackError> {
        self.advance(Direction::Next, rng)
    }

    pub fn previous<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<bool, PlaybackError> {
        self.advance(Direction::Previous, rng)
    }

    /// Returns `false` when nothing is loaded or already playing.
    pub fn play(&mut self) -> bool {
        if self.current_track.is_none() || self.status == PlayerStatus::Playing {
            return false;
        }
        self.status = PlayerStatus::Playing;
        self.last_error = None;
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.status != PlayerStatus::Playing {
            return false;
        }
        self.status = PlayerStatus::Paused;
        true
    }

    /// Rewind and stop; the current track stays loaded.
    pub fn stop(&mut self) {
        self.clock.rewind();
        self.status = PlayerStatus::Stopped;
    }

    /// Seek to a fraction of the track. Returns the absolute time to push
    /// to the media backend, or `None` when nothing is loaded or the
    /// duration is not known yet.
    pub fn seek(&mut self, fraction: f64) -> Option<f64> {
        self.current_track.as_ref()?;
        if !(self.clock.duration() > 0.0) {
            return None;
        }
        Some(self.clock.seek_fraction(fraction))
    }

    /// The media layer failed on the current track. Track and scoped list
    /// are left alone.
    pub fn mark_errored(&mut self, message: impl Into<String>) {
        self.status = PlayerStatus::Errored;
        self.last_error = Some(message.into());
    }

    /// Record a duration the media layer reported for the current track.
    ///
    /// The playlists are only touched while the track is still listed.
    /// Returns the listed id so callers can update their own copies.
    pub fn set_current_duration(&mut self, duration: TrackDuration) -> Option<u32> {
        let current = self.current_track.as_mut()?;
        current.duration = duration;
        let id = self.listed_id()?;
        let lists = self
            .full_playlist
            .iter_mut()
            .chain(self.scoped_playlist.iter_mut());
        for t in lists.filter(|t| t.id == id) {
            t.duration = duration;
        }
        Some(id)
    }
}
