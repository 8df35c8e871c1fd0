//! The `App` model.

use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::library::{Library, LibraryError, LoadedLibrary, Track, TrackDuration};
use crate::media::{MediaBackend, MediaEvent, MediaEventKind};
use crate::playback::{ClockMode, Direction, PlaybackSession, PlayerStatus, TickOutcome};

use super::intent::{Command, Intent, RefreshOutcome};
use super::tree::FolderTree;

pub struct App {
    loaded: LoadedLibrary,
    pub session: PlaybackSession,
    pub tree: FolderTree,
    source_label: String,

    refreshing: bool,
    /// Last refresh or sequencing problem, shown in the status line.
    pub status_message: Option<String>,

    pub info_window: bool,
    /// Reveal the newly loaded track in the tree after next/previous.
    pub follow_playback: bool,

    /// Bumped on every media `load`; events of older loads are ignored.
    media_generation: u64,
    tick_quantum: f64,
    rng: StdRng,
}

impl App {
    pub fn new(
        loaded: LoadedLibrary,
        mut session: PlaybackSession,
        source_label: impl Into<String>,
        tick_quantum: f64,
        rng: StdRng,
    ) -> Self {
        session.replace_playlist(loaded.tracks.clone());
        Self {
            loaded,
            session,
            tree: FolderTree::default(),
            source_label: source_label.into(),
            refreshing: false,
            status_message: None,
            info_window: false,
            follow_playback: true,
            media_generation: 0,
            tick_quantum,
            rng,
        }
    }

    pub fn library(&self) -> &Library {
        &self.loaded.library
    }

    pub fn tracks(&self) -> &[Track] {
        &self.loaded.tracks
    }

    pub fn source_label(&self) -> &str {
        &self.source_label
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    #[cfg(test)]
    pub fn media_generation(&self) -> u64 {
        self.media_generation
    }

    /// "n of N": the current track's 1-based position in the flat list.
    pub fn playlist_position(&self) -> Option<(usize, usize)> {
        let id = self.session.listed_id()?;
        let n = self.loaded.position_of(id)?;
        Some((n, self.loaded.tracks.len()))
    }

    pub fn toggle_info_window(&mut self) {
        self.info_window = !self.info_window;
    }

    pub fn tree_down(&mut self) {
        self.tree.move_down(&self.loaded.library);
    }

    pub fn tree_up(&mut self) {
        self.tree.move_up();
    }

    /// Enter on the tree cursor. Returns a track id to play.
    pub fn tree_activate(&mut self) -> Option<u32> {
        self.tree.activate(&self.loaded.library)
    }

    /// Click on tree row `row`.
    pub fn tree_activate_row(&mut self, row: usize) -> Option<u32> {
        self.tree.set_cursor(row, &self.loaded.library);
        self.tree.activate(&self.loaded.library)
    }

    /// Apply one intent. Returns work the runtime must carry out.
    pub fn apply(&mut self, intent: Intent, media: &mut dyn MediaBackend) -> Option<Command> {
        debug!(?intent, "apply");
        match intent {
            Intent::SelectTrack(id) => self.select_and_play(id, media),
            Intent::TogglePlayPause => {
                if self.session.is_playing() {
                    self.pause(media);
                } else {
                    self.play(media);
                }
            }
            Intent::Play => self.play(media),
            Intent::Pause => self.pause(media),
            Intent::Stop => {
                self.session.stop();
                media.stop();
            }
            Intent::Next => self.advance(Direction::Next, media),
            Intent::Previous => self.advance(Direction::Previous, media),
            Intent::ToggleShuffle => {
                let on = self.session.toggle_shuffle();
                info!(shuffle = on, "shuffle toggled");
            }
            Intent::Seek(fraction) => {
                if let Some(time) = self.session.seek(fraction) {
                    media.seek(time);
                }
            }
            Intent::Refresh => {
                if self.begin_refresh() == RefreshOutcome::Started {
                    return Some(Command::StartRefresh);
                }
            }
            Intent::ToggleInfo => self.toggle_info_window(),
            Intent::Quit => return Some(Command::Quit),
        }
        None
    }

    fn play(&mut self, media: &mut dyn MediaBackend) {
        // A failed load leaves the backend with nothing to play.
        let reload = self.session.status() == PlayerStatus::Errored;
        if self.session.play() {
            if reload {
                self.load_current(media);
            }
            media.play();
        }
    }

    fn pause(&mut self, media: &mut dyn MediaBackend) {
        if self.session.pause() {
            media.pause();
        }
    }

    /// Hand the current track to the media backend under a new generation.
    fn load_current(&mut self, media: &mut dyn MediaBackend) {
        let Some(track) = self.session.current_track() else {
            return;
        };
        self.media_generation += 1;
        media.load(self.media_generation, &track.source_ref);
    }

    fn select_and_play(&mut self, id: u32, media: &mut dyn MediaBackend) {
        if let Err(e) = self.session.select(id) {
            warn!(error = %e, "select failed");
            self.status_message = Some(e.to_string());
            return;
        }
        self.status_message = None;
        self.load_current(media);
        self.play(media);
    }

    fn advance(&mut self, direction: Direction, media: &mut dyn MediaBackend) {
        let advanced = match direction {
            Direction::Next => self.session.next(&mut self.rng),
            Direction::Previous => self.session.previous(&mut self.rng),
        };
        match advanced {
            Ok(resume) => {
                self.load_current(media);
                if resume {
                    media.play();
                }
                if self.follow_playback {
                    if let Some(track) = self.session.current_track() {
                        self.tree.reveal(track, &self.loaded.library);
                    }
                }
            }
            Err(e) => {
                debug!(error = %e, ?direction, "nothing to advance to");
                self.status_message = Some(e.to_string());
            }
        }
    }

    fn on_track_ended(&mut self, media: &mut dyn MediaBackend) {
        debug!(id = ?self.session.current_id(), "track ended");
        if self.session.scoped_playlist().is_empty() {
            self.session.stop();
            media.stop();
            return;
        }
        self.advance(Direction::Next, media);
    }

    /// Backend notification. Ignored for stale generations and while the
    /// clock is simulated.
    pub fn on_media_event(&mut self, event: MediaEvent, media: &mut dyn MediaBackend) {
        if event.generation != self.media_generation {
            debug!(
                generation = event.generation,
                current = self.media_generation,
                "dropping stale media event"
            );
            return;
        }
        if self.session.clock.mode() != ClockMode::Bound {
            return;
        }

        match event.kind {
            MediaEventKind::MetadataReady { duration } => {
                self.session.clock.set_duration(duration);
                let d = TrackDuration::Seconds(duration);
                if let Some(id) = self.session.set_current_duration(d) {
                    self.loaded.set_duration(id, d);
                }
            }
            MediaEventKind::PositionChanged { time } => self.session.clock.set_position(time),
            MediaEventKind::Ended => self.on_track_ended(media),
            MediaEventKind::Error(message) => {
                warn!(%message, id = ?self.session.current_id(), "media error");
                self.session.mark_errored(message);
            }
        }
    }

    /// One simulated-clock tick. No-op unless simulated and playing.
    pub fn tick(&mut self, media: &mut dyn MediaBackend) {
        if self.session.clock.mode() != ClockMode::Simulated || !self.session.is_playing() {
            return;
        }
        if self.session.clock.tick(self.tick_quantum) == TickOutcome::Ended {
            self.on_track_ended(media);
        }
    }

    /// Mark a refresh as in flight, unless one already is.
    pub fn begin_refresh(&mut self) -> RefreshOutcome {
        if self.refreshing {
            info!("refresh already running, request ignored");
            return RefreshOutcome::AlreadyRunning;
        }
        self.refreshing = true;
        self.status_message = Some("refreshing library...".to_string());
        RefreshOutcome::Started
    }

    /// Result of a refresh started by `begin_refresh`. A failure keeps the
    /// current library.
    pub fn finish_refresh(&mut self, result: Result<LoadedLibrary, LibraryError>) {
        self.refreshing = false;
        match result {
            Ok(loaded) => {
                info!(tracks = loaded.tracks.len(), "library refreshed");
                self.session.replace_playlist(loaded.tracks.clone());
                self.loaded = loaded;
                self.tree.retain_valid(&self.loaded.library);
                self.status_message = None;
            }
            Err(e) => {
                warn!(error = %e, "refresh failed");
                self.status_message = Some(format!("refresh failed: {e}"));
            }
        }
    }
}
