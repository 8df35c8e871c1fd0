use std::sync::mpsc::Receiver;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use crate::app::App;
use crate::config;
use crate::library::{LibrarySource, LoadedLibrary};
use crate::media::{MediaBackend, MediaEvent, NullBackend, RodioBackend};
use crate::playback::{ClockMode, PlaybackSession};

pub struct Startup {
    pub app: App,
    pub media: Box<dyn MediaBackend>,
    /// `None` for the simulated clock.
    pub media_events: Option<Receiver<MediaEvent>>,
}

/// The clock is simulated when asked for or when the source has nothing a
/// decoder could play.
pub fn clock_mode(settings: &config::Settings, source: &LibrarySource) -> ClockMode {
    if settings.playback.simulate || !source.has_playable_media() {
        ClockMode::Simulated
    } else {
        ClockMode::Bound
    }
}

/// Build the App with an empty library; the first refresh fills it.
pub fn build(settings: &config::Settings, source: &LibrarySource) -> Startup {
    let mode = clock_mode(settings, source);
    info!(source = %source.describe(), ?mode, "starting");

    let mut session = PlaybackSession::new(mode, settings.playback.fallback_duration_secs);
    session.set_shuffle(settings.playback.shuffle);

    let mut app = App::new(
        LoadedLibrary::default(),
        session,
        source.describe(),
        settings.playback.tick_quantum_secs,
        StdRng::from_os_rng(),
    );
    app.follow_playback = settings.ui.follow_playback;

    let (media, media_events): (Box<dyn MediaBackend>, _) = match mode {
        ClockMode::Simulated => (Box::new(NullBackend), None),
        ClockMode::Bound => {
            let timeout = Duration::from_secs(settings.library.request_timeout_secs.max(1));
            let (backend, events) = RodioBackend::spawn(timeout);
            (Box::new(backend), Some(events))
        }
    };

    Startup {
        app,
        media,
        media_events,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_source_is_always_simulated() {
        let settings = config::Settings::default();
        assert_eq!(
            clock_mode(&settings, &LibrarySource::Static),
            ClockMode::Simulated
        );
    }

    #[test]
    fn playable_source_is_bound_unless_simulate_is_set() {
        let mut settings = config::Settings::default();
        let dir = LibrarySource::Directory {
            root: "/music".into(),
        };
        assert_eq!(clock_mode(&settings, &dir), ClockMode::Bound);
        settings.playback.simulate = true;
        assert_eq!(clock_mode(&settings, &dir), ClockMode::Simulated);
    }
}
