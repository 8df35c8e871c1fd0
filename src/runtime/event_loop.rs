use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{debug, warn};

use crate::app::{App, Command, Intent};
use crate::config;
use crate::library::{LibraryError, LibrarySource, LoadedLibrary};
use crate::media::{MediaBackend, MediaEvent};
use crate::playback::DragGesture;
use crate::ui::{self, UiLayout};

const INPUT_POLL: Duration = Duration::from_millis(50);

type RefreshResult = Result<LoadedLibrary, LibraryError>;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Active progress-bar drag. Dropped on release and on any non-drag
    /// event, so a lost mouse-up can never leave it dangling.
    drag: Option<DragGesture>,
    /// Layout of the last frame, for mouse hit-testing.
    layout: UiLayout,
    last_tick: Instant,
    refresh_rx: Option<Receiver<RefreshResult>>,
}

impl EventLoopState {
    pub fn new() -> Self {
        Self {
            drag: None,
            layout: UiLayout::default(),
            last_tick: Instant::now(),
            refresh_rx: None,
        }
    }
}

/// Run `source.load()` on a worker thread.
fn spawn_refresh(source: &LibrarySource, state: &mut EventLoopState) {
    let (tx, rx) = mpsc::channel::<RefreshResult>();
    let source = source.clone();
    thread::spawn(move || {
        let _ = tx.send(source.load());
    });
    state.refresh_rx = Some(rx);
}

fn poll_refresh(app: &mut App, state: &mut EventLoopState) {
    let Some(rx) = &state.refresh_rx else {
        return;
    };
    match rx.try_recv() {
        Ok(result) => {
            app.finish_refresh(result);
            state.refresh_rx = None;
        }
        Err(TryRecvError::Empty) => {}
        Err(TryRecvError::Disconnected) => {
            warn!("refresh worker exited without a result");
            app.finish_refresh(Err(LibraryError::ListingFailed(
                "refresh worker exited".to_string(),
            )));
            state.refresh_rx = None;
        }
    }
}

/// Apply an intent and carry out what the App asks for. Returns `true` on quit.
fn dispatch(
    intent: Intent,
    app: &mut App,
    media: &mut dyn MediaBackend,
    source: &LibrarySource,
    state: &mut EventLoopState,
) -> bool {
    match app.apply(intent, media) {
        Some(Command::StartRefresh) => {
            spawn_refresh(source, state);
            false
        }
        Some(Command::Quit) => true,
        None => false,
    }
}

/// Main terminal event loop: drains refresh results and media events,
/// drives the simulated clock, draws, and handles input. Returns `Ok(())`
/// when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    source: &LibrarySource,
    app: &mut App,
    media: &mut dyn MediaBackend,
    media_events: Option<&Receiver<MediaEvent>>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    let tick_every = Duration::from_millis(settings.playback.tick_ms.max(1));

    // Initial load goes through the same path as a manual refresh.
    dispatch(Intent::Refresh, app, media, source, state);

    loop {
        poll_refresh(app, state);

        if let Some(rx) = media_events {
            while let Ok(ev) = rx.try_recv() {
                app.on_media_event(ev, media);
            }
        }

        if state.last_tick.elapsed() >= tick_every {
            app.tick(media);
            state.last_tick = Instant::now();
        }

        let mut layout = state.layout;
        terminal.draw(|f| layout = ui::draw(f, app, &settings.ui))?;
        state.layout = layout;

        let until_tick = tick_every.saturating_sub(state.last_tick.elapsed());
        if !event::poll(INPUT_POLL.min(until_tick))? {
            continue;
        }

        let quit = match event::read()? {
            Event::Mouse(m) => handle_mouse(m, app, media, source, state),
            Event::Key(key) => {
                state.drag = None;
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                handle_key_event(key, app, media, source, state)
            }
            _ => {
                // Focus loss, resize, paste.
                state.drag = None;
                false
            }
        };
        if quit {
            return Ok(());
        }
    }
}

fn handle_key_event(
    key: KeyEvent,
    app: &mut App,
    media: &mut dyn MediaBackend,
    source: &LibrarySource,
    state: &mut EventLoopState,
) -> bool {
    let intent = match key.code {
        KeyCode::Char('q') => Some(Intent::Quit),
        KeyCode::Char('j') | KeyCode::Down => {
            app.tree_down();
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.tree_up();
            None
        }
        KeyCode::Enter => app.tree_activate().map(Intent::SelectTrack),
        KeyCode::Char(' ') | KeyCode::Char('p') => Some(Intent::TogglePlayPause),
        KeyCode::Char('l') | KeyCode::Right => Some(Intent::Next),
        KeyCode::Char('h') | KeyCode::Left => Some(Intent::Previous),
        KeyCode::Char('x') => Some(Intent::Stop),
        KeyCode::Char('s') => Some(Intent::ToggleShuffle),
        KeyCode::Char('i') => Some(Intent::ToggleInfo),
        KeyCode::Char('R') | KeyCode::F(5) => Some(Intent::Refresh),
        KeyCode::Esc => {
            if app.info_window {
                Some(Intent::ToggleInfo)
            } else {
                app.status_message = None;
                None
            }
        }
        _ => None,
    };

    intent.is_some_and(|i| dispatch(i, app, media, source, state))
}

fn handle_mouse(
    m: MouseEvent,
    app: &mut App,
    media: &mut dyn MediaBackend,
    source: &LibrarySource,
    state: &mut EventLoopState,
) -> bool {
    match m.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            state.drag = None;
            if state.layout.in_progress_bar(m.column, m.row) {
                let fraction = state.layout.progress_fraction_at(m.column);
                state.drag = Some(DragGesture::begin(
                    m.column,
                    state.layout.progress.width,
                    fraction,
                ));
                return dispatch(Intent::Seek(fraction), app, media, source, state);
            }
            if let Some(row) = state.layout.tree_row_at(m.column, m.row) {
                if let Some(id) = app.tree_activate_row(row) {
                    return dispatch(Intent::SelectTrack(id), app, media, source, state);
                }
            }
            false
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            let Some(drag) = state.drag else {
                return false;
            };
            let fraction = drag.fraction_at(m.column);
            debug!(fraction, "drag seek");
            dispatch(Intent::Seek(fraction), app, media, source, state)
        }
        MouseEventKind::Up(_) => {
            state.drag = None;
            false
        }
        MouseEventKind::ScrollDown => {
            app.tree_down();
            false
        }
        MouseEventKind::ScrollUp => {
            app.tree_up();
            false
        }
        _ => false,
    }
}
