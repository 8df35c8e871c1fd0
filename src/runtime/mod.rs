use std::io::stdout;

use clap::Parser;
use crossterm::event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;

mod cli;
mod event_loop;
mod logging;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = cli::Cli::parse();
    let settings = settings::load_settings(&cli);

    if let Err(e) = logging::init_logging(&settings.logging) {
        eprintln!("blurplayer: logging disabled: {e}");
    }

    let source = settings.library.source()?;
    let startup::Startup {
        mut app,
        mut media,
        media_events,
    } = startup::build(&settings, &source);

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::new();
        event_loop::run(
            &mut terminal,
            &settings,
            &source,
            &mut app,
            media.as_mut(),
            media_events.as_ref(),
            &mut state,
        )
    })();

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableFocusChange,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    // Joins the audio thread.
    drop(media);
    info!("shut down");

    run_result
}
