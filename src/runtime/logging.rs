use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::LoggingSettings;

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "BLURPLAYER_LOG";

/// Install a file-backed subscriber. The terminal belongs to the UI, so
/// without a configured file nothing is logged. Returns whether logging is
/// active.
pub fn init_logging(settings: &LoggingSettings) -> Result<bool, Box<dyn std::error::Error>> {
    let Some(path) = &settings.file else {
        return Ok(false);
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(&settings.level));

    let subscriber = tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_env_filter(filter)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(true)
}
