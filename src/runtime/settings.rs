use crate::config;

use super::cli::Cli;

pub fn load_settings(cli: &Cli) -> config::Settings {
    let mut settings = match config::Settings::load() {
        Ok(s) => s,
        Err(e) => {
            // Config is optional; failures should not prevent the app from starting.
            eprintln!("blurplayer: failed to load config, using defaults: {e}");
            config::Settings::default()
        }
    };
    cli.apply(&mut settings);

    if let Err(msg) = settings.validate() {
        eprintln!("blurplayer: invalid config, using defaults: {msg}");
        settings = config::Settings::default();
        cli.apply(&mut settings);
    }
    settings
}
