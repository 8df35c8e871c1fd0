use std::{env, path::PathBuf, time::Duration};

use crate::library::LibrarySource;

use super::schema::{LibrarySettings, Settings, SourceKind};

/// Configuration loading helpers.
///
/// `Settings::load` reads an optional config file, then environment
/// variables (prefix `BLURPLAYER__`), and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("BLURPLAYER")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.playback.tick_ms == 0 {
            return Err("playback.tick_ms must be >= 1".to_string());
        }
        if !(self.playback.tick_quantum_secs > 0.0) {
            return Err("playback.tick_quantum_secs must be > 0".to_string());
        }
        if !(self.playback.fallback_duration_secs > 0.0) {
            return Err("playback.fallback_duration_secs must be > 0".to_string());
        }
        self.library.source().map(|_| ())
    }
}

impl LibrarySettings {
    /// Build the library source these settings describe.
    pub fn source(&self) -> Result<LibrarySource, String> {
        match self.source {
            SourceKind::Static => Ok(LibrarySource::Static),
            SourceKind::Remote => {
                let list_url = self
                    .list_url
                    .clone()
                    .filter(|u| !u.trim().is_empty())
                    .ok_or("library.list_url is required for a remote source")?;
                let base_url = self
                    .base_url
                    .clone()
                    .unwrap_or_else(|| derive_base_url(&list_url));
                Ok(LibrarySource::RemoteListing {
                    list_url,
                    base_url,
                    timeout: Duration::from_secs(self.request_timeout_secs.max(1)),
                })
            }
            SourceKind::Directory => {
                let root = self
                    .directory
                    .clone()
                    .ok_or("library.directory is required for a directory source")?;
                Ok(LibrarySource::Directory { root })
            }
        }
    }
}

/// Media prefix for a listing URL: the URL without its query, ending in `/`.
///
/// `https://b.example.com/?list-type=2` -> `https://b.example.com/`
pub fn derive_base_url(list_url: &str) -> String {
    let without_query = list_url.split(['?', '#']).next().unwrap_or(list_url);
    if without_query.ends_with('/') {
        without_query.to_string()
    } else {
        format!("{without_query}/")
    }
}

/// Resolve the config path from `BLURPLAYER_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("BLURPLAYER_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/blurplayer/config.toml`
/// or `~/.config/blurplayer/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else if let Some(home) = env::var_os("HOME") {
        Some(PathBuf::from(home).join(".config"))
    } else {
        None
    };

    config_home.map(|d| d.join("blurplayer").join("config.toml"))
}
