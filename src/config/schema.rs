use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/blurplayer/config.toml` or
/// `~/.config/blurplayer/config.toml`
///
/// Precedence (highest wins):
/// 1) Command-line flags (source selection only)
/// 2) Environment variables (prefix `BLURPLAYER__`, `__` as nested separator)
/// 3) Config file (if present)
/// 4) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub playback: PlaybackSettings,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    /// The built-in sample playlist.
    #[default]
    Static,
    /// A bucket listing over HTTP.
    #[serde(alias = "bucket", alias = "s3")]
    Remote,
    /// A local `artist/album/file` tree.
    #[serde(alias = "dir", alias = "local")]
    Directory,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    pub source: SourceKind,
    /// Listing endpoint, e.g. `https://bucket.example.com/?list-type=2`.
    pub list_url: Option<String>,
    /// Prefix for media references. Derived from `list_url` when unset.
    pub base_url: Option<String>,
    pub directory: Option<PathBuf>,
    /// Per-request timeout for the listing and for media fetches.
    pub request_timeout_secs: u64,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            source: SourceKind::Static,
            list_url: None,
            base_url: None,
            directory: None,
            request_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Whether shuffle starts enabled.
    pub shuffle: bool,
    /// Advance a timer instead of playing audio, even for playable sources.
    pub simulate: bool,
    /// Simulated clock period (milliseconds).
    pub tick_ms: u64,
    /// Seconds added to the simulated clock on every tick.
    pub tick_quantum_secs: f64,
    /// Simulated duration for tracks whose length is unknown.
    pub fallback_duration_secs: f64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            shuffle: false,
            simulate: false,
            tick_ms: 100,
            tick_quantum_secs: 0.1,
            fallback_duration_secs: 240.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Show the album cover reference under the now-playing block.
    pub show_cover_refs: bool,
    /// Whether the tree follows next/previous and track ends.
    pub follow_playback: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ blurplayer ~ ".to_string(),
            show_cover_refs: true,
            follow_playback: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log file. Nothing is logged when unset: the terminal belongs to the UI.
    pub file: Option<PathBuf>,
    /// Default filter directive; `BLURPLAYER_LOG` overrides it.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file: None,
            level: "info".to_string(),
        }
    }
}
