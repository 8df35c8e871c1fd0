use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{info, warn};
use walkdir::WalkDir;

use super::error::LibraryError;
use super::listing::{HttpPageFetcher, list_all};
use super::model::{LibraryBuilder, LoadedLibrary, TrackDuration};
use super::taxonomy::{UrlResolver, build};

/// Where a library comes from. Every variant yields the same
/// `LoadedLibrary` shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibrarySource {
    /// Built-in sample playlist; its references are not playable media.
    Static,
    /// Bucket listing at `list_url`; media references are `base_url + key`.
    RemoteListing {
        list_url: String,
        base_url: String,
        timeout: Duration,
    },
    /// A local directory laid out as `artist/album/file`.
    Directory { root: PathBuf },
}

impl LibrarySource {
    /// Short human-readable description for the status line.
    pub fn describe(&self) -> String {
        match self {
            Self::Static => "sample playlist".to_string(),
            Self::RemoteListing { base_url, .. } => base_url.clone(),
            Self::Directory { root } => root.display().to_string(),
        }
    }

    /// Whether the references produced by this source can be handed to a
    /// media backend.
    pub fn has_playable_media(&self) -> bool {
        !matches!(self, Self::Static)
    }

    /// Discover the full library. Blocking; run it off the UI thread.
    pub fn load(&self) -> Result<LoadedLibrary, LibraryError> {
        let loaded = match self {
            Self::Static => sample_playlist(),
            Self::RemoteListing {
                list_url,
                base_url,
                timeout,
            } => {
                let fetcher = HttpPageFetcher::new(list_url.as_str(), *timeout)?;
                let keys = list_all(&fetcher)?;
                build(&keys, &UrlResolver::Base(base_url.clone()))
            }
            Self::Directory { root } => {
                let keys = directory_keys(root)?;
                build(&keys, &UrlResolver::Filesystem(root.clone()))
            }
        };

        info!(
            source = %self.describe(),
            tracks = loaded.tracks.len(),
            "library loaded"
        );
        Ok(loaded)
    }
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Walk `root` and return every file as a `/`-joined key relative to it,
/// sorted by file name within each directory.
pub(super) fn directory_keys(root: &Path) -> Result<Vec<String>, LibraryError> {
    if !root.is_dir() {
        return Err(LibraryError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("not a directory: {}", root.display()),
        )));
    }

    let mut keys = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.file_name().to_str().is_some_and(is_hidden));

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let parts: Option<Vec<&str>> = relative.components().map(|c| c.as_os_str().to_str()).collect();
        match parts {
            Some(parts) => keys.push(parts.join("/")),
            None => warn!(path = %entry.path().display(), "skipping non UTF-8 path"),
        }
    }

    Ok(keys)
}

const SAMPLE_PLAYLIST: [(&str, &str, &[(&str, &str, &str)]); 2] = [
    (
        "Marz",
        "Bleach",
        &[
            ("Bleach", "1:14", "audio/marz-bleach.mp3"),
            ("Side", "4:34", "audio/marz-side.mp3"),
            ("Third Eye", "4:34", "audio/marz-third-eye.mp3"),
            ("Steal My Shine", "4:40", "audio/marz-steal-my-shine.mp3"),
            ("Step Aside", "4:56", "audio/marz-step-aside.mp3"),
            ("Third Eye", "4:10", "audio/marz-third-eye-2.mp3"),
        ],
    ),
    (
        "Ghost Machine",
        "Various Tracks",
        &[
            ("Intro", "1:06", "audio/ghost-machine-intro.mp3"),
            ("Headstone", "4:14", "audio/ghost-machine-headstone.mp3"),
            ("Vegas Moon", "3:55", "audio/ghost-machine-vegas-moon.mp3"),
            ("God Forbid", "3:27", "audio/ghost-machine-god-forbid.mp3"),
            (
                "Scarred By Happiness (L.S.D.)",
                "5:19",
                "audio/ghost-machine-scarred.mp3",
            ),
        ],
    ),
];

fn sample_playlist() -> LoadedLibrary {
    let mut builder = LibraryBuilder::new();
    for (artist, album, tracks) in SAMPLE_PLAYLIST {
        for (title, duration, file) in tracks {
            builder.push(
                artist,
                album,
                title,
                file.to_string(),
                None,
                TrackDuration::parse(duration).unwrap_or_default(),
            );
        }
    }
    builder.finish()
}
