use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use tracing::debug;

use super::model::{LibraryBuilder, LoadedLibrary, TrackDuration};

/// Extensions treated as audio (compared case-insensitively, without dot).
pub const AUDIO_EXTENSIONS: [&str; 5] = ["mp3", "wav", "flac", "m4a", "ogg"];

/// Cover art candidates, highest priority first.
pub const COVER_CANDIDATES: [&str; 5] = [
    "cover.jpg",
    "cover.jpeg",
    "cover.png",
    "folder.jpg",
    "album.jpg",
];

/// Turns object keys into playable references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlResolver {
    /// `base + percent-encoded key`; the whole key is encoded, `/` included.
    Base(String),
    /// Keys relative to a local root directory.
    Filesystem(PathBuf),
}

impl UrlResolver {
    pub fn resolve(&self, key: &str) -> String {
        match self {
            Self::Base(base) => format!("{}{}", base, urlencoding::encode(key)),
            Self::Filesystem(root) => {
                let mut path = root.clone();
                path.extend(key.split('/'));
                path.display().to_string()
            }
        }
    }
}

/// Strip a leading numeric ordering prefix (`01-`, `3_`, `012 `) and trim.
pub fn clean_name(name: &str) -> String {
    let digits = name.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return name.trim().to_string();
    }
    name[digits..]
        .trim_start_matches(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .trim()
        .to_string()
}

/// Return the name without its extension when the extension is audio.
fn audio_stem(name: &str) -> Option<&str> {
    let (stem, ext) = name.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();
    AUDIO_EXTENSIONS
        .iter()
        .any(|e| *e == ext)
        .then_some(stem)
}

fn is_audio_key(key: &str) -> bool {
    audio_stem(key).is_some()
}

/// Cover lookup over a key set, memoised per (artist folder, album folder).
struct CoverIndex<'a> {
    keys: HashSet<&'a str>,
    resolved: HashMap<(&'a str, &'a str), Option<String>>,
}

impl<'a> CoverIndex<'a> {
    fn new(keys: &'a [String]) -> Self {
        Self {
            keys: keys.iter().map(String::as_str).collect(),
            resolved: HashMap::new(),
        }
    }

    /// First existing candidate key under `artist/album/`.
    fn cover_key(&mut self, artist_folder: &'a str, album_folder: &'a str) -> Option<String> {
        let keys = &self.keys;
        self.resolved
            .entry((artist_folder, album_folder))
            .or_insert_with(|| {
                COVER_CANDIDATES
                    .iter()
                    .map(|c| format!("{artist_folder}/{album_folder}/{c}"))
                    .find(|k| keys.contains(k.as_str()))
            })
            .clone()
    }
}

/// Build the library tree and flat track list from `keys`, in input order.
///
/// A key is a track when it has at least three `/` segments and an audio
/// extension. Segment one is the artist folder, two the album folder, three
/// the file; each is shown in its cleaned form.
pub fn build(keys: &[String], resolver: &UrlResolver) -> LoadedLibrary {
    let mut covers = CoverIndex::new(keys);
    let mut builder = LibraryBuilder::new();

    for key in keys {
        let parts: Vec<&str> = key.split('/').collect();
        if parts.len() < 3 || !is_audio_key(key) {
            continue;
        }
        let (artist_folder, album_folder, file_name) = (parts[0], parts[1], parts[2]);

        let artist = clean_name(artist_folder);
        let album = clean_name(album_folder);
        let title = clean_name(audio_stem(file_name).unwrap_or(file_name));

        let cover_ref = covers
            .cover_key(artist_folder, album_folder)
            .map(|k| resolver.resolve(&k));

        builder.push(
            &artist,
            &album,
            &title,
            resolver.resolve(key),
            cover_ref,
            TrackDuration::Unknown,
        );
    }

    let loaded = builder.finish();
    debug!(
        keys = keys.len(),
        tracks = loaded.tracks.len(),
        artists = loaded.library.artists.len(),
        "built library"
    );
    loaded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_name_strips_numeric_prefixes() {
        assert_eq!(clean_name("01-Intro"), "Intro");
        assert_eq!(clean_name("3_Song"), "Song");
        assert_eq!(clean_name("012 Track"), "Track");
        assert_eq!(clean_name("07 - _Mixed"), "Mixed");
        assert_eq!(clean_name("  Plain  "), "Plain");
        assert_eq!(clean_name("Song 2"), "Song 2");
        assert_eq!(clean_name("42"), "");
    }

    #[test]
    fn audio_stem_matches_known_extensions_case_insensitive() {
        assert_eq!(audio_stem("a.mp3"), Some("a"));
        assert_eq!(audio_stem("a.MP3"), Some("a"));
        assert_eq!(audio_stem("a.b.FlAc"), Some("a.b"));
        assert_eq!(audio_stem("a.m4a"), Some("a"));
        assert_eq!(audio_stem("a.jpg"), None);
        assert_eq!(audio_stem("mp3"), None);
    }

    #[test]
    fn url_resolver_percent_encodes_whole_key() {
        let r = UrlResolver::Base("https://example.test/bucket/".to_string());
        assert_eq!(
            r.resolve("A B/X/01 song.mp3"),
            "https://example.test/bucket/A%20B%2FX%2F01%20song.mp3"
        );
    }

    #[test]
    fn url_resolver_joins_filesystem_root() {
        let r = UrlResolver::Filesystem(PathBuf::from("/music"));
        let expected = PathBuf::from("/music").join("A").join("X").join("s.mp3");
        assert_eq!(r.resolve("A/X/s.mp3"), expected.display().to_string());
    }
}
