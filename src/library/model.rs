use std::collections::HashMap;
use std::fmt;

/// Track length. Unknown until the media layer reports it, except for the
/// built-in sample playlist which ships with `m:ss` strings.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TrackDuration {
    #[default]
    Unknown,
    Seconds(f64),
}

impl TrackDuration {
    /// Parse `m:ss` (or a bare number of seconds).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        match s.split_once(':') {
            Some((m, sec)) => {
                let minutes: u64 = m.trim().parse().ok()?;
                let seconds: u64 = sec.trim().parse().ok()?;
                Some(Self::Seconds((minutes * 60 + seconds) as f64))
            }
            None => {
                let secs: f64 = s.parse().ok()?;
                (secs.is_finite() && secs >= 0.0).then_some(Self::Seconds(secs))
            }
        }
    }

    pub fn seconds(&self) -> Option<f64> {
        match self {
            Self::Unknown => None,
            Self::Seconds(s) => Some(*s),
        }
    }
}

impl fmt::Display for TrackDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.seconds().unwrap_or(0.0).max(0.0) as u64;
        write!(f, "{}:{:02}", secs / 60, secs % 60)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// Assigned once at discovery, starting at 1. Joins the flat list, the
    /// tree leaves and the playback session.
    pub id: u32,
    pub artist: String,
    pub album: String,
    pub title: String,
    /// Playable reference (URL or filesystem path).
    pub source_ref: String,
    pub cover_ref: Option<String>,
    pub duration: TrackDuration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Album {
    pub name: String,
    /// Discovery order.
    pub tracks: Vec<Track>,
    pub cover_ref: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Artist {
    pub name: String,
    pub albums: Vec<Album>,
}

/// Artist -> album -> tracks, iterated in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Library {
    pub artists: Vec<Artist>,
}

impl Library {
    pub fn artist(&self, name: &str) -> Option<&Artist> {
        self.artists.iter().find(|a| a.name == name)
    }

    pub fn album(&self, artist: &str, album: &str) -> Option<&Album> {
        self.artist(artist)?.albums.iter().find(|a| a.name == album)
    }
}

/// The result of a load: the tree and the flat list share track ids.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedLibrary {
    pub library: Library,
    pub tracks: Vec<Track>,
}

impl LoadedLibrary {
    /// 1-based position of `id` in the flat list.
    pub fn position_of(&self, id: u32) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id).map(|p| p + 1)
    }

    /// Record a duration reported by the media layer on both the flat list
    /// and the tree leaf.
    pub fn set_duration(&mut self, id: u32, duration: TrackDuration) -> bool {
        let mut found = false;
        for t in self.tracks.iter_mut().filter(|t| t.id == id) {
            t.duration = duration;
            found = true;
        }
        for album in self.library.artists.iter_mut().flat_map(|a| a.albums.iter_mut()) {
            for t in album.tracks.iter_mut().filter(|t| t.id == id) {
                t.duration = duration;
            }
        }
        found
    }
}

/// Accumulates tracks in discovery order, creating artist and album entries
/// on first sight and handing out sequential ids.
pub struct LibraryBuilder {
    library: Library,
    tracks: Vec<Track>,
    artist_index: HashMap<String, usize>,
    album_index: HashMap<(usize, String), usize>,
    next_id: u32,
}

impl Default for LibraryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LibraryBuilder {
    pub fn new() -> Self {
        Self {
            library: Library::default(),
            tracks: Vec::new(),
            artist_index: HashMap::new(),
            album_index: HashMap::new(),
            next_id: 1,
        }
    }

    /// Append a track. `cover_ref` also becomes the album cover when this
    /// call creates the album.
    pub fn push(
        &mut self,
        artist: &str,
        album: &str,
        title: &str,
        source_ref: String,
        cover_ref: Option<String>,
        duration: TrackDuration,
    ) -> u32 {
        let artist_pos = match self.artist_index.get(artist) {
            Some(&pos) => pos,
            None => {
                self.library.artists.push(Artist {
                    name: artist.to_string(),
                    albums: Vec::new(),
                });
                let pos = self.library.artists.len() - 1;
                self.artist_index.insert(artist.to_string(), pos);
                pos
            }
        };

        let albums = &mut self.library.artists[artist_pos].albums;
        let album_pos = match self.album_index.get(&(artist_pos, album.to_string())) {
            Some(&pos) => pos,
            None => {
                albums.push(Album {
                    name: album.to_string(),
                    tracks: Vec::new(),
                    cover_ref: cover_ref.clone(),
                });
                let pos = albums.len() - 1;
                self.album_index.insert((artist_pos, album.to_string()), pos);
                pos
            }
        };

        let id = self.next_id;
        self.next_id += 1;

        let track = Track {
            id,
            artist: artist.to_string(),
            album: album.to_string(),
            title: title.to_string(),
            source_ref,
            cover_ref,
            duration,
        };
        albums[album_pos].tracks.push(track.clone());
        self.tracks.push(track);
        id
    }

    pub fn finish(self) -> LoadedLibrary {
        LoadedLibrary {
            library: self.library,
            tracks: self.tracks,
        }
    }
}
