//! Folder tree view state.
//!
//! Accordion behaviour: at most one artist and one album are open at a
//! time. Opening another artist closes the previous one together with its
//! album.

use crate::library::{Library, Track, TrackDuration};

/// One visible line of the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeRow {
    Artist {
        name: String,
        expanded: bool,
    },
    Album {
        artist: String,
        name: String,
        expanded: bool,
        has_cover: bool,
    },
    Track {
        id: u32,
        title: String,
        duration: TrackDuration,
    },
}

impl TreeRow {
    /// Indentation level.
    pub fn depth(&self) -> usize {
        match self {
            Self::Artist { .. } => 0,
            Self::Album { .. } => 1,
            Self::Track { .. } => 2,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderTree {
    open_artist: Option<String>,
    open_album: Option<String>,
    cursor: usize,
}

impl FolderTree {
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[cfg(test)]
    pub fn open_artist(&self) -> Option<&str> {
        self.open_artist.as_deref()
    }

    #[cfg(test)]
    pub fn open_album(&self) -> Option<&str> {
        self.open_album.as_deref()
    }

    /// Currently visible rows, top to bottom.
    pub fn rows(&self, library: &Library) -> Vec<TreeRow> {
        let mut rows = Vec::new();
        for artist in &library.artists {
            let artist_open = self.open_artist.as_deref() == Some(artist.name.as_str());
            rows.push(TreeRow::Artist {
                name: artist.name.clone(),
                expanded: artist_open,
            });
            if !artist_open {
                continue;
            }
            for album in &artist.albums {
                let album_open = self.open_album.as_deref() == Some(album.name.as_str());
                rows.push(TreeRow::Album {
                    artist: artist.name.clone(),
                    name: album.name.clone(),
                    expanded: album_open,
                    has_cover: album.cover_ref.is_some(),
                });
                if album_open {
                    rows.extend(album.tracks.iter().map(|t| TreeRow::Track {
                        id: t.id,
                        title: t.title.clone(),
                        duration: t.duration,
                    }));
                }
            }
        }
        rows
    }

    pub fn toggle_artist(&mut self, name: &str) {
        if self.open_artist.as_deref() == Some(name) {
            self.open_artist = None;
        } else {
            self.open_artist = Some(name.to_string());
        }
        self.open_album = None;
    }

    pub fn toggle_album(&mut self, artist: &str, album: &str) {
        if self.open_artist.as_deref() != Some(artist) {
            self.open_artist = Some(artist.to_string());
            self.open_album = Some(album.to_string());
        } else if self.open_album.as_deref() == Some(album) {
            self.open_album = None;
        } else {
            self.open_album = Some(album.to_string());
        }
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self, library: &Library) {
        let last = self.rows(library).len().saturating_sub(1);
        self.cursor = (self.cursor + 1).min(last);
    }

    pub fn set_cursor(&mut self, row: usize, library: &Library) {
        let last = self.rows(library).len().saturating_sub(1);
        self.cursor = row.min(last);
    }

    /// Act on the row under the cursor. Folder rows toggle and return
    /// `None`; a track row returns its id for the caller to play.
    pub fn activate(&mut self, library: &Library) -> Option<u32> {
        let row = self.rows(library).into_iter().nth(self.cursor)?;
        match row {
            TreeRow::Artist { name, .. } => {
                self.toggle_artist(&name);
                self.set_cursor_to_artist(&name, library);
                None
            }
            TreeRow::Album { artist, name, .. } => {
                self.toggle_album(&artist, &name);
                None
            }
            TreeRow::Track { id, .. } => Some(id),
        }
    }

    /// Open the folders containing `track` and put the cursor on it.
    pub fn reveal(&mut self, track: &Track, library: &Library) {
        self.open_artist = Some(track.artist.clone());
        self.open_album = Some(track.album.clone());
        if let Some(pos) = self
            .rows(library)
            .iter()
            .position(|r| matches!(r, TreeRow::Track { id, .. } if *id == track.id))
        {
            self.cursor = pos;
        }
    }

    /// Drop open folders that no longer exist and keep the cursor in range.
    /// Used after a refresh.
    pub fn retain_valid(&mut self, library: &Library) {
        let artist_exists = self
            .open_artist
            .as_deref()
            .is_some_and(|a| library.artist(a).is_some());
        if !artist_exists {
            self.open_artist = None;
            self.open_album = None;
        } else if let (Some(artist), Some(album)) = (&self.open_artist, &self.open_album) {
            if library.album(artist, album).is_none() {
                self.open_album = None;
            }
        }
        let last = self.rows(library).len().saturating_sub(1);
        self.cursor = self.cursor.min(last);
    }

    fn set_cursor_to_artist(&mut self, name: &str, library: &Library) {
        if let Some(pos) = library.artists.iter().position(|a| a.name == name) {
            self.cursor = pos;
        }
    }
}
