//! Next/previous selection over the current artist's tracks.
//!
//! Navigation never leaves the scoped playlist: browsing covers the whole
//! library, playing stays within one artist.

use rand::Rng;

use crate::library::Track;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// All tracks of `artist`, in library order.
pub fn scope_for_artist(full: &[Track], artist: &str) -> Vec<Track> {
    full.iter().filter(|t| t.artist == artist).cloned().collect()
}

/// The scoped list is rebuilt only when it is empty or belongs to another
/// artist.
pub fn needs_rescope(scoped: &[Track], artist: &str) -> bool {
    scoped.first().is_none_or(|t| t.artist != artist)
}

/// Position of the current track in `scoped`: 0 when nothing is loaded,
/// -1 when the loaded track is not part of the list.
fn current_index(scoped: &[Track], current: Option<u32>) -> isize {
    match current {
        None => 0,
        Some(id) => scoped
            .iter()
            .position(|t| t.id == id)
            .map(|p| p as isize)
            .unwrap_or(-1),
    }
}

fn linear_index(len: usize, current: isize, direction: Direction) -> usize {
    let len = len as isize;
    match direction {
        Direction::Next => (current + 1).rem_euclid(len) as usize,
        Direction::Previous if current > 0 => (current - 1) as usize,
        Direction::Previous => (len - 1) as usize,
    }
}

/// Pick the track to move to, or `None` when `scoped` is empty.
///
/// Shuffle draws uniformly from the whole scoped list in both directions and
/// may pick the current track again.
pub fn step<'a, R: Rng + ?Sized>(
    scoped: &'a [Track],
    current: Option<u32>,
    shuffle: bool,
    direction: Direction,
    rng: &mut R,
) -> Option<&'a Track> {
    if scoped.is_empty() {
        return None;
    }

    let index = if shuffle {
        rng.random_range(0..scoped.len())
    } else {
        linear_index(scoped.len(), current_index(scoped, current), direction)
    };
    scoped.get(index)
}
