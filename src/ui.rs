//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.
//! `draw` reports where the progress bar and the tree ended up so the event
//! loop can hit-test mouse input against the last frame.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, Padding, Paragraph, Wrap},
};

use crate::app::{App, TreeRow};
use crate::config::UiSettings;
use crate::library::TrackDuration;
use crate::playback::PlayerStatus;

const CONTROLS: &[(&str, &str)] = &[
    ("j/k", "up/down"),
    ("enter", "open/play"),
    ("space", "play/pause"),
    ("h/l", "prev/next"),
    ("x", "stop"),
    ("s", "shuffle"),
    ("i", "info"),
    ("R", "refresh"),
    ("click/drag bar", "seek"),
    ("q", "quit"),
];

/// Screen areas of the last frame, for mouse hit-testing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiLayout {
    pub progress: Rect,
    /// Inner area of the tree list.
    pub tree: Rect,
    /// Index of the first tree row drawn.
    pub tree_offset: usize,
}

impl UiLayout {
    /// Tree row under the terminal cell `(x, y)`.
    pub fn tree_row_at(&self, x: u16, y: u16) -> Option<usize> {
        if !contains(self.tree, x, y) {
            return None;
        }
        Some(self.tree_offset + usize::from(y - self.tree.y))
    }

    pub fn in_progress_bar(&self, x: u16, y: u16) -> bool {
        contains(self.progress, x, y)
    }

    /// Seek fraction for column `x` of the progress bar.
    pub fn progress_fraction_at(&self, x: u16) -> f64 {
        if self.progress.width == 0 {
            return 0.0;
        }
        let dx = x.saturating_sub(self.progress.x);
        f64::from(dx) / f64::from(self.progress.width)
    }
}

fn contains(r: Rect, x: u16, y: u16) -> bool {
    x >= r.x && x < r.x + r.width && y >= r.y && y < r.y + r.height
}

fn controls_text() -> String {
    CONTROLS
        .iter()
        .map(|(k, v)| format!("[{k}] {v}"))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format seconds as `m:ss`.
pub fn format_clock(secs: f64) -> String {
    TrackDuration::Seconds(secs).to_string()
}

fn status_label(status: PlayerStatus) -> &'static str {
    match status {
        PlayerStatus::Stopped => "Stopped",
        PlayerStatus::Loaded => "Ready",
        PlayerStatus::Playing => "Playing",
        PlayerStatus::Paused => "Paused",
        PlayerStatus::Errored => "Error loading track",
    }
}

fn tree_line(row: &TreeRow, playing_id: Option<u32>) -> String {
    let indent = "  ".repeat(row.depth());
    match row {
        TreeRow::Artist { name, expanded } => {
            let marker = if *expanded { "v" } else { ">" };
            format!("{indent}{marker} {name}")
        }
        TreeRow::Album {
            name,
            expanded,
            has_cover,
            ..
        } => {
            let marker = if *expanded { "v" } else { ">" };
            let cover = if *has_cover { " [cover]" } else { "" };
            format!("{indent}{marker} {name}{cover}")
        }
        TreeRow::Track {
            id,
            title,
            duration,
        } => {
            let now = if playing_id == Some(*id) { "* " } else { "  " };
            let dur = match duration {
                TrackDuration::Unknown => "--:--".to_string(),
                d => d.to_string(),
            };
            format!("{indent}{now}{title}  {dur}")
        }
    }
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn left_padded(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        })
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(frame: &mut Frame, app: &App, ui_settings: &UiSettings) -> UiLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" blurplayer ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Now playing
    let session = &app.session;
    let now_playing = match session.current_track() {
        Some(track) => {
            let mut lines = vec![
                format!("{}: {}", status_label(session.status()), track.title),
                format!("{} - {}", track.artist, track.album),
            ];
            let mut extra: Vec<String> = Vec::new();
            if let Some((n, total)) = app.playlist_position() {
                extra.push(format!("{n} of {total}"));
            }
            extra.push(format!(
                "Shuffle: {}",
                if session.shuffle() { "ON" } else { "OFF" }
            ));
            if ui_settings.show_cover_refs {
                if let Some(cover) = &track.cover_ref {
                    extra.push(format!("Cover: {cover}"));
                }
            }
            lines.push(extra.join(" • "));
            lines.join("\n")
        }
        None => format!(
            "Select a track\n{} tracks from {}",
            app.tracks().len(),
            app.source_label()
        ),
    };
    let now_playing = Paragraph::new(now_playing)
        .block(left_padded(" now playing "))
        .wrap(Wrap { trim: true });
    frame.render_widget(now_playing, chunks[1]);

    // Progress
    let clock = &session.clock;
    let progress = Gauge::default()
        .ratio(clock.progress().clamp(0.0, 1.0))
        .label(format!(
            "{} / {}",
            format_clock(clock.current_time()),
            format_clock(clock.duration())
        ))
        .gauge_style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(progress, chunks[2]);

    // Folder tree
    let rows = app.tree.rows(app.library());
    let tree_block = Block::default().borders(Borders::ALL).title(" library ");
    let tree_inner = tree_block.inner(chunks[3]);

    // Center the cursor when possible; only build items for the visible window.
    let total = rows.len();
    let list_height = tree_inner.height as usize;
    let sel_pos = app.tree.cursor().min(total.saturating_sub(1));
    let (start, end, selected_pos_in_visible) = if total <= list_height || list_height == 0 {
        (0, total, sel_pos)
    } else {
        let half = list_height / 2;
        let mut start = sel_pos.saturating_sub(half);
        if start + list_height > total {
            start = total - list_height;
        }
        (start, start + list_height, sel_pos - start)
    };

    let playing_id = session.listed_id();
    let items: Vec<ListItem> = rows[start..end]
        .iter()
        .map(|row| {
            let item = ListItem::new(tree_line(row, playing_id));
            match row {
                TreeRow::Artist { .. } => item.bold(),
                TreeRow::Track { id, .. } if playing_id == Some(*id) => item.italic(),
                _ => item,
            }
        })
        .collect();

    let list = List::new(items)
        .block(tree_block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ratatui::widgets::ListState::default();
    if total > 0 {
        state.select(Some(selected_pos_in_visible));
    }
    frame.render_stateful_widget(list, chunks[3], &mut state);

    // Info overlay (keeps the tree visible under it)
    if app.info_window {
        let popup_area = centered_rect_sized(72, 9, chunks[3]);
        frame.render_widget(Clear, popup_area);

        let info = match session.current_track() {
            Some(track) => format!(
                "Title: {}\nArtist: {}\nAlbum: {}\nDuration: {}\nCover: {}",
                track.title,
                track.artist,
                track.album,
                track.duration,
                track.cover_ref.as_deref().unwrap_or("-"),
            ),
            None => "No track loaded".to_string(),
        };
        let info = Paragraph::new(info)
            .block(left_padded(" info (i closes) "))
            .wrap(Wrap { trim: true });
        frame.render_widget(info, popup_area);
    }

    // Footer: status message or controls
    let footer_text = match (&app.status_message, session.last_error()) {
        (Some(msg), _) => msg.clone(),
        (None, Some(err)) => format!("media error: {err}"),
        (None, None) => controls_text(),
    };
    let footer_title = if app.is_refreshing() {
        " refreshing... "
    } else {
        " controls "
    };
    let footer = Paragraph::new(footer_text)
        .block(left_padded(footer_title))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);

    UiLayout {
        progress: chunks[2],
        tree: tree_inner,
        tree_offset: start,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_format() {
        assert_eq!(format_clock(0.0), "0:00");
        assert_eq!(format_clock(74.9), "1:14");
        assert_eq!(format_clock(600.0), "10:00");
    }

    #[test]
    fn tree_lines_mark_expansion_and_playing_track() {
        let artist = TreeRow::Artist {
            name: "Marz".into(),
            expanded: true,
        };
        assert_eq!(tree_line(&artist, None), "v Marz");

        let track = TreeRow::Track {
            id: 4,
            title: "Lemon".into(),
            duration: TrackDuration::Unknown,
        };
        assert_eq!(tree_line(&track, Some(4)), "    * Lemon  --:--");
        assert_eq!(tree_line(&track, None), "      Lemon  --:--");
    }

    #[test]
    fn layout_hit_testing() {
        let layout = UiLayout {
            progress: Rect::new(0, 8, 100, 1),
            tree: Rect::new(1, 10, 40, 5),
            tree_offset: 3,
        };
        assert!(layout.in_progress_bar(50, 8));
        assert!(!layout.in_progress_bar(50, 9));
        assert_eq!(layout.progress_fraction_at(25), 0.25);
        assert_eq!(layout.tree_row_at(5, 10), Some(3));
        assert_eq!(layout.tree_row_at(5, 14), Some(7));
        assert_eq!(layout.tree_row_at(5, 15), None);
        assert_eq!(layout.tree_row_at(0, 12), None);
    }
}
