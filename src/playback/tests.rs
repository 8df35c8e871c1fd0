use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;
use crate::library::{Track, TrackDuration};

fn t(id: u32, artist: &str) -> Track {
    Track {
        id,
        artist: artist.into(),
        album: "Album".into(),
        title: format!("Song {id}"),
        source_ref: format!("ref-{id}"),
        cover_ref: None,
        duration: TrackDuration::Seconds(10.0),
    }
}

fn library() -> Vec<Track> {
    vec![
        t(1, "A"),
        t(2, "B"),
        t(3, "A"),
        t(4, "A"),
        t(5, "B"),
    ]
}

fn session(mode: ClockMode) -> PlaybackSession {
    let mut s = PlaybackSession::new(mode, 240.0);
    s.replace_playlist(library());
    s
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

#[test]
fn scope_for_artist_keeps_library_order() {
    let ids: Vec<u32> = scope_for_artist(&library(), "A").iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 3, 4]);
}

#[test]
fn step_on_empty_list_is_none() {
    assert!(step(&[], Some(1), false, Direction::Next, &mut rng()).is_none());
    assert!(step(&[], None, true, Direction::Previous, &mut rng()).is_none());
}

#[test]
fn linear_next_is_cyclic_and_previous_inverts_it() {
    let scoped = scope_for_artist(&library(), "A");
    let mut r = rng();

    for start in &scoped {
        let mut cur = start.id;
        for _ in 0..scoped.len() {
            cur = step(&scoped, Some(cur), false, Direction::Next, &mut r).unwrap().id;
        }
        assert_eq!(cur, start.id);

        let fwd = step(&scoped, Some(start.id), false, Direction::Next, &mut r).unwrap().id;
        let back = step(&scoped, Some(fwd), false, Direction::Previous, &mut r).unwrap().id;
        assert_eq!(back, start.id);
    }
}

#[test]
fn linear_wraps_at_both_ends() {
    let scoped = scope_for_artist(&library(), "A");
    let mut r = rng();
    assert_eq!(step(&scoped, Some(4), false, Direction::Next, &mut r).unwrap().id, 1);
    assert_eq!(step(&scoped, Some(1), false, Direction::Previous, &mut r).unwrap().id, 4);
}

#[test]
fn linear_without_current_track_starts_from_index_zero() {
    let scoped = scope_for_artist(&library(), "A");
    let mut r = rng();
    assert_eq!(step(&scoped, None, false, Direction::Next, &mut r).unwrap().id, 3);
    assert_eq!(step(&scoped, None, false, Direction::Previous, &mut r).unwrap().id, 4);
}

#[test]
fn linear_with_foreign_current_track_lands_on_ends() {
    let scoped = scope_for_artist(&library(), "A");
    let mut r = rng();
    assert_eq!(step(&scoped, Some(2), false, Direction::Next, &mut r).unwrap().id, 1);
    assert_eq!(step(&scoped, Some(2), false, Direction::Previous, &mut r).unwrap().id, 4);
}

#[test]
fn shuffle_always_returns_a_scoped_member() {
    let scoped = scope_for_artist(&library(), "A");
    let mut r = rng();
    for _ in 0..200 {
        let dir = if r.random_bool(0.5) { Direction::Next } else { Direction::Previous };
        let picked = step(&scoped, Some(1), true, dir, &mut r).unwrap();
        assert_eq!(picked.artist, "A");
    }
}

#[test]
fn selecting_another_artist_rescopes() {
    let mut s = session(ClockMode::Bound);
    s.select(1).unwrap();
    assert_eq!(s.scoped_playlist().iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 3, 4]);

    s.select(5).unwrap();
    assert_eq!(s.scoped_playlist().iter().map(|t| t.id).collect::<Vec<_>>(), vec![2, 5]);
    assert_eq!(s.current_id(), Some(5));
    assert_eq!(s.status(), PlayerStatus::Loaded);
}

#[test]
fn selecting_unknown_id_changes_nothing() {
    let mut s = session(ClockMode::Bound);
    s.select(1).unwrap();
    assert_eq!(s.select(42).unwrap_err(), PlaybackError::UnknownTrack(42));
    assert_eq!(s.current_id(), Some(1));
}

#[test]
fn select_resets_current_time() {
    let mut s = session(ClockMode::Simulated);
    s.select(1).unwrap();
    s.clock.set_position(7.0);
    s.select(3).unwrap();
    assert_eq!(s.clock.current_time(), 0.0);
}

#[test]
fn advance_without_scope_is_no_track_available() {
    let mut s = session(ClockMode::Bound);
    assert_eq!(
        s.previous(&mut rng()).unwrap_err(),
        PlaybackError::NoTrackAvailable
    );
    assert_eq!(s.current_track(), None);
    assert_eq!(s.status(), PlayerStatus::Stopped);
}

#[test]
fn advance_resumes_only_when_playing() {
    let mut s = session(ClockMode::Bound);
    s.select(1).unwrap();
    assert!(!s.advance(Direction::Next, &mut rng()).unwrap());
    assert_eq!(s.current_id(), Some(3));
    assert_eq!(s.status(), PlayerStatus::Loaded);

    assert!(s.play());
    assert!(s.next(&mut rng()).unwrap());
    assert_eq!(s.current_id(), Some(4));
    assert_eq!(s.status(), PlayerStatus::Playing);
}

#[test]
fn transport_state_machine() {
    let mut s = session(ClockMode::Bound);
    assert!(!s.play(), "nothing loaded");
    s.select(1).unwrap();
    assert!(s.play());
    assert!(!s.play());
    assert!(s.pause());
    assert_eq!(s.status(), PlayerStatus::Paused);
    assert!(!s.pause());
    assert!(s.play());
    s.clock.set_duration(10.0);
    s.clock.set_position(4.0);
    s.stop();
    assert_eq!(s.status(), PlayerStatus::Stopped);
    assert_eq!(s.clock.current_time(), 0.0);
    assert_eq!(s.current_id(), Some(1));
}

#[test]
fn error_keeps_track_and_scope() {
    let mut s = session(ClockMode::Bound);
    s.select(3).unwrap();
    s.play();
    s.mark_errored("decode failed");
    assert_eq!(s.status(), PlayerStatus::Errored);
    assert_eq!(s.last_error(), Some("decode failed"));
    assert_eq!(s.current_id(), Some(3));
    assert_eq!(s.scoped_playlist().len(), 3);

    assert!(s.play());
    assert_eq!(s.last_error(), None);
}

#[test]
fn replace_playlist_repoints_current_track_by_source() {
    let mut s = session(ClockMode::Bound);
    s.select(3).unwrap();

    let mut fresh = library();
    fresh.reverse();
    for (i, tr) in fresh.iter_mut().enumerate() {
        tr.id = 100 + i as u32;
    }
    s.replace_playlist(fresh);

    let cur = s.current_track().unwrap();
    assert_eq!(cur.source_ref, "ref-3");
    assert_eq!(cur.id, 102);
    assert_eq!(
        s.scoped_playlist().iter().map(|t| t.source_ref.as_str()).collect::<Vec<_>>(),
        vec!["ref-4", "ref-3", "ref-1"]
    );

    s.replace_playlist(vec![t(1, "B")]);
    assert_eq!(s.current_track().unwrap().source_ref, "ref-3");
    assert!(s.scoped_playlist().is_empty());
}

#[test]
fn simulated_clock_uses_fallback_for_unknown_duration() {
    let mut s = PlaybackSession::new(ClockMode::Simulated, 240.0);
    let mut tr = t(1, "A");
    tr.duration = TrackDuration::Unknown;
    s.replace_playlist(vec![tr]);
    s.select(1).unwrap();
    assert_eq!(s.clock.duration(), 240.0);
}

#[test]
fn set_current_duration_updates_every_copy() {
    let mut s = session(ClockMode::Bound);
    s.select(3).unwrap();
    assert_eq!(s.set_current_duration(TrackDuration::Seconds(99.0)), Some(3));
    assert_eq!(s.current_track().unwrap().duration, TrackDuration::Seconds(99.0));
    assert!(s.full_playlist().iter().any(|t| t.id == 3 && t.duration == TrackDuration::Seconds(99.0)));
    assert!(s.scoped_playlist().iter().any(|t| t.id == 3 && t.duration == TrackDuration::Seconds(99.0)));
}

#[test]
fn vanished_track_is_unlisted_and_keeps_its_duration_to_itself() {
    let mut s = session(ClockMode::Bound);
    s.select(3).unwrap();

    let mut fresh = vec![t(1, "A"), t(2, "A"), t(3, "A")];
    for tr in &mut fresh {
        tr.source_ref = format!("new-{}", tr.id);
    }
    s.replace_playlist(fresh);
    assert_eq!(s.current_id(), Some(3));
    assert_eq!(s.listed_id(), None);

    assert_eq!(s.set_current_duration(TrackDuration::Seconds(99.0)), None);
    assert_eq!(s.current_track().unwrap().duration, TrackDuration::Seconds(99.0));
    assert_eq!(s.full_playlist()[2].duration, TrackDuration::Seconds(10.0));

    s.select(1).unwrap();
    assert_eq!(s.listed_id(), Some(1));
}

#[test]
fn seek_waits_for_a_known_duration() {
    let mut s = PlaybackSession::new(ClockMode::Bound, 240.0);
    let mut tr = t(1, "A");
    tr.duration = TrackDuration::Unknown;
    s.replace_playlist(vec![tr]);
    s.select(1).unwrap();
    s.clock.set_position(30.0);

    assert_eq!(s.seek(0.5), None);
    assert_eq!(s.clock.current_time(), 30.0);
}

#[test]
fn progress_guards_zero_duration() {
    let mut c = PlaybackClock::new(ClockMode::Bound);
    c.set_position(5.0);
    assert_eq!(c.progress(), 0.0);
    c.set_duration(20.0);
    assert_eq!(c.progress(), 0.25);
}

#[test]
fn seek_clamps_fraction() {
    let mut c = PlaybackClock::new(ClockMode::Bound);
    c.reset(200.0);
    assert_eq!(c.seek_fraction(-0.2), 0.0);
    assert_eq!(c.seek_fraction(1.5), 200.0);
    assert_eq!(c.seek_fraction(0.5), 100.0);
    assert_eq!(c.seek_fraction(f64::NAN), 0.0);
}

#[test]
fn session_seek_requires_a_track() {
    let mut s = session(ClockMode::Bound);
    assert_eq!(s.seek(0.5), None);
    s.select(1).unwrap();
    assert_eq!(s.seek(0.5), Some(5.0));
}

#[test]
fn simulated_tick_advances_until_duration() {
    let mut c = PlaybackClock::new(ClockMode::Simulated);
    c.reset(0.25);
    assert_eq!(c.tick(0.1), TickOutcome::Running);
    assert_eq!(c.tick(0.1), TickOutcome::Running);
    assert_eq!(c.tick(0.1), TickOutcome::Ended);
    assert_eq!(c.current_time(), 0.25);
}

#[test]
fn bound_clock_ignores_ticks() {
    let mut c = PlaybackClock::new(ClockMode::Bound);
    c.reset(1.0);
    assert_eq!(c.tick(5.0), TickOutcome::Running);
    assert_eq!(c.current_time(), 0.0);
}

#[test]
fn drag_gesture_is_relative_and_clamped() {
    let g = DragGesture::begin(10, 100, 0.5);
    assert_eq!(g.fraction_at(10), 0.5);
    assert_eq!(g.fraction_at(35), 0.75);
    assert!((g.fraction_at(0) - 0.4).abs() < 1e-9);
    assert_eq!(g.fraction_at(200), 1.0);

    let g = DragGesture::begin(50, 40, 0.1);
    assert_eq!(g.fraction_at(0), 0.0);

    let degenerate = DragGesture::begin(3, 0, 0.3);
    assert_eq!(degenerate.fraction_at(90), 0.3);
}

#[test]
fn needs_rescope_on_empty_or_other_artist() {
    let scoped = scope_for_artist(&library(), "A");
    assert!(needs_rescope(&[], "A"));
    assert!(!needs_rescope(&scoped, "A"));
    assert!(needs_rescope(&scoped, "B"));
}
