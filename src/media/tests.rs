use std::io::Write;
use std::time::Duration;

use super::MediaBackend;
use super::error::MediaError;
use super::fetch::{Fetcher, is_remote};
use super::null::NullBackend;

#[test]
fn remote_refs_are_http_urls_only() {
    assert!(is_remote("https://bucket.example.com/A%2FB%2Fc.mp3"));
    assert!(is_remote("http://localhost:9000/x.mp3"));
    assert!(!is_remote("/music/A/B/c.mp3"));
    assert!(!is_remote("audio/song.mp3"));
}

#[test]
fn local_refs_are_read_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"not really audio").unwrap();

    let fetcher = Fetcher::new(Duration::from_secs(1));
    let bytes = fetcher.fetch(file.path().to_str().unwrap()).unwrap();
    assert_eq!(bytes, b"not really audio");
}

#[test]
fn missing_local_ref_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.mp3");

    let fetcher = Fetcher::new(Duration::from_secs(1));
    let err = fetcher.fetch(missing.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, MediaError::Io(_)));
}

#[test]
fn null_backend_accepts_everything() {
    let mut backend = NullBackend;
    backend.load(1, "whatever");
    backend.play();
    backend.seek(12.0);
    backend.pause();
    backend.stop();
}
