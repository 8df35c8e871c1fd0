use tracing::trace;

use super::MediaBackend;

/// Backend for simulated playback: accepts every command and never emits
/// events.
#[derive(Debug, Default)]
pub struct NullBackend;

impl MediaBackend for NullBackend {
    fn load(&mut self, generation: u64, url: &str) {
        trace!(generation, url, "null backend load");
    }

    fn play(&mut self) {}

    fn pause(&mut self) {}

    fn stop(&mut self) {}

    fn seek(&mut self, _seconds: f64) {}
}
