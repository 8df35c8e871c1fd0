use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::warn;

use super::MediaBackend;
use super::thread::spawn_audio_thread;
use super::types::{MediaCmd, MediaEvent};

/// rodio-backed player running on its own thread.
pub struct RodioBackend {
    tx: Sender<MediaCmd>,
    join: Option<JoinHandle<()>>,
}

impl RodioBackend {
    /// Spawn the audio thread. Events are delivered on the returned
    /// receiver.
    pub fn spawn(fetch_timeout: Duration) -> (Self, Receiver<MediaEvent>) {
        let (tx, rx) = mpsc::channel::<MediaCmd>();
        let (events_tx, events_rx) = mpsc::channel::<MediaEvent>();
        let join = spawn_audio_thread(rx, events_tx, fetch_timeout);
        (
            Self {
                tx,
                join: Some(join),
            },
            events_rx,
        )
    }

    fn send(&self, cmd: MediaCmd) {
        if let Err(e) = self.tx.send(cmd) {
            warn!(command = ?e.0, "audio thread is gone");
        }
    }
}

impl MediaBackend for RodioBackend {
    fn load(&mut self, generation: u64, url: &str) {
        self.send(MediaCmd::Load {
            generation,
            url: url.to_string(),
        });
    }

    fn play(&mut self) {
        self.send(MediaCmd::Play);
    }

    fn pause(&mut self) {
        self.send(MediaCmd::Pause);
    }

    fn stop(&mut self) {
        self.send(MediaCmd::Stop);
    }

    fn seek(&mut self, seconds: f64) {
        self.send(MediaCmd::Seek(seconds));
    }
}

impl Drop for RodioBackend {
    fn drop(&mut self) {
        let _ = self.tx.send(MediaCmd::Quit);
        if let Some(h) = self.join.take() {
            let _ = h.join();
        }
    }
}
