use std::io::Cursor;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};
use tracing::{debug, error, warn};

use super::error::MediaError;
use super::fetch::Fetcher;
use super::types::{MediaCmd, MediaEvent, MediaEventKind, POSITION_INTERVAL};

struct Loaded {
    generation: u64,
    sink: Sink,
    playing: bool,
}

struct AudioThread {
    stream: Result<OutputStream, String>,
    fetcher: Fetcher,
    events: Sender<MediaEvent>,
    current: Option<Loaded>,
}

impl AudioThread {
    fn emit(&self, generation: u64, kind: MediaEventKind) {
        // The receiver only goes away on shutdown.
        let _ = self.events.send(MediaEvent::new(generation, kind));
    }

    fn open_sink(&self, url: &str) -> Result<(Sink, Option<Duration>), MediaError> {
        let stream = self
            .stream
            .as_ref()
            .map_err(|e| MediaError::NoOutput(e.clone()))?;
        let bytes = self.fetcher.fetch(url)?;
        let source = Decoder::new(Cursor::new(bytes))?;
        let total = source.total_duration();

        let sink = Sink::connect_new(stream.mixer());
        sink.pause();
        sink.append(source);
        Ok((sink, total))
    }

    fn load(&mut self, generation: u64, url: &str) {
        if let Some(old) = self.current.take() {
            old.sink.stop();
        }

        match self.open_sink(url) {
            Ok((sink, total)) => {
                debug!(generation, url, ?total, "media loaded");
                self.current = Some(Loaded {
                    generation,
                    sink,
                    playing: false,
                });
                if let Some(total) = total {
                    self.emit(
                        generation,
                        MediaEventKind::MetadataReady {
                            duration: total.as_secs_f64(),
                        },
                    );
                }
            }
            Err(e) => {
                warn!(generation, url, error = %e, "media load failed");
                self.emit(generation, MediaEventKind::Error(e.to_string()));
            }
        }
    }

    fn seek(&mut self, seconds: f64) {
        let Some(cur) = self.current.as_ref() else {
            return;
        };
        let target = Duration::from_secs_f64(seconds.max(0.0));
        match cur.sink.try_seek(target) {
            Ok(()) => self.emit(
                cur.generation,
                MediaEventKind::PositionChanged {
                    time: cur.sink.get_pos().as_secs_f64(),
                },
            ),
            Err(e) => warn!(error = %e, "seek not supported for this source"),
        }
    }

    fn handle(&mut self, cmd: MediaCmd) {
        match cmd {
            MediaCmd::Load { generation, url } => self.load(generation, &url),
            MediaCmd::Play => {
                if let Some(cur) = self.current.as_mut() {
                    cur.sink.play();
                    cur.playing = true;
                }
            }
            MediaCmd::Pause => {
                if let Some(cur) = self.current.as_mut() {
                    cur.sink.pause();
                    cur.playing = false;
                }
            }
            MediaCmd::Stop => {
                if let Some(cur) = self.current.as_mut() {
                    cur.sink.pause();
                    cur.playing = false;
                }
                self.seek(0.0);
            }
            MediaCmd::Seek(seconds) => self.seek(seconds),
            MediaCmd::Quit => {}
        }
    }

    /// Position reports and end-of-track detection.
    fn poll(&mut self) {
        let Some(cur) = self.current.as_mut() else {
            return;
        };
        if !cur.playing {
            return;
        }
        if cur.sink.empty() {
            cur.playing = false;
            let generation = cur.generation;
            self.emit(generation, MediaEventKind::Ended);
        } else {
            let time = cur.sink.get_pos().as_secs_f64();
            let generation = cur.generation;
            self.emit(generation, MediaEventKind::PositionChanged { time });
        }
    }
}

fn open_stream() -> Result<OutputStream, String> {
    let mut stream = OutputStreamBuilder::open_default_stream().map_err(|e| e.to_string())?;
    // rodio reports to stderr when the stream is dropped, which would
    // scribble over the terminal UI.
    stream.log_on_drop(false);
    Ok(stream)
}

pub(super) fn spawn_audio_thread(
    rx: Receiver<MediaCmd>,
    events: Sender<MediaEvent>,
    fetch_timeout: Duration,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = open_stream();
        if let Err(e) = &stream {
            error!(error = %e, "no audio output device");
        }

        let mut audio = AudioThread {
            stream,
            fetcher: Fetcher::new(fetch_timeout),
            events,
            current: None,
        };

        loop {
            match rx.recv_timeout(POSITION_INTERVAL) {
                Ok(MediaCmd::Quit) => break,
                Ok(cmd) => audio.handle(cmd),
                Err(RecvTimeoutError::Timeout) => audio.poll(),
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        if let Some(cur) = audio.current.take() {
            cur.sink.stop();
        }
        debug!("audio thread finished");
    })
}
