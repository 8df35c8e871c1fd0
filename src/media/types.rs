use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum MediaEventKind {
    /// The decoder knows the track length.
    MetadataReady { duration: f64 },
    /// Current position in seconds.
    PositionChanged { time: f64 },
    /// The track played to its end.
    Ended,
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MediaEvent {
    pub generation: u64,
    pub kind: MediaEventKind,
}

impl MediaEvent {
    pub fn new(generation: u64, kind: MediaEventKind) -> Self {
        Self { generation, kind }
    }
}

#[derive(Debug)]
pub(super) enum MediaCmd {
    Load { generation: u64, url: String },
    Play,
    Pause,
    Stop,
    Seek(f64),
    Quit,
}

/// How often the audio thread reports the position while playing.
pub(super) const POSITION_INTERVAL: Duration = Duration::from_millis(250);
