use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlaybackError {
    /// The scoped playlist is empty; nothing changed.
    #[error("no track available in the current playlist")]
    NoTrackAvailable,

    #[error("unknown track id {0}")]
    UnknownTrack(u32),
}
