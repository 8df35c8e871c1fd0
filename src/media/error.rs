use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("no audio output: {0}")]
    NoOutput(String),

    #[error("fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("cannot decode: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),
}
