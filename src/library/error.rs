use thiserror::Error;

/// Failures while discovering a library.
#[derive(Debug, Error)]
pub enum LibraryError {
    /// Transport, HTTP status or XML parse failure while paginating a listing.
    /// The whole listing is discarded.
    #[error("listing failed: {0}")]
    ListingFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
