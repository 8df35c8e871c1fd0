//! Library discovery.
//!
//! Object keys come from a bucket listing (or a directory walk) and are
//! turned into an artist -> album -> track tree plus a flat, id-ordered
//! track list. `LibrarySource` hides where the keys came from.

mod error;
mod listing;
mod model;
mod source;
mod taxonomy;

pub use error::LibraryError;
pub use listing::{HttpPageFetcher, ListingPage, PageFetcher, list_all, parse_page};
pub use model::*;
pub use source::LibrarySource;
pub use taxonomy::{UrlResolver, build, clean_name};
