//! Application state and intent handling.
//!
//! `App` owns the loaded library, the playback session and the folder tree
//! view state. The UI turns input into `Intent`s, the runtime feeds them to
//! `App::apply` together with the media backend, and redraws from the App.

mod intent;
mod model;
mod tree;

pub use intent::{Command, Intent, RefreshOutcome};
pub use model::*;
pub use tree::{FolderTree, TreeRow};
