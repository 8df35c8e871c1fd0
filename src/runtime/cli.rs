use std::path::PathBuf;

use clap::Parser;

use crate::config::{Settings, SourceKind};

/// Command-line flags. They only pick the library source and the clock;
/// everything else comes from the config file and environment.
#[derive(Debug, Parser)]
#[command(name = "blurplayer")]
#[command(about = "A Winamp-style terminal music player for bucket and local libraries")]
pub struct Cli {
    /// Play the built-in sample playlist with a simulated clock
    #[arg(long, conflicts_with_all = ["list_url", "dir"])]
    pub demo: bool,

    /// Bucket listing URL, e.g. https://bucket.example.com/?list-type=2
    #[arg(long, value_name = "URL", conflicts_with = "dir")]
    pub list_url: Option<String>,

    /// Prefix for media references (defaults to the listing URL without its query)
    #[arg(long, value_name = "URL", requires = "list_url")]
    pub base_url: Option<String>,

    /// Local music directory laid out as artist/album/file
    #[arg(long, value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Advance a timer instead of playing audio
    #[arg(long, default_value_t = false)]
    pub simulate: bool,
}

impl Cli {
    /// Override the source selection in `settings`.
    pub fn apply(&self, settings: &mut Settings) {
        let library = &mut settings.library;
        if self.demo {
            library.source = SourceKind::Static;
        }
        if let Some(url) = &self.list_url {
            library.source = SourceKind::Remote;
            library.list_url = Some(url.clone());
            library.base_url = self.base_url.clone();
        }
        if let Some(dir) = &self.dir {
            library.source = SourceKind::Directory;
            library.directory = Some(dir.clone());
        }
        if self.simulate {
            settings.playback.simulate = true;
        }
    }
}
