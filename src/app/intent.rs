/// User-level actions emitted by the UI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    SelectTrack(u32),
    TogglePlayPause,
    Play,
    Pause,
    Stop,
    Next,
    Previous,
    ToggleShuffle,
    /// Fraction of the track, clamped to `[0, 1]`.
    Seek(f64),
    Refresh,
    ToggleInfo,
    Quit,
}

/// Work the runtime has to do on behalf of the App.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Run the library source on a worker thread and report back through
    /// `App::finish_refresh`.
    StartRefresh,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Started,
    /// Another refresh is still in flight; the request was dropped.
    AlreadyRunning,
}
