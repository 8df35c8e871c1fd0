/// Which driver moves the clock for the current track.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ClockMode {
    /// Mirrors positions reported by a media backend.
    #[default]
    Bound,
    /// Advanced by a repeating timer when no decoder is available.
    Simulated,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    Running,
    Ended,
}

/// Clamp a seek fraction into `[0, 1]`; NaN counts as 0.
pub fn clamp_fraction(fraction: f64) -> f64 {
    if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    }
}

/// Elapsed time and duration of the current track, in seconds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybackClock {
    mode: ClockMode,
    current_time: f64,
    duration: f64,
}

impl PlaybackClock {
    pub fn new(mode: ClockMode) -> Self {
        Self {
            mode,
            current_time: 0.0,
            duration: 0.0,
        }
    }

    pub fn mode(&self) -> ClockMode {
        self.mode
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// `current_time / duration`, or 0 while the duration is unknown.
    pub fn progress(&self) -> f64 {
        if self.duration > 0.0 {
            clamp_fraction(self.current_time / self.duration)
        } else {
            0.0
        }
    }

    /// Start over for a newly loaded track.
    pub fn reset(&mut self, duration: f64) {
        self.current_time = 0.0;
        self.duration = duration.max(0.0);
    }

    pub fn rewind(&mut self) {
        self.current_time = 0.0;
    }

    /// Duration reported by the media layer once metadata is ready.
    pub fn set_duration(&mut self, duration: f64) {
        if duration.is_finite() && duration >= 0.0 {
            self.duration = duration;
        }
    }

    /// Position reported by the media layer.
    pub fn set_position(&mut self, time: f64) {
        if time.is_finite() {
            self.current_time = time.max(0.0);
        }
    }

    /// Advance a simulated clock by `quantum` seconds. Reaching the
    /// duration clamps to it and reports the end of the track. Bound clocks
    /// ignore ticks.
    pub fn tick(&mut self, quantum: f64) -> TickOutcome {
        if self.mode != ClockMode::Simulated {
            return TickOutcome::Running;
        }
        self.current_time += quantum;
        if self.current_time >= self.duration {
            self.current_time = self.duration;
            TickOutcome::Ended
        } else {
            TickOutcome::Running
        }
    }

    /// Jump to `fraction` of the duration (clamped) and return the absolute
    /// time.
    pub fn seek_fraction(&mut self, fraction: f64) -> f64 {
        self.current_time = clamp_fraction(fraction) * self.duration;
        self.current_time
    }
}

/// A drag on the progress bar, from press to release.
///
/// Positions are relative to where the drag started, so grabbing the bar
/// does not jump.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragGesture {
    origin_x: u16,
    origin_fraction: f64,
    width: u16,
}

impl DragGesture {
    pub fn begin(origin_x: u16, width: u16, origin_fraction: f64) -> Self {
        Self {
            origin_x,
            origin_fraction: clamp_fraction(origin_fraction),
            width,
        }
    }

    /// Seek fraction for the pointer at column `x`.
    pub fn fraction_at(&self, x: u16) -> f64 {
        if self.width == 0 {
            return self.origin_fraction;
        }
        let dx = f64::from(x) - f64::from(self.origin_x);
        clamp_fraction(self.origin_fraction + dx / f64::from(self.width))
    }
}
