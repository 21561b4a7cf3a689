/// Frame clock: total elapsed time plus the most recent frame delta.
/// Positions are a function of `elapsed`, so seeking is exact.
#[derive(Debug, Clone, Copy, Default)]
pub struct Clock {
    elapsed: f32,
    frame_dt: f32,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one frame.
    pub fn advance(&mut self, dt: f32) {
        self.frame_dt = dt;
        self.elapsed += dt;
    }

    /// Jump to an absolute time without producing a frame delta.
    pub fn seek(&mut self, elapsed: f32) {
        self.elapsed = elapsed;
        self.frame_dt = 0.0;
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn frame_dt(&self) -> f32 {
        self.frame_dt
    }
}

/// Polled countdown that fires once per `interval` of accumulated time.
/// Resets to zero when it fires; any overshoot is discarded, so at most one
/// firing happens per call.
#[derive(Debug, Clone, Copy)]
pub struct IntervalTimer {
    interval: f32,
    accumulated: f32,
}

impl IntervalTimer {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            accumulated: 0.0,
        }
    }

    /// Add frame time. Returns true when the interval has elapsed.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.accumulated += dt;
        if self.accumulated >= self.interval {
            self.accumulated = 0.0;
            true
        } else {
            false
        }
    }

    /// Accumulated time since the last firing.
    pub fn accumulated(&self) -> f32 {
        self.accumulated
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }
}
