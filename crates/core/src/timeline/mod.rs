use serde::{Deserialize, Serialize};

/// Accumulated time of a fixed-delta frame loop.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameClock {
    pub time_seconds: f32,
    pub frame: u64,
}

impl FrameClock {
    pub fn reset(&mut self) {
        self.time_seconds = 0.0;
        self.frame = 0;
    }

    /// Advances one frame. Negative deltas do not move time backwards.
    pub fn advance(&mut self, delta: f32) -> f32 {
        let delta = delta.max(0.0);
        self.time_seconds += delta;
        self.frame += 1;
        delta
    }
}

/// Fires once every `interval` seconds of accumulated time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntervalTimer {
    pub interval: f32,
    elapsed: f32,
}

impl IntervalTimer {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            elapsed: 0.0,
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    pub fn tick(&mut self, delta: f32) {
        self.elapsed += delta;
    }

    pub fn is_due(&self) -> bool {
        self.elapsed >= self.interval
    }

    /// Resets the timer and returns `true` when it is due and `ready` holds.
    /// A due timer that is not ready keeps accumulating.
    pub fn fire_if(&mut self, ready: bool) -> bool {
        if ready && self.is_due() {
            self.elapsed = 0.0;
            true
        } else {
            false
        }
    }
}
