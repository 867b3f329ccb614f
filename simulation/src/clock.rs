use std::time::{Duration, Instant};

/// Time source for the frame loop. All values are in seconds.
pub trait Clock {
    fn now(&self) -> f64;
    // Time elapsed since the previous call (or since the last reset).
    fn delta(&mut self) -> f64;
    fn sleep(&mut self, seconds: f64);
    fn reset(&mut self);
}

/// Wall clock backed by [`Instant`].
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
    last: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            origin: now,
            last: now,
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }

    fn delta(&mut self) -> f64 {
        let now = Instant::now();
        let delta = now.duration_since(self.last).as_secs_f64();
        self.last = now;
        delta
    }

    fn sleep(&mut self, seconds: f64) {
        if seconds > 0.0 {
            std::thread::sleep(Duration::from_secs_f64(seconds));
        }
    }

    fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Deterministic clock. Every `delta` call first advances virtual time by `frame_time`,
/// and `sleep` advances it by the requested amount, so a loop driven by it behaves as if
/// each frame took exactly `frame_time` plus whatever it slept.
#[derive(Debug, Clone, PartialEq)]
pub struct ManualClock {
    time: f64,
    last: f64,
    frame_time: f64,
}

impl ManualClock {
    pub fn new(frame_time: f64) -> Self {
        Self {
            time: 0.0,
            last: 0.0,
            frame_time,
        }
    }

    pub fn advance(&mut self, seconds: f64) {
        self.time += seconds;
    }

    pub fn frame_time(&self) -> f64 {
        self.frame_time
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.time
    }

    fn delta(&mut self) -> f64 {
        self.time += self.frame_time;
        let delta = self.time - self.last;
        self.last = self.time;
        delta
    }

    fn sleep(&mut self, seconds: f64) {
        if seconds > 0.0 {
            self.time += seconds;
        }
    }

    fn reset(&mut self) {
        self.time = 0.0;
        self.last = 0.0;
    }
}
