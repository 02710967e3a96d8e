/// Polling timer that gates simulation ticks
///
/// Time is supplied by the caller as monotonic seconds, so the ticker is
/// independent of frame rate and trivially driven from tests.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticker {
    interval: f64,
    initial_interval: f64,
    decrement: f64,
    floor: f64,
    last_update: f64,
}

impl Ticker {
    pub fn new(initial_interval: f64, decrement: f64, floor: f64) -> Self {
        Self {
            interval: initial_interval,
            initial_interval,
            decrement,
            floor,
            last_update: 0.0,
        }
    }

    /// Current seconds between ticks
    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// True once at least `interval` seconds have passed since the last tick
    ///
    /// A due poll restarts the wait from `now`.
    pub fn poll(&mut self, now: f64) -> bool {
        if now - self.last_update >= self.interval {
            self.last_update = now;
            true
        } else {
            false
        }
    }

    /// Shorten the interval by one decrement, never going below the floor
    pub fn speed_up(&mut self) {
        self.interval = (self.interval - self.decrement).max(self.floor);
    }

    /// Go back to the initial interval
    pub fn reset_speed(&mut self) {
        self.interval = self.initial_interval;
    }
}
