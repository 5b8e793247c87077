//! Scoped stage timing.
//!
//! A `Stopwatch` starts when it is created and is consumed by `stop`, so a
//! measurement can never end before it began or be ended twice.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Stopwatch {
    started: Instant,
}

impl Stopwatch {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn stop(self) -> Duration {
        self.started.elapsed()
    }
}

/// Run `f` and return its result together with how long it took.
pub fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let watch = Stopwatch::start();
    let value = f();
    (value, watch.stop())
}

/// Format a duration as milliseconds with two decimals, e.g. `12.50ms`.
pub fn millis(elapsed: Duration) -> String {
    format!("{:.2}ms", elapsed.as_secs_f64() * 1000.0)
}
