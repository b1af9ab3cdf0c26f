use std::time::{Duration, Instant};

/// Wall-clock stopwatch used to bracket only the algorithmic part of a sort or
/// search. Logging and cloning happen outside of the measured region.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    start_time: Instant,
}

impl Stopwatch {
    pub fn start() -> Self {
        Self {
            start_time: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// 執行 `work` 並回傳結果與耗時
pub fn timed<T, F: FnOnce() -> T>(work: F) -> (T, Duration) {
    let stopwatch = Stopwatch::start();
    let output = work();
    (output, stopwatch.elapsed())
}

/// Milliseconds with sub-millisecond precision, the unit shown to users.
pub fn as_millis_f64(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64() * 1000.0
}
