//! Stopwatch for timing hashing stages

use crate::LoggingTransformer;
use std::time::{Duration, Instant};

/// Measures elapsed wall-clock time for a named operation
#[derive(Debug, Clone)]
pub struct Stopwatch {
    operation: &'static str,
    started: Instant,
}

impl Stopwatch {
    /// Start timing `operation`
    #[must_use]
    pub fn start(operation: &'static str) -> Self {
        Self {
            operation,
            started: Instant::now(),
        }
    }

    /// Name of the timed operation
    #[must_use]
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// Time elapsed since the stopwatch was started
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Log the elapsed time and return it
    pub fn finish(self, success: bool) -> Duration {
        let elapsed = self.elapsed();
        LoggingTransformer::log_performance_metric(self.operation, elapsed, success);
        elapsed
    }

    /// Run `f`, log how long it took, and hand back its result
    pub fn time<T, E>(
        operation: &'static str,
        f: impl FnOnce() -> Result<T, E>,
    ) -> (Result<T, E>, Duration) {
        let watch = Self::start(operation);
        let result = f();
        let elapsed = watch.finish(result.is_ok());
        (result, elapsed)
    }
}
