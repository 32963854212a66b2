use std::fmt;
use std::time::{Duration, Instant};

/// Sums wall-clock durations of repeated calls.
#[derive(Debug, Clone, Default)]
pub struct LatencyAccumulator {
    total: Duration,
    samples: u32,
}

impl LatencyAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` once and records how long it took.
    pub fn time<R>(&mut self, f: impl FnOnce() -> R) -> R {
        let start = Instant::now();
        let out = f();
        self.record(start.elapsed());
        out
    }

    pub fn record(&mut self, elapsed: Duration) {
        self.total += elapsed;
        self.samples += 1;
    }

    pub fn samples(&self) -> u32 {
        self.samples
    }

    pub fn total(&self) -> Duration {
        self.total
    }

    /// Mean duration per sample, zero when nothing was recorded.
    pub fn mean(&self) -> Duration {
        if self.samples == 0 {
            Duration::ZERO
        } else {
            self.total / self.samples
        }
    }

    pub fn mean_ms(&self) -> f64 {
        if self.samples == 0 {
            0.0
        } else {
            self.total.as_secs_f64() * 1000.0 / self.samples as f64
        }
    }

    /// Freezes the current mean into a report line for `tag`.
    pub fn report(&self, tag: impl Into<String>) -> LatencyReport {
        LatencyReport {
            tag: tag.into(),
            mean_ms: self.mean_ms(),
            samples: self.samples,
        }
    }
}

/// Mean per-call latency of one implementation over one outer iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct LatencyReport {
    pub tag: String,
    pub mean_ms: f64,
    pub samples: u32,
}

impl fmt::Display for LatencyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} [ms]", self.tag, self.mean_ms)
    }
}
