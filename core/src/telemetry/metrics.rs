use std::sync::Mutex;

/// Session counters surfaced at shutdown and in offline summaries.
pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

struct Metrics {
    ticks: usize,
    resets: usize,
    errors: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics {
                ticks: 0,
                resets: 0,
                errors: 0,
            }),
        }
    }

    pub fn record_tick(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.ticks += 1;
        }
    }

    pub fn record_reset(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.resets += 1;
        }
    }

    pub fn record_error(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.errors += 1;
        }
    }

    pub fn snapshot(&self) -> (usize, usize, usize) {
        if let Ok(metrics) = self.inner.lock() {
            (metrics.ticks, metrics.resets, metrics.errors)
        } else {
            (0, 0, 0)
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
