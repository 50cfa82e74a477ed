//! Counter-delta rate estimation
//!
//! Turns successive samples of a monotone counter into a per-second rate.
//! The first sample only primes the estimator.

#[derive(Debug, Clone, Default)]
pub struct RateEstimator {
    last_count: u64,
    last_timestamp_ms: i64,
}

impl RateEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a sample and return the rate since the previous one
    ///
    /// Returns 0 when there is no usable previous sample, when the timestamp
    /// did not advance, or when the counter went backwards. The sample is
    /// stored in every case.
    pub fn observe(&mut self, count: u64, timestamp_ms: i64) -> u64 {
        let rate = if self.last_count > 0
            && self.last_timestamp_ms > 0
            && timestamp_ms > self.last_timestamp_ms
        {
            let delta = count as f64 - self.last_count as f64;
            let seconds = (timestamp_ms - self.last_timestamp_ms) as f64 / 1000.0;
            (delta / seconds).round().max(0.0) as u64
        } else {
            0
        };

        self.last_count = count;
        self.last_timestamp_ms = timestamp_ms;
        rate
    }

    pub fn last_sample(&self) -> (u64, i64) {
        (self.last_count, self.last_timestamp_ms)
    }
}
