//! Latency aggregation.
//!
//! Percentiles use linear interpolation on the sorted sample sequence: the
//! p-th percentile sits at fractional rank `p/100 * (n-1)`. Aggregation is
//! order-independent since the samples are sorted first.

use std::fmt;
use std::time::Duration;

const MILLIS_IN_SECOND: f64 = 1000.0;

/// Final statistics for a completed run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunReport {
    pub elapsed: Duration,
    pub samples: usize,
    pub mean: Duration,
    pub median: Duration,
    pub p90: Duration,
    pub p99: Duration,
}

/// Summarize a fully collected sample set.
///
/// An empty set yields zeroed statistics; a single sample degenerates every
/// percentile to that value.
pub fn summarize(samples: &[Duration], elapsed: Duration) -> RunReport {
    let mut secs: Vec<f64> = samples.iter().map(Duration::as_secs_f64).collect();
    secs.sort_by(f64::total_cmp);

    RunReport {
        elapsed,
        samples: samples.len(),
        mean: Duration::from_secs_f64(mean(&secs)),
        median: Duration::from_secs_f64(percentile(&secs, 50.0)),
        p90: Duration::from_secs_f64(percentile(&secs, 90.0)),
        p99: Duration::from_secs_f64(percentile(&secs, 99.0)),
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn percentile(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        n => {
            let rank = p / 100.0 * (n - 1) as f64;
            let lo = rank.floor() as usize;
            let hi = rank.ceil() as usize;
            sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64)
        }
    }
}

impl RunReport {
    fn millis(duration: Duration) -> f64 {
        duration.as_secs_f64() * MILLIS_IN_SECOND
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Time taken for tests: {:.3}s",
            self.elapsed.as_secs_f64()
        )?;
        write!(
            f,
            "Time per container: {:.3}ms [mean] | {:.3}ms [90th] | {:.3}ms [99th]",
            Self::millis(self.mean),
            Self::millis(self.p90),
            Self::millis(self.p99),
        )
    }
}
