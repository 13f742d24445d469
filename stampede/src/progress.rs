//! Live progress reporting.
//!
//! A single task owns the completed counter and the accumulating sample
//! vector; workers only ever touch the channel. The task terminates once
//! the channel is closed and fully drained, which is the signal that every
//! worker has finished.

use std::time::Duration;
use tokio::sync::mpsc;
#[allow(unused)]
use tracing::{debug, error, info, trace, warn};

/// Snapshot emitted for every completed container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
    pub percent: f64,
    pub latency: Duration,
}

/// Receiver for progress snapshots. The console implementation prints one
/// line per container; tests substitute a recording sink.
pub trait ProgressSink: Send {
    fn on_sample(&mut self, progress: Progress);
}

/// Prints a progress line per started container.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl ProgressSink for ConsoleReporter {
    fn on_sample(&mut self, progress: Progress) {
        println!(
            "[{:3.0}%] {}/{} containers started",
            progress.percent, progress.completed, progress.total
        );
    }
}

/// Drain the sample channel until it closes, reporting each sample as it
/// arrives. Returns the full sample set.
pub(crate) async fn monitor(
    mut samples: mpsc::Receiver<Duration>,
    total: usize,
    mut sink: Box<dyn ProgressSink>,
) -> Vec<Duration> {
    let mut collected = Vec::with_capacity(total);
    while let Some(latency) = samples.recv().await {
        collected.push(latency);
        let completed = collected.len();
        let percent = completed as f64 / total as f64 * 100.0;
        sink.on_sample(Progress {
            completed,
            total,
            percent,
            latency,
        });
    }
    trace!(collected = collected.len(), "sample channel drained");
    collected
}
