//! Workload distribution.

use crate::config::BenchConfig;
use crate::error::Error;
use crate::progress::{self, ConsoleReporter, ProgressSink};
use crate::runtime::RuntimeClient;
use crate::stats::{self, RunReport};
use crate::worker::Worker;
use rand::Rng;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
#[allow(unused)]
use tracing::{debug, error, info, instrument, trace, warn};

/// A benchmarking session: partitions the request count across a fixed
/// number of concurrent workers, round-robins images over them, and waits
/// for every worker to finish before aggregating.
pub struct Session {
    config: BenchConfig,
    client: Arc<dyn RuntimeClient>,
    sink: Box<dyn ProgressSink>,
}

impl Session {
    pub fn new(config: BenchConfig, client: Arc<dyn RuntimeClient>) -> Self {
        Self {
            config,
            client,
            sink: Box::new(ConsoleReporter),
        }
    }

    /// Replace the console progress output, e.g. with a recording sink.
    pub fn with_sink(mut self, sink: impl ProgressSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Run the full session and aggregate the collected samples.
    ///
    /// Fail-fast: the first worker error aborts the remaining workers and
    /// surfaces as the session result. No statistics are produced for an
    /// aborted run, and containers created up to that point are not cleaned
    /// up.
    #[instrument(name = "session", skip_all, fields(requests = self.config.requests, concurrency = self.config.concurrency))]
    pub async fn run(self) -> Result<RunReport, Error> {
        self.config.validate()?;

        let name = run_name();
        let per_worker = self.config.per_worker();
        let total = self.config.expected_samples() as usize;
        info!(run = %name, per_worker, "starting benchmarking session");

        // Sized to hold every expected sample so a lagging consumer can
        // never slow down the workers.
        let (tx, rx) = mpsc::channel(total);
        let monitor = tokio::spawn(progress::monitor(rx, total, self.sink));

        let start = Instant::now();
        let mut workers: JoinSet<Result<(), Error>> = JoinSet::new();
        for index in 0..self.config.concurrency {
            let image_index = index as usize % self.config.images.len();
            let worker = Worker {
                index,
                iterations: per_worker,
                image: self.config.images[image_index].clone(),
                command: self.config.command.clone(),
                labels: self.config.labels.clone(),
                run_name: name.clone(),
            };
            workers.spawn(worker.run(Arc::clone(&self.client), tx.clone()));
        }
        // Workers hold the only senders now; the channel closes once the
        // last of them terminates.
        drop(tx);

        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    error!(%err, "aborting session");
                    workers.abort_all();
                    monitor.abort();
                    return Err(err);
                }
                Err(join_err) if join_err.is_cancelled() => {}
                Err(join_err) => {
                    error!(%join_err, "aborting session");
                    workers.abort_all();
                    monitor.abort();
                    return Err(Error::WorkerPanic);
                }
            }
        }

        let samples = monitor.await.map_err(|_| Error::ProgressTask)?;
        let elapsed = start.elapsed();
        debug_assert_eq!(samples.len(), total);
        info!(
            samples = samples.len(),
            elapsed_secs = elapsed.as_secs_f64(),
            "session complete"
        );

        Ok(stats::summarize(&samples, elapsed))
    }
}

/// Random per-run prefix for container names, so repeated runs against the
/// same daemon do not collide.
fn run_name() -> String {
    let id: u32 = rand::thread_rng().gen_range(0..0x100_0000);
    format!("stampede-{id:06X}")
}
