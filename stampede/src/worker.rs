use crate::error::Error;
use crate::runtime::{ContainerSpec, RuntimeClient};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
#[allow(unused)]
use tracing::{debug, error, info, trace, warn};

/// One unit of concurrency: issues its assigned container creations
/// sequentially and pushes a latency sample per started container.
pub(crate) struct Worker {
    pub index: u32,
    pub iterations: u32,
    pub image: String,
    pub command: Option<Vec<String>>,
    pub labels: Option<HashMap<String, String>>,
    pub run_name: String,
}

impl Worker {
    /// Container names are numbered `i + iterations * index` so that
    /// concurrent workers never collide within a run.
    fn container_name(&self, iteration: u32) -> String {
        format!(
            "{}-{}",
            self.run_name,
            iteration + self.iterations * self.index
        )
    }

    pub(crate) async fn run(
        self,
        client: Arc<dyn RuntimeClient>,
        samples: mpsc::Sender<Duration>,
    ) -> Result<(), Error> {
        for i in 0..self.iterations {
            let spec = ContainerSpec {
                name: self.container_name(i),
                image: self.image.clone(),
                command: self.command.clone(),
                labels: self.labels.clone(),
            };

            trace!(worker = self.index, container = %spec.name, "creating container");
            let start = Instant::now();
            client
                .create_and_start(&spec)
                .await
                .map_err(|source| Error::Worker {
                    index: self.index,
                    source,
                })?;
            let elapsed = start.elapsed();

            // The channel holds every expected sample, so this send only
            // fails if the monitor died.
            if samples.send(elapsed).await.is_err() {
                return Err(Error::ChannelClosed);
            }
        }

        debug!(worker = self.index, count = self.iterations, "worker done");
        Ok(())
    }
}
