use crate::config::ConfigError;
use crate::runtime::RuntimeError;
use thiserror::Error;

/// Failures that abort a benchmarking session.
///
/// Every variant is fatal to the whole run: either all assigned container
/// creations succeed and a report is produced, or the first failure
/// surfaces here and no statistics are emitted.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("worker {index} failed: {source}")]
    Worker {
        index: u32,
        #[source]
        source: RuntimeError,
    },

    #[error("sample channel closed before the run finished")]
    ChannelClosed,

    #[error("worker task panicked")]
    WorkerPanic,

    #[error("progress task terminated unexpectedly")]
    ProgressTask,
}
