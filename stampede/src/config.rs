use std::collections::HashMap;
use thiserror::Error;

/// Configuration for one benchmarking session.
///
/// Immutable once the run starts. Request count and concurrency follow the
/// classic httperf-style contract: `concurrency` workers each issue
/// `requests / concurrency` container creations, so a remainder that does
/// not divide evenly is dropped rather than redistributed.
#[derive(Clone, Debug)]
pub struct BenchConfig {
    pub requests: u32,
    pub concurrency: u32,
    pub images: Vec<String>,
    pub command: Option<Vec<String>>,
    pub labels: Option<HashMap<String, String>>,
}

impl BenchConfig {
    pub fn new(requests: u32, concurrency: u32, images: Vec<String>) -> Self {
        Self {
            requests,
            concurrency,
            images,
            command: None,
            labels: None,
        }
    }

    /// Command to run inside every created container.
    pub fn with_command(mut self, command: Vec<String>) -> Self {
        self.command = Some(command);
        self
    }

    /// Labels applied to every created container.
    pub fn with_labels(mut self, labels: HashMap<String, String>) -> Self {
        self.labels = Some(labels);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.requests == 0 {
            return Err(ConfigError::ZeroRequests);
        }
        if self.concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        if self.images.is_empty() {
            return Err(ConfigError::NoImages);
        }
        if self.concurrency > self.requests {
            return Err(ConfigError::ConcurrencyExceedsRequests {
                concurrency: self.concurrency,
                requests: self.requests,
            });
        }
        Ok(())
    }

    /// Container creations assigned to each worker. Integer division; the
    /// remainder is intentionally not redistributed.
    pub fn per_worker(&self) -> u32 {
        if self.concurrency == 0 {
            return 0;
        }
        self.requests / self.concurrency
    }

    /// Containers the session will actually create, which is less than
    /// `requests` whenever the count does not divide evenly.
    pub fn expected_samples(&self) -> u32 {
        self.per_worker() * self.concurrency
    }
}

/// Parse a `key=value` label argument.
pub fn parse_label(raw: &str) -> Result<(String, String), ConfigError> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(ConfigError::MalformedLabel(raw.to_string())),
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("request count must be positive")]
    ZeroRequests,

    #[error("concurrency must be positive")]
    ZeroConcurrency,

    #[error("at least one image is required")]
    NoImages,

    #[error("concurrency {concurrency} exceeds request count {requests}")]
    ConcurrencyExceedsRequests { concurrency: u32, requests: u32 },

    #[error("malformed label {0:?}, expected key=value")]
    MalformedLabel(String),
}
