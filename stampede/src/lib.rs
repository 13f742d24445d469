#![doc = include_str!("../README.md")]

pub mod config;
pub mod error;
pub mod progress;
pub mod runtime;
pub mod session;
pub mod stats;

pub(crate) mod worker;

pub use config::{BenchConfig, ConfigError};
pub use error::Error;
pub use runtime::{ContainerSpec, DockerRuntime, RuntimeClient, RuntimeError};
pub use session::Session;
pub use stats::RunReport;

pub mod prelude {
    pub use crate::config::BenchConfig;
    pub use crate::progress::{Progress, ProgressSink};
    pub use crate::runtime::{DockerRuntime, RuntimeClient};
    pub use crate::session::Session;
    pub use crate::stats::RunReport;
}
