//! Container runtime boundary.
//!
//! The session only needs one capability from the runtime: create a
//! container and block until it is observably started. Everything behind
//! that call is opaque, which keeps the engine testable without a daemon.

use async_trait::async_trait;
use bollard::container::{Config, CreateContainerOptions};
use bollard::models::HostConfig;
use bollard::Docker;
use std::collections::HashMap;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Everything needed to create one container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContainerSpec {
    pub name: String,
    pub image: String,
    pub command: Option<Vec<String>>,
    pub labels: Option<HashMap<String, String>>,
}

/// A control-plane client capable of creating and starting containers.
///
/// Implementations must be safe to call concurrently; one handle is shared
/// across all workers behind an `Arc`.
#[async_trait]
pub trait RuntimeClient: Send + Sync {
    /// Create the container described by `spec` and start it, returning
    /// only once the runtime reports it started.
    async fn create_and_start(&self, spec: &ContainerSpec) -> Result<(), RuntimeError>;
}

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("failed to connect to container runtime: {0}")]
    Connect(#[source] BoxError),

    #[error("failed to create container {name}: {source}")]
    Create {
        name: String,
        #[source]
        source: BoxError,
    },

    #[error("failed to start container {name}: {source}")]
    Start {
        name: String,
        #[source]
        source: BoxError,
    },
}

impl RuntimeError {
    pub fn connect(source: impl Into<BoxError>) -> Self {
        Self::Connect(source.into())
    }

    pub fn create(name: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Create {
            name: name.into(),
            source: source.into(),
        }
    }

    pub fn start(name: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Start {
            name: name.into(),
            source: source.into(),
        }
    }
}

/// Docker-backed runtime client.
pub struct DockerRuntime {
    docker: Docker,
}

impl DockerRuntime {
    /// Connect using the standard environment (`DOCKER_HOST` or the local
    /// socket).
    pub fn connect() -> Result<Self, RuntimeError> {
        let docker = Docker::connect_with_defaults().map_err(RuntimeError::connect)?;
        Ok(Self { docker })
    }
}

#[async_trait]
impl RuntimeClient for DockerRuntime {
    async fn create_and_start(&self, spec: &ContainerSpec) -> Result<(), RuntimeError> {
        let options = CreateContainerOptions {
            name: spec.name.clone(),
            platform: None,
        };
        let config = Config {
            image: Some(spec.image.clone()),
            cmd: spec.command.clone(),
            labels: spec.labels.clone(),
            host_config: Some(HostConfig {
                publish_all_ports: Some(true),
                ..Default::default()
            }),
            ..Default::default()
        };

        let created = self
            .docker
            .create_container(Some(options), config)
            .await
            .map_err(|err| RuntimeError::create(&spec.name, err))?;
        self.docker
            .start_container::<String>(&created.id, None)
            .await
            .map_err(|err| RuntimeError::start(&spec.name, err))?;

        Ok(())
    }
}
