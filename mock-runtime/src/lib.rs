//! In-process stand-in for a container runtime.
//!
//! Simulates create+start latency with a timer and records every spec it
//! receives, so tests can assert on image assignment, container naming, and
//! failure propagation without a daemon.

use async_trait::async_trait;
use stampede::runtime::{ContainerSpec, RuntimeClient, RuntimeError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub struct MockRuntime {
    delay: Duration,
    fail_after: Option<usize>,
    calls: AtomicUsize,
    seen: Mutex<Vec<ContainerSpec>>,
}

impl MockRuntime {
    /// A runtime where every create+start takes `delay`.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            fail_after: None,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// A runtime that responds immediately.
    pub fn instant() -> Self {
        Self::with_delay(Duration::ZERO)
    }

    /// Fail every call after the first `calls` successful ones.
    pub fn fail_after(mut self, calls: usize) -> Self {
        self.fail_after = Some(calls);
        self
    }

    /// Total create+start calls issued, including failed ones.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Specs of all successfully created containers, in arrival order.
    pub fn seen(&self) -> Vec<ContainerSpec> {
        self.seen.lock().unwrap().clone()
    }

    pub fn images_seen(&self) -> Vec<String> {
        self.seen().into_iter().map(|spec| spec.image).collect()
    }
}

#[async_trait]
impl RuntimeClient for MockRuntime {
    async fn create_and_start(&self, spec: &ContainerSpec) -> Result<(), RuntimeError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(limit) = self.fail_after {
            if call >= limit {
                return Err(RuntimeError::create(&spec.name, "injected fault"));
            }
        }

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.seen.lock().unwrap().push(spec.clone());
        Ok(())
    }
}
