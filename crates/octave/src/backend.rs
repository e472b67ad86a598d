//! Execution backend abstraction.
//!
//! The panel drives its run lifecycle through this trait rather than
//! [`OctaveApi`](crate::OctaveApi) directly, so tests can script the
//! remote side without a network.

use async_trait::async_trait;

use crate::api::{OctaveApi, OctaveApiError, RunOutputs, RunRequest};

/// A remote service that can execute one simulation run.
#[async_trait]
pub trait ExecutionBackend: Send + Sync {
    /// Execute a run and return its raw outputs (unresolved paths).
    async fn run(&self, request: &RunRequest) -> Result<RunOutputs, OctaveApiError>;

    /// Base address used to resolve returned artifact paths.
    fn base_url(&self) -> &str;
}

#[async_trait]
impl ExecutionBackend for OctaveApi {
    async fn run(&self, request: &RunRequest) -> Result<RunOutputs, OctaveApiError> {
        self.run_simulation(request).await
    }

    fn base_url(&self) -> &str {
        OctaveApi::base_url(self)
    }
}
