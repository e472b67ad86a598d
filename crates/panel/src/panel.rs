//! The workflow component itself.
//!
//! [`Panel`] owns the parameter store, the last generated script, and
//! the run lifecycle state. Created once per mount via [`Panel::new`];
//! the returned `Arc` can be cheaply cloned into UI callbacks.
//!
//! Concurrency contract: runs are tagged with a monotonically
//! increasing sequence number at issue time and a response is applied
//! only while its sequence is still the latest -- the most recent
//! request always wins and a stale response is discarded, never
//! merged. After [`Panel::shutdown`] no response mutates state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{broadcast, RwLock};
use tokio_util::sync::CancellationToken;

use siglab_core::script::{self, DownloadPayload, SCRIPT_PLACEHOLDER};
use siglab_core::{CoreError, ParameterSet, Script};
use siglab_octave::{ExecutionBackend, OctaveApi, OctaveApiError, RunRequest};

use crate::config::PanelConfig;
use crate::events::PanelEvent;
use crate::state::{PanelSnapshot, RunPhase, PLACEHOLDER_ARTIFACT};

/// Broadcast channel capacity for panel events.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// The parameter-to-script-to-result workflow component.
pub struct Panel {
    inner: RwLock<PanelInner>,
    backend: Arc<dyn ExecutionBackend>,
    event_tx: broadcast::Sender<PanelEvent>,
    /// Liveness token -- cancelled on unmount.
    cancel: CancellationToken,
    /// Sequence number of the most recently issued run.
    run_seq: AtomicU64,
}

/// Mutable component state, guarded by the panel's lock.
struct PanelInner {
    params: ParameterSet,
    /// Last generated script, if any. Overwritten on regeneration;
    /// goes stale silently when parameters change afterwards.
    script: Option<Script>,
    phase: RunPhase,
    artifact_urls: Vec<String>,
    show_results: bool,
}

/// How a single [`Panel::run`] call ended.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// The run succeeded and its artifacts were applied.
    Completed {
        /// Fully resolved artifact URLs.
        artifact_urls: Vec<String>,
    },
    /// The run failed; the previous artifact list was left untouched.
    Failed {
        /// Human-readable error description.
        error: String,
    },
    /// A newer run was issued while this one was in flight; the
    /// response was discarded.
    Superseded,
    /// The panel was shut down before the response arrived; the
    /// response was discarded.
    Cancelled,
}

impl Panel {
    /// Create a panel talking to the real Octave runner named in the
    /// configuration.
    pub fn new(config: PanelConfig) -> Arc<Self> {
        let backend = Arc::new(OctaveApi::new(config.service_url.clone()));
        Self::with_backend(config, backend)
    }

    /// Create a panel over an explicit execution backend (used by
    /// tests to script the remote side).
    pub fn with_backend(config: PanelConfig, backend: Arc<dyn ExecutionBackend>) -> Arc<Self> {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Arc::new(Self {
            inner: RwLock::new(PanelInner {
                params: config.parameters,
                script: None,
                phase: RunPhase::Idle,
                artifact_urls: vec![PLACEHOLDER_ARTIFACT.to_string()],
                show_results: false,
            }),
            backend,
            event_tx,
            cancel: CancellationToken::new(),
            run_seq: AtomicU64::new(0),
        })
    }

    /// Subscribe to panel events.
    pub fn subscribe(&self) -> broadcast::Receiver<PanelEvent> {
        self.event_tx.subscribe()
    }

    /// Edit one parameter, clamping the value into its bounds.
    ///
    /// Out-of-range input is silently clamped; an unknown id is a
    /// no-op. Edits made while a run is in flight do not affect that
    /// run's already-captured payload.
    pub async fn set_parameter(&self, id: &str, raw: f64) {
        self.inner.write().await.params.set_value(id, raw);
    }

    /// Generate (or regenerate) the script from the current values.
    ///
    /// The previous script, if any, is replaced wholesale. Returns the
    /// new script for preview/download.
    pub async fn generate_script(&self) -> Result<Script, CoreError> {
        let mut inner = self.inner.write().await;
        let script = script::generate(&inner.params.experiment_inputs()?);
        inner.script = Some(script.clone());
        drop(inner);

        let _ = self.event_tx.send(PanelEvent::ScriptGenerated);
        Ok(script)
    }

    /// True when a script exists and regenerating from the current
    /// values would change its code.
    pub async fn script_is_stale(&self) -> bool {
        let inner = self.inner.read().await;
        match (&inner.script, inner.params.experiment_inputs()) {
            (Some(script), Ok(inputs)) => script::generate(&inputs).code != script.code,
            _ => false,
        }
    }

    /// Download payload for the last generated script, if any.
    ///
    /// The byte content equals the last-generated code exactly, even
    /// if parameters have changed since.
    pub async fn download_script(&self) -> Option<DownloadPayload> {
        self.inner
            .read()
            .await
            .script
            .as_ref()
            .map(script::download_payload)
    }

    /// Submit the current parameter values to the Octave runner and
    /// apply the response.
    ///
    /// The payload is captured before the network round-trip, so
    /// concurrent edits cannot leak into an in-flight run. The payload
    /// carries parameter values only -- whatever script text currently
    /// exists is irrelevant to execution.
    pub async fn run(&self) -> RunOutcome {
        let seq = self.run_seq.fetch_add(1, Ordering::SeqCst) + 1;

        let request = {
            let mut inner = self.inner.write().await;
            let request = match RunRequest::from_params(&inner.params) {
                Ok(request) => request,
                Err(e) => {
                    // Only reachable with a parameter set missing one
                    // of the four well-known ids.
                    tracing::error!(seq, error = %e, "Cannot build run payload");
                    inner.phase = RunPhase::Error;
                    let error = e.to_string();
                    drop(inner);
                    let _ = self.event_tx.send(PanelEvent::RunFailed {
                        seq,
                        error: error.clone(),
                    });
                    return RunOutcome::Failed { error };
                }
            };
            inner.phase = RunPhase::Loading;
            // Hide any stale result while the new one is pending.
            inner.show_results = false;
            request
        };

        tracing::info!(seq, n = request.n, mu = request.mu, "Submitting simulation run");
        let _ = self.event_tx.send(PanelEvent::RunStarted { seq });

        // An empty artifact list is never a valid success result, no
        // matter which backend produced it.
        let result = self.backend.run(&request).await.and_then(|outputs| {
            if outputs.images.is_empty() {
                Err(OctaveApiError::EmptyOutputs)
            } else {
                Ok(outputs)
            }
        });

        let mut inner = self.inner.write().await;

        // Apply only while this run is still the latest and the panel
        // is still mounted; discarded responses leave the lifecycle to
        // their successor.
        if self.cancel.is_cancelled() {
            tracing::debug!(seq, "Discarding response after shutdown");
            return RunOutcome::Cancelled;
        }
        if seq != self.run_seq.load(Ordering::SeqCst) {
            tracing::debug!(seq, "Discarding superseded response");
            return RunOutcome::Superseded;
        }

        match result {
            Ok(outputs) => {
                let artifact_urls = outputs.resolve_urls(self.backend.base_url());
                inner.artifact_urls = artifact_urls.clone();
                inner.show_results = true;
                inner.phase = RunPhase::Success;
                drop(inner);

                tracing::info!(seq, count = artifact_urls.len(), "Run completed");
                let _ = self.event_tx.send(PanelEvent::RunCompleted {
                    seq,
                    artifact_urls: artifact_urls.clone(),
                });
                RunOutcome::Completed { artifact_urls }
            }
            Err(e) => {
                // Previous artifacts stay as they are, just hidden.
                inner.show_results = false;
                inner.phase = RunPhase::Error;
                drop(inner);

                let error = e.to_string();
                tracing::error!(seq, error = %error, "Run failed");
                let _ = self.event_tx.send(PanelEvent::RunFailed {
                    seq,
                    error: error.clone(),
                });
                RunOutcome::Failed { error }
            }
        }
    }

    /// Immutable view of the panel for rendering.
    pub async fn snapshot(&self) -> PanelSnapshot {
        let inner = self.inner.read().await;
        PanelSnapshot {
            parameters: inner.params.parameters().to_vec(),
            script_display: inner
                .script
                .as_ref()
                .map(|s| s.display.clone())
                .unwrap_or_else(|| SCRIPT_PLACEHOLDER.to_string()),
            phase: inner.phase,
            loading: inner.phase == RunPhase::Loading,
            artifact_urls: if inner.show_results {
                inner.artifact_urls.clone()
            } else {
                Vec::new()
            },
        }
    }

    /// Unmount the panel: late-arriving responses will be discarded
    /// instead of mutating now-discarded state.
    pub fn shutdown(&self) {
        tracing::info!("Shutting down panel");
        self.cancel.cancel();
    }
}
