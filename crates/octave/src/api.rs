//! REST API client for the Octave runner HTTP endpoint.
//!
//! Wraps the runner's `/lms_equ` endpoint using [`reqwest`]. The
//! service receives the four numeric experiment values (never the
//! synthesized script text) and answers with relative image paths that
//! are resolved here against the same base address.

use serde::{Deserialize, Serialize};
use siglab_core::{CoreError, ExperimentInputs, ParameterSet};

/// HTTP client for a single Octave runner instance.
pub struct OctaveApi {
    client: reqwest::Client,
    base_url: String,
}

/// Request body for a simulation run.
///
/// Field names match the runner's wire format exactly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunRequest {
    /// Number of samples.
    #[serde(rename = "N")]
    pub n: f64,
    /// Signal power.
    pub signal_power: f64,
    /// Noise power.
    pub noise_power: f64,
    /// LMS step size.
    pub mu: f64,
}

/// Success response from the runner: an ordered list of image paths,
/// relative to the service base address.
#[derive(Debug, Clone, Deserialize)]
pub struct RunOutputs {
    /// Rendered output images, in the order the runner produced them.
    pub images: Vec<String>,
}

/// Errors from the Octave runner REST layer.
#[derive(Debug, thiserror::Error)]
pub enum OctaveApiError {
    /// The HTTP request itself failed (network, DNS, TLS, decode, ...).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The runner returned a non-2xx status code.
    #[error("Octave runner error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The runner reported success but returned no images. An empty
    /// artifact list is not a valid success result.
    #[error("Octave runner returned no output images")]
    EmptyOutputs,
}

impl RunRequest {
    /// Snapshot the current parameter values into a request payload.
    pub fn from_params(params: &ParameterSet) -> Result<Self, CoreError> {
        Ok(Self::from(params.experiment_inputs()?))
    }
}

impl From<ExperimentInputs> for RunRequest {
    fn from(inputs: ExperimentInputs) -> Self {
        Self {
            n: inputs.num_samples,
            signal_power: inputs.signal_power,
            noise_power: inputs.noise_power,
            mu: inputs.step_size,
        }
    }
}

impl RunOutputs {
    /// Resolve each returned path into a full URL by prefixing the
    /// service base address, preserving order.
    pub fn resolve_urls(&self, base_url: &str) -> Vec<String> {
        let base = base_url.trim_end_matches('/');
        self.images
            .iter()
            .map(|path| {
                if path.starts_with('/') {
                    format!("{base}{path}")
                } else {
                    format!("{base}/{path}")
                }
            })
            .collect()
    }
}

impl OctaveApi {
    /// Create a new API client for an Octave runner instance.
    ///
    /// * `base_url` - Base HTTP URL, e.g. `http://localhost:5000`.
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Create an API client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling).
    pub fn with_client(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// Base HTTP URL of the runner.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit a simulation run and wait for its outputs.
    ///
    /// Sends a `POST /lms_equ` request with the experiment values.
    /// Resolves once the runner has finished executing the simulation;
    /// there is no intermediate queueing state.
    pub async fn run_simulation(
        &self,
        request: &RunRequest,
    ) -> Result<RunOutputs, OctaveApiError> {
        tracing::debug!(
            base_url = %self.base_url,
            n = request.n,
            mu = request.mu,
            "Submitting simulation run to Octave runner",
        );

        let response = self
            .client
            .post(format!("{}/lms_equ", self.base_url))
            .json(request)
            .send()
            .await?;

        let outputs: RunOutputs = Self::parse_response(response).await?;
        if outputs.images.is_empty() {
            return Err(OctaveApiError::EmptyOutputs);
        }
        Ok(outputs)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or an [`OctaveApiError::Api`]
    /// containing the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, OctaveApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(OctaveApiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, OctaveApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

/* --------------------------------------------------------------------------
   Tests
   -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    // --- Payload shape ---

    #[test]
    fn run_request_serializes_wire_field_names() {
        let request = RunRequest::from_params(&ParameterSet::defaults()).unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["N"], 500.0);
        assert_eq!(json["signal_power"], 0.01);
        assert_eq!(json["noise_power"], 0.001);
        assert_eq!(json["mu"], 0.01);
    }

    #[test]
    fn run_request_snapshots_edited_values() {
        let mut params = ParameterSet::defaults();
        params.set_value(siglab_core::params::PARAM_NUM_SAMPLES, 5000.0);
        let request = RunRequest::from_params(&params).unwrap();
        // Edits are clamped before they ever reach the wire.
        assert_eq!(request.n, 1000.0);
    }

    // --- URL resolution ---

    #[test]
    fn resolve_urls_prefixes_base_address_in_order() {
        let outputs = RunOutputs {
            images: vec!["/a.png".to_string(), "/b.png".to_string()],
        };
        assert_eq!(
            outputs.resolve_urls("http://localhost:5000"),
            vec![
                "http://localhost:5000/a.png".to_string(),
                "http://localhost:5000/b.png".to_string(),
            ]
        );
    }

    #[test]
    fn resolve_urls_handles_missing_and_doubled_slashes() {
        let outputs = RunOutputs {
            images: vec!["plot.png".to_string()],
        };
        assert_eq!(
            outputs.resolve_urls("http://localhost:5000/"),
            vec!["http://localhost:5000/plot.png".to_string()]
        );
    }

    // --- Response parsing ---

    #[test]
    fn run_outputs_deserialize_from_runner_body() {
        let outputs: RunOutputs =
            serde_json::from_str(r#"{"images": ["/out/mse.png"]}"#).unwrap();
        assert_eq!(outputs.images, vec!["/out/mse.png"]);
    }

    #[test]
    fn run_outputs_reject_body_without_images() {
        assert!(serde_json::from_str::<RunOutputs>(r#"{"ok": true}"#).is_err());
    }

    // --- Error display ---

    #[test]
    fn empty_outputs_error_names_the_problem() {
        assert!(OctaveApiError::EmptyOutputs
            .to_string()
            .contains("no output images"));
    }
}
