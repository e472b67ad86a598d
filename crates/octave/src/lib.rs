//! HTTP client for the remote Octave runner service.
//!
//! Provides the typed request/response model for the `/lms_equ`
//! endpoint, artifact URL resolution against the service base address,
//! and the [`ExecutionBackend`] trait the panel uses so tests can
//! substitute a scripted double.

pub mod api;
pub mod backend;

pub use api::{OctaveApi, OctaveApiError, RunOutputs, RunRequest};
pub use backend::ExecutionBackend;
