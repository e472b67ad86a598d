//! Error type shared across the core crate.

/// Errors produced by core domain logic.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A domain rule was violated (bad bounds, duplicate id, missing
    /// parameter, ...).
    #[error("Validation error: {0}")]
    Validation(String),
}
