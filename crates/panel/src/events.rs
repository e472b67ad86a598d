//! Panel events emitted toward the mounting UI.
//!
//! These mirror the user-visible state changes of the workflow: script
//! generation and the run lifecycle. They carry the run sequence
//! number so listeners can correlate start/end pairs.

use serde::Serialize;

/// A state-change event originating from the panel.
#[derive(Debug, Clone, Serialize)]
pub enum PanelEvent {
    /// A script was (re)generated from the current parameter values.
    ScriptGenerated,

    /// A run was submitted to the Octave runner.
    RunStarted {
        /// Sequence number of this run.
        seq: u64,
    },

    /// A run completed and its artifacts were applied.
    RunCompleted {
        seq: u64,
        /// Fully resolved artifact URLs, in service order.
        artifact_urls: Vec<String>,
    },

    /// A run failed; previous artifacts were left untouched.
    RunFailed {
        seq: u64,
        /// Human-readable error description.
        error: String,
    },
}
