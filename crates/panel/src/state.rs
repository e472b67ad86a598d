//! Run lifecycle state and the render snapshot.

use serde::Serialize;
use siglab_core::Parameter;

/// Artifact reference shown in place of real results before the first
/// successful run replaces the list.
pub const PLACEHOLDER_ARTIFACT: &str = "/assets/placeholder.png";

/// Where the panel is in the asynchronous run lifecycle.
///
/// `Idle -> Loading -> {Success, Error}`, re-entrant: a new run from
/// `Success` or `Error` goes back through `Loading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunPhase {
    /// No run has been requested yet.
    Idle,
    /// A run is in flight.
    Loading,
    /// The last applied run produced artifacts.
    Success,
    /// The last applied run failed; previous artifacts are retained
    /// but hidden.
    Error,
}

/// Immutable view of the panel for rendering.
///
/// `artifact_urls` is already filtered by the result-visibility flag:
/// it is empty unless the last applied run succeeded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelSnapshot {
    /// All parameters in their stable display order.
    pub parameters: Vec<Parameter>,
    /// Render-safe script preview ([`SCRIPT_PLACEHOLDER`] before the
    /// first generation).
    ///
    /// [`SCRIPT_PLACEHOLDER`]: siglab_core::script::SCRIPT_PLACEHOLDER
    pub script_display: String,
    /// Current lifecycle phase.
    pub phase: RunPhase,
    /// True while a run is in flight.
    pub loading: bool,
    /// Visible artifact URLs (empty while hidden).
    pub artifact_urls: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_phase_is_distinct_from_terminal_phases() {
        assert_ne!(RunPhase::Loading, RunPhase::Success);
        assert_ne!(RunPhase::Loading, RunPhase::Error);
        assert_ne!(RunPhase::Idle, RunPhase::Loading);
    }
}
