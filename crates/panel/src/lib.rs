//! The experiment workflow panel.
//!
//! Composes the parameter store, the script synthesizer, and the
//! execution client into one component: edit parameters (clamped),
//! generate a script for preview/download, submit the current values
//! to the Octave runner, and expose the resulting image artifacts.
//!
//! State-changing milestones are broadcast as [`PanelEvent`]s via a
//! [`tokio::sync::broadcast`] channel; call [`Panel::subscribe`] to
//! receive them.

pub mod config;
pub mod events;
pub mod panel;
pub mod state;

pub use config::PanelConfig;
pub use events::PanelEvent;
pub use panel::{Panel, RunOutcome};
pub use state::{PanelSnapshot, RunPhase};
