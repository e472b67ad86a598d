//! Domain core for the siglab experiment panel.
//!
//! Pure, synchronous building blocks shared by the rest of the
//! workspace: the bounded parameter store, the Octave script
//! synthesizer, and the crate-level error type. No I/O happens here.

pub mod error;
pub mod params;
pub mod script;

pub use error::CoreError;
pub use params::{ExperimentInputs, Parameter, ParameterSet};
pub use script::Script;
