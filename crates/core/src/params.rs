//! Bounded parameter store for the LMS equalization experiment.
//!
//! Holds the authoritative current value of each tunable input and
//! enforces its domain. Edits are clamped into `[min, max]`, never
//! rejected; an unknown id is a logged no-op because the id set is
//! fixed at construction.

use serde::Serialize;

use crate::error::CoreError;

/* --------------------------------------------------------------------------
   Parameter ids
   -------------------------------------------------------------------------- */

/// LMS step size (mu).
pub const PARAM_STEP_SIZE: &str = "step-size";

/// Number of input samples (N).
pub const PARAM_NUM_SAMPLES: &str = "num-samples";

/// Power of the input signal.
pub const PARAM_SIGNAL_POWER: &str = "signal-power";

/// Power of the additive noise.
pub const PARAM_NOISE_POWER: &str = "noise-power";

/* --------------------------------------------------------------------------
   Types
   -------------------------------------------------------------------------- */

/// One tunable numeric input.
///
/// Invariant: `min <= value <= max` after construction and after every
/// edit. `step` is a granularity hint for incremental UI controls; it
/// does not quantize the stored value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    /// Unique stable key, one of the `PARAM_*` constants.
    pub id: &'static str,
    /// Human-readable display text (not used in logic).
    pub label: &'static str,
    /// Inclusive lower bound.
    pub min: f64,
    /// Inclusive upper bound.
    pub max: f64,
    /// Increment hint for sliders / steppers.
    pub step: f64,
    /// Current value.
    pub value: f64,
}

/// The fixed, ordered set of experiment parameters.
///
/// The set is closed at construction: parameters are never added or
/// removed afterwards, only their values change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterSet {
    params: Vec<Parameter>,
}

/// Snapshot of the four experiment values, extracted from a
/// [`ParameterSet`] for script synthesis and run submission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExperimentInputs {
    /// Number of samples (N).
    pub num_samples: f64,
    /// Signal power.
    pub signal_power: f64,
    /// Noise power.
    pub noise_power: f64,
    /// LMS step size (mu).
    pub step_size: f64,
}

/* --------------------------------------------------------------------------
   ParameterSet
   -------------------------------------------------------------------------- */

impl ParameterSet {
    /// The four experiment parameters with their default values and
    /// bounds.
    pub fn defaults() -> Self {
        Self {
            params: vec![
                Parameter {
                    id: PARAM_STEP_SIZE,
                    label: "Step-size (µ)",
                    min: 0.001,
                    max: 0.1,
                    step: 0.001,
                    value: 0.01,
                },
                Parameter {
                    id: PARAM_NUM_SAMPLES,
                    label: "Number of Samples (N)",
                    min: 10.0,
                    max: 1000.0,
                    step: 10.0,
                    value: 500.0,
                },
                Parameter {
                    id: PARAM_SIGNAL_POWER,
                    label: "Signal Power",
                    min: 0.005,
                    max: 0.05,
                    step: 0.001,
                    value: 0.01,
                },
                Parameter {
                    id: PARAM_NOISE_POWER,
                    label: "Noise Power",
                    min: 0.001,
                    max: 0.01,
                    step: 0.001,
                    value: 0.001,
                },
            ],
        }
    }

    /// Build a set from explicit parameters, validating each one.
    ///
    /// - Ids must be unique.
    /// - `min <= max` for every parameter.
    /// - Each default value must already lie within its bounds.
    pub fn new(params: Vec<Parameter>) -> Result<Self, CoreError> {
        for (i, p) in params.iter().enumerate() {
            if p.min > p.max {
                return Err(CoreError::Validation(format!(
                    "Parameter '{}' has min {} > max {}",
                    p.id, p.min, p.max
                )));
            }
            if p.value < p.min || p.value > p.max {
                return Err(CoreError::Validation(format!(
                    "Parameter '{}' default {} outside [{}, {}]",
                    p.id, p.value, p.min, p.max
                )));
            }
            if params[..i].iter().any(|q| q.id == p.id) {
                return Err(CoreError::Validation(format!(
                    "Duplicate parameter id '{}'",
                    p.id
                )));
            }
        }
        Ok(Self { params })
    }

    /// All parameters, in the stable order fixed at construction.
    pub fn parameters(&self) -> &[Parameter] {
        &self.params
    }

    /// Current value of the parameter with the given id.
    pub fn value(&self, id: &str) -> Option<f64> {
        self.params.iter().find(|p| p.id == id).map(|p| p.value)
    }

    /// Set a parameter's value, clamping it into `[min, max]`.
    ///
    /// Out-of-range input is silently clamped, never an error. An
    /// unknown id or a NaN input leaves the set untouched (logged).
    pub fn set_value(&mut self, id: &str, raw: f64) {
        if raw.is_nan() {
            tracing::warn!(id, "Ignoring NaN parameter edit");
            return;
        }
        match self.params.iter_mut().find(|p| p.id == id) {
            Some(p) => p.value = raw.clamp(p.min, p.max),
            None => tracing::warn!(id, "Ignoring edit for unknown parameter id"),
        }
    }

    /// Extract the four experiment values needed for script synthesis
    /// and run submission.
    ///
    /// Fails only if the set was constructed without one of the four
    /// well-known ids.
    pub fn experiment_inputs(&self) -> Result<ExperimentInputs, CoreError> {
        let get = |id: &str| {
            self.value(id)
                .ok_or_else(|| CoreError::Validation(format!("Missing parameter '{id}'")))
        };
        Ok(ExperimentInputs {
            num_samples: get(PARAM_NUM_SAMPLES)?,
            signal_power: get(PARAM_SIGNAL_POWER)?,
            noise_power: get(PARAM_NOISE_POWER)?,
            step_size: get(PARAM_STEP_SIZE)?,
        })
    }
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self::defaults()
    }
}

/* --------------------------------------------------------------------------
   Tests
   -------------------------------------------------------------------------- */
