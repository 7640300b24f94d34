//! Error types for structured error handling.
//!
//! This module provides:
//! - `ModelError`: structural problems with the inputs of one likelihood evaluation
//! - `SelectorSite`: where an unsupported model selector was found
//!
//! Only structural problems are errors. A covariance matrix that is not
//! positive definite is a numerical condition: it surfaces as a non-finite
//! negative log-likelihood, never as a `ModelError`.

use std::fmt;
use thiserror::Error;

/// Location of a model selector in the input data.
///
/// # Examples
/// ```
/// use ssm_core::types::error::SelectorSite;
///
/// assert_eq!(SelectorSite::Process.to_string(), "process model");
/// assert_eq!(
///     SelectorSite::Observation { step: 4 }.to_string(),
///     "observation model at step 4"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorSite {
    /// The single process-model selector for the whole trajectory.
    Process,
    /// A per-step observation-model selector.
    Observation {
        /// Time-step index of the selector
        step: usize,
    },
}

impl fmt::Display for SelectorSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectorSite::Process => write!(f, "process model"),
            SelectorSite::Observation { step } => {
                write!(f, "observation model at step {}", step)
            }
        }
    }
}

/// Structural input errors.
///
/// Detected before any numerical work starts; a partially evaluated
/// likelihood is meaningless, so evaluation never begins when one of these
/// is present.
///
/// # Variants
/// - `DimensionMismatch`: input sequences of unequal length
/// - `EmptyTrajectory`: no time steps at all
/// - `UnsupportedModelSelector`: selector outside the defined variant set
/// - `ProcessModelMismatch`: latent trajectory representation does not match the process selector
/// - `InvalidFlag`: observation flag other than 0 or 1
///
/// # Examples
/// ```
/// use ssm_core::types::ModelError;
///
/// let err = ModelError::DimensionMismatch { field: "dt", expected: 5, got: 4 };
/// assert_eq!(
///     format!("{}", err),
///     "Dimension mismatch for dt: expected 5, got 4"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// An input sequence does not have one entry per time step.
    #[error("Dimension mismatch for {field}: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Name of the offending input
        field: &'static str,
        /// Required length (the number of time steps)
        expected: usize,
        /// Length that was supplied
        got: usize,
    },

    /// The trajectory has no time steps.
    #[error("Empty trajectory: at least one time step is required")]
    EmptyTrajectory,

    /// A model selector code outside the defined variant set.
    #[error("Unsupported selector {selector} for {site}")]
    UnsupportedModelSelector {
        /// Where the selector was found
        site: SelectorSite,
        /// The raw selector code
        selector: i32,
    },

    /// The latent trajectory was built for a different process model.
    #[error("Process model mismatch: data selects {data}, trajectory is {trajectory}")]
    ProcessModelMismatch {
        /// Process model named by the data
        data: &'static str,
        /// Process model the trajectory represents
        trajectory: &'static str,
    },

    /// An observation flag other than 0 (interpolation) or 1 (observation).
    #[error("Invalid observation flag {value} at step {step}")]
    InvalidFlag {
        /// Time-step index of the flag
        step: usize,
        /// The raw flag value
        value: i32,
    },
}

impl ModelError {
    /// Check a sequence length against the number of time steps.
    ///
    /// # Examples
    /// ```
    /// use ssm_core::types::ModelError;
    ///
    /// assert!(ModelError::check_len("flags", 3, 3).is_ok());
    /// assert!(ModelError::check_len("flags", 3, 2).is_err());
    /// ```
    pub fn check_len(field: &'static str, expected: usize, got: usize) -> Result<(), Self> {
        if expected == got {
            Ok(())
        } else {
            Err(ModelError::DimensionMismatch {
                field,
                expected,
                got,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_display() {
        let err = ModelError::DimensionMismatch {
            field: "positions",
            expected: 10,
            got: 9,
        };
        assert_eq!(
            err.to_string(),
            "Dimension mismatch for positions: expected 10, got 9"
        );
    }

    #[test]
    fn test_unsupported_selector_display() {
        let err = ModelError::UnsupportedModelSelector {
            site: SelectorSite::Observation { step: 2 },
            selector: 7,
        };
        assert_eq!(
            err.to_string(),
            "Unsupported selector 7 for observation model at step 2"
        );

        let err = ModelError::UnsupportedModelSelector {
            site: SelectorSite::Process,
            selector: -1,
        };
        assert_eq!(err.to_string(), "Unsupported selector -1 for process model");
    }

    #[test]
    fn test_process_model_mismatch_display() {
        let err = ModelError::ProcessModelMismatch {
            data: "RandomWalk",
            trajectory: "CorrelatedRandomWalk",
        };
        assert!(err.to_string().contains("data selects RandomWalk"));
    }

    #[test]
    fn test_check_len() {
        assert_eq!(ModelError::check_len("dt", 4, 4), Ok(()));
        assert_eq!(
            ModelError::check_len("dt", 4, 5),
            Err(ModelError::DimensionMismatch {
                field: "dt",
                expected: 4,
                got: 5
            })
        );
    }

    #[test]
    fn test_error_is_std_error() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&ModelError::EmptyTrajectory);
    }
}
