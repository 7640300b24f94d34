//! Error types for likelihood evaluation.

use ssm_core::types::ModelError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors returned before any numerical work starts.
///
/// A non-finite NLL is not an error: it is returned as a value so the
/// optimiser can reject the parameter point.
#[derive(Debug, Error)]
pub enum LikelihoodError {
    /// Structural problem with the data or the latent trajectory
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// Invalid evaluator configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
