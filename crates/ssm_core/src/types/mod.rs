//! Core numeric and error types.
//!
//! This module provides:
//! - `dual`: Dual number type integration with num-dual for derivative checks
//! - `error`: Structured error types for structural validation of model inputs
//!
//! # Re-exports
//!
//! - [`ModelError`] from `error`

pub mod dual;
pub mod error;

pub use error::ModelError;
