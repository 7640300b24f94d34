//! Numerical building blocks for the likelihood kernel.
//!
//! ## Modules
//!
//! - [`transforms`]: Unconstrained ↔ natural-scale parameter maps
//! - [`matrix`]: Fixed-size symmetric covariance matrices and Cholesky factors
//! - [`gaussian`]: Multivariate and univariate normal negative log-densities
//!
//! ## AD Compatibility
//!
//! Everything here is generic over `T: Scalar` and free of data-dependent
//! branches on `T`, so a dual or tape scalar sees the same operation
//! sequence for every parameter value.

pub mod gaussian;
pub mod matrix;
pub mod transforms;

pub use gaussian::{mvn_nll, univariate_nll, MultivariateNormal};
pub use matrix::{CholeskyFactor, CovarianceMatrix};
