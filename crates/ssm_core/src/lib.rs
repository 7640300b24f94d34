//! # ssm_core: Numeric Foundation for Telemetry State-Space Likelihoods
//!
//! ## Layer 1 (Foundation) Role
//!
//! ssm_core is the bottom layer of the workspace, providing:
//! - Parameter transforms between optimiser scale and natural scale (`math::transforms`)
//! - Fixed-size covariance matrices and Cholesky factors (`math::matrix`)
//! - Multivariate and univariate Gaussian negative log-densities (`math::gaussian`)
//! - The generic `Scalar` abstraction over `f64` and dual numbers (`traits`)
//! - Dual number type integration (`types::dual`)
//! - Error types: `ModelError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other ssm_* crates, with minimal external dependencies:
//! - num-dual: `DualNum<f64>`, the bound behind `Scalar`, and the `Dual64` type
//! - thiserror: Error derivation
//!
//! ## Usage Examples
//!
//! ```rust
//! use ssm_core::math::gaussian::mvn_nll;
//! use ssm_core::math::matrix::CovarianceMatrix;
//! use ssm_core::math::transforms::{correlation, positive};
//!
//! let sigma = positive(0.0_f64);
//! let rho = correlation(0.0_f64);
//! assert_eq!(sigma, 1.0);
//! assert_eq!(rho, 0.0);
//!
//! let cov = CovarianceMatrix::symmetric_2x2(sigma * sigma, sigma * sigma, rho);
//! let nll = mvn_nll(&cov, &[0.0, 0.0]);
//! assert!((nll - (2.0 * std::f64::consts::PI).ln()).abs() < 1e-12);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod traits;
pub mod types;
