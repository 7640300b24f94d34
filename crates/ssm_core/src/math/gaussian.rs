//! Gaussian negative log-densities.
//!
//! This module provides AD-compatible implementations of:
//! - [`mvn_nll`]: zero-mean multivariate normal NLL for a residual vector
//! - [`univariate_nll`]: univariate normal NLL
//! - [`MultivariateNormal`]: a density object that factorises its covariance once
//!
//! ## Mathematical Definition
//!
//! ```text
//! nll(r; Σ) = 0.5 * (n ln 2π + ln|Σ| + r^T Σ^{-1} r)
//! ```
//!
//! ## Failure Mode
//!
//! When `Σ` is not positive definite the result is NaN or ±∞. This is never
//! masked: the external optimiser reads a non-finite objective as a rejected
//! region of parameter space.

use crate::traits::{lift, Scalar};

use super::matrix::{CholeskyFactor, CovarianceMatrix};

/// ln(2π)
const LN_2PI: f64 = 1.837_877_066_409_345_5;

/// Zero-mean multivariate normal with a fixed covariance.
///
/// # Examples
/// ```
/// use ssm_core::math::gaussian::MultivariateNormal;
/// use ssm_core::math::matrix::CovarianceMatrix;
///
/// let mvn = MultivariateNormal::new(CovarianceMatrix::diagonal([1.0_f64, 1.0]));
/// let nll = mvn.nll(&[1.0, 0.0]);
/// let expected = (2.0 * std::f64::consts::PI).ln() + 0.5;
/// assert!((nll - expected).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct MultivariateNormal<T: Scalar, const N: usize> {
    cholesky: CholeskyFactor<T, N>,
    log_det: T,
}

impl<T: Scalar, const N: usize> MultivariateNormal<T, N> {
    /// Factorise `cov` and cache its log-determinant.
    pub fn new(cov: CovarianceMatrix<T, N>) -> Self {
        let cholesky = cov.cholesky();
        let log_det = cholesky.log_determinant();
        Self { cholesky, log_det }
    }

    /// `ln|Σ|`.
    pub fn log_determinant(&self) -> T {
        self.log_det
    }

    /// Negative log-density of `residual`.
    pub fn nll(&self, residual: &[T; N]) -> T {
        let quad = self.cholesky.mahalanobis_squared(residual);
        lift::<T>(0.5) * (lift::<T>(N as f64 * LN_2PI) + self.log_det + quad)
    }
}

/// Negative log-density of a zero-mean multivariate normal.
///
/// # Arguments
/// * `cov` - Symmetric covariance `Σ`
/// * `residual` - Residual vector `r`
///
/// # Returns
/// `0.5 * (n ln 2π + ln|Σ| + r^T Σ^{-1} r)`, non-finite when `Σ` is not
/// positive definite.
///
/// # Examples
/// ```
/// use ssm_core::math::gaussian::mvn_nll;
/// use ssm_core::math::matrix::CovarianceMatrix;
///
/// let cov = CovarianceMatrix::symmetric_2x2(1.0_f64, 1.0, 2.0);
/// assert!(!mvn_nll(&cov, &[0.1, 0.2]).is_finite());
/// ```
#[inline]
pub fn mvn_nll<T: Scalar, const N: usize>(cov: &CovarianceMatrix<T, N>, residual: &[T; N]) -> T {
    MultivariateNormal::new(*cov).nll(residual)
}

/// Negative log-density of `x` under `N(mean, sd²)`.
///
/// # Examples
/// ```
/// use ssm_core::math::gaussian::univariate_nll;
///
/// let nll = univariate_nll(0.0_f64, 0.0, 1.0);
/// assert!((nll - 0.5 * (2.0 * std::f64::consts::PI).ln()).abs() < 1e-12);
/// ```
#[inline]
pub fn univariate_nll<T: Scalar>(x: T, mean: T, sd: T) -> T {
    let half: T = lift(0.5);
    let z = (x - mean) / sd;
    lift::<T>(0.5 * LN_2PI) + sd.ln() + half * z * z
}
