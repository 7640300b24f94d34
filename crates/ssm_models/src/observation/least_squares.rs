//! Least-squares observation-error model.
//!
//! Each fix carries weighting factors `(k0, k1)` that scale the global
//! dispersions `(τ0, τ1)`; the two coordinates share a correlation `ρo`.

use ssm_core::math::matrix::CovarianceMatrix;
use ssm_core::traits::{lift, Scalar};

/// Global least-squares error parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LeastSquares<T: Scalar> {
    /// Error dispersions `(τ0, τ1)`
    pub tau: [T; 2],
    /// Error correlation `ρo`
    pub rho: T,
}

impl<T: Scalar> LeastSquares<T> {
    /// Create from natural-scale parameters.
    pub fn new(tau: [T; 2], rho: T) -> Self {
        Self { tau, rho }
    }

    /// Error covariance of a fix with weighting factors `weights`.
    ///
    /// # Examples
    /// ```
    /// use ssm_models::observation::least_squares::LeastSquares;
    ///
    /// let ls = LeastSquares::new([2.0_f64, 3.0], 0.5);
    /// let cov = ls.covariance([1.0, 2.0]);
    /// assert_eq!(cov.get(0, 0), 4.0);
    /// assert_eq!(cov.get(1, 1), 36.0);
    /// assert_eq!(cov.get(0, 1), 6.0);
    /// ```
    pub fn covariance(&self, weights: [f64; 2]) -> CovarianceMatrix<T, 2> {
        let s = self.tau[0] * lift::<T>(weights[0]);
        let q = self.tau[1] * lift::<T>(weights[1]);
        CovarianceMatrix::symmetric_2x2(s * s, q * q, s * q * self.rho)
    }
}
