//! Random-walk process model.
//!
//! Locations evolve with Gaussian steps whose covariance scales with the
//! squared time delta:
//! ```text
//! X[i] - X[i-1] ~ N(0, dt[i]² Σ),   Σ = [[σ0², ρ σ0 σ1], [ρ σ0 σ1, σ1²]]
//! ```

use ssm_core::math::gaussian::mvn_nll;
use ssm_core::math::matrix::CovarianceMatrix;
use ssm_core::traits::Scalar;

/// Random-walk innovation model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RandomWalk<T: Scalar> {
    /// Innovation standard deviations `(σ0, σ1)`
    pub sigma: [T; 2],
    /// Innovation correlation `ρp`
    pub rho: T,
}

impl<T: Scalar> RandomWalk<T> {
    /// Create from natural-scale parameters.
    pub fn new(sigma: [T; 2], rho: T) -> Self {
        Self { sigma, rho }
    }

    /// Unscaled innovation covariance `Σ`.
    pub fn covariance(&self) -> CovarianceMatrix<T, 2> {
        let [s0, s1] = self.sigma;
        CovarianceMatrix::symmetric_2x2(s0 * s0, s1 * s1, self.rho * s0 * s1)
    }

    /// NLL of the step from `prev` to `curr` over elapsed time `dt`.
    ///
    /// # Examples
    /// ```
    /// use ssm_models::process::random_walk::RandomWalk;
    ///
    /// let rw = RandomWalk::new([1.0_f64, 1.0], 0.0);
    /// let nll = rw.innovation_nll([0.0, 0.0], [1.0, 0.0], 1.0);
    /// let expected = (2.0 * std::f64::consts::PI).ln() + 0.5;
    /// assert!((nll - expected).abs() < 1e-12);
    /// ```
    pub fn innovation_nll(&self, prev: [T; 2], curr: [T; 2], dt: T) -> T {
        let cov_dt = self.covariance().scaled(dt * dt);
        mvn_nll(&cov_dt, &[curr[0] - prev[0], curr[1] - prev[1]])
    }
}
