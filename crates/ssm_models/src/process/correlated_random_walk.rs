//! Correlated random-walk process model.
//!
//! Velocity is a latent Wiener process with diffusion coefficient `D`;
//! location is its time integral, which gives momentum-preserving movement.
//!
//! ```text
//! mu[i] = mu[i-1] + v[i] dt[i] + e_mu,   e_mu ~ N(0, tiny)
//! v[i]  = v[i-1] + e_v,                  e_v  ~ N(0, 2 D dt[i])
//! ```
//!
//! The first state is pinned to the known initial state with standard
//! deviation `tiny`. `tiny` is small but never zero, so the anchor density
//! stays proper.

use ssm_core::math::gaussian::{mvn_nll, univariate_nll};
use ssm_core::math::matrix::CovarianceMatrix;
use ssm_core::traits::{lift, Scalar};

/// Default anchor standard deviation and location-slot variance.
pub const DEFAULT_TINY: f64 = 1e-5;

/// Correlated random-walk innovation model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CorrelatedRandomWalk<T: Scalar> {
    /// Diffusion coefficient `D`
    pub diffusion: T,
    /// Known `(x, y, vx, vy)` at the first step
    pub initial_state: [T; 4],
    /// Anchor standard deviation, also the location-slot variance
    pub tiny: T,
}

impl<T: Scalar> CorrelatedRandomWalk<T> {
    /// Create from the natural-scale diffusion and the data's initial state.
    pub fn new(diffusion: T, initial_state: [f64; 4], tiny: f64) -> Self {
        Self {
            diffusion,
            initial_state: initial_state.map(lift),
            tiny: lift(tiny),
        }
    }

    /// Diagonal 4×4 innovation covariance for elapsed time `dt`.
    ///
    /// Slot order: `(mu_x, mu_y, v_x, v_y)`.
    pub fn covariance(&self, dt: T) -> CovarianceMatrix<T, 4> {
        let two = T::one() + T::one();
        let var_v = two * self.diffusion * dt;
        CovarianceMatrix::diagonal([self.tiny, self.tiny, var_v, var_v])
    }

    /// Penalty tying the first location and velocity to the initial state.
    pub fn anchor_nll(&self, location: [T; 2], velocity: [T; 2]) -> T {
        let mut acc = T::zero();
        for k in 0..2 {
            acc = acc + univariate_nll(location[k], self.initial_state[k], self.tiny);
            acc = acc + univariate_nll(velocity[k], self.initial_state[k + 2], self.tiny);
        }
        acc
    }

    /// NLL of the transition from step `i-1` to step `i`.
    ///
    /// The location innovation uses the velocity at the *current* step.
    pub fn innovation_nll(
        &self,
        prev_location: [T; 2],
        location: [T; 2],
        prev_velocity: [T; 2],
        velocity: [T; 2],
        dt: T,
    ) -> T {
        let innovation = [
            location[0] - (prev_location[0] + velocity[0] * dt),
            location[1] - (prev_location[1] + velocity[1] * dt),
            velocity[0] - prev_velocity[0],
            velocity[1] - prev_velocity[1],
        ];
        mvn_nll(&self.covariance(dt), &innovation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn model() -> CorrelatedRandomWalk<f64> {
        CorrelatedRandomWalk::new(0.5, [1.0, 2.0, 0.1, -0.1], DEFAULT_TINY)
    }

    #[test]
    fn test_covariance_diagonal() {
        let cov = model().covariance(3.0);
        assert_eq!(cov.get(0, 0), DEFAULT_TINY);
        assert_eq!(cov.get(1, 1), DEFAULT_TINY);
        assert_relative_eq!(cov.get(2, 2), 3.0);
        assert_relative_eq!(cov.get(3, 3), 3.0);
        assert_eq!(cov.get(0, 2), 0.0);
        assert!(cov.is_symmetric());
    }

    #[test]
    fn test_anchor_minimum_at_initial_state() {
        let m = model();
        let at_state = m.anchor_nll([1.0, 2.0], [0.1, -0.1]);
        // four univariate terms at zero residual
        let minimum = 4.0 * (0.5 * (2.0 * PI).ln() + DEFAULT_TINY.ln());
        assert_relative_eq!(at_state, minimum, epsilon = 1e-9);
    }

    #[test]
    fn test_anchor_grows_with_squared_distance() {
        let m = model();
        let base = m.anchor_nll([1.0, 2.0], [0.1, -0.1]);
        let mut last = base;
        for &d in &[1e-6, 2e-6, 5e-6, 1e-5] {
            let v = m.anchor_nll([1.0 + d, 2.0], [0.1, -0.1]);
            assert!(v > last);
            let expected = 0.5 * (d / DEFAULT_TINY).powi(2);
            assert_relative_eq!(v - base, expected, epsilon = 1e-6);
            last = v;
        }
    }

    #[test]
    fn test_innovation_perfect_integration() {
        // Location moves exactly by v[i] dt and velocity does not change:
        // only the normalising constants remain
        let m = model();
        let dt = 2.0;
        let nll = m.innovation_nll([0.0, 0.0], [0.2, -0.2], [0.1, -0.1], [0.1, -0.1], dt);
        let var_v = 2.0 * 0.5 * dt;
        let expected = 0.5 * (4.0 * (2.0 * PI).ln() + 2.0 * DEFAULT_TINY.ln() + 2.0 * var_v.ln());
        assert_relative_eq!(nll, expected, epsilon = 1e-9);
    }

    #[test]
    fn test_innovation_velocity_change() {
        let m = model();
        let dt = 1.0;
        let still = m.innovation_nll([0.0, 0.0], [0.1, 0.0], [0.1, 0.0], [0.1, 0.0], dt);
        let turned = m.innovation_nll([0.0, 0.0], [0.1, 0.0], [0.1, 0.0], [0.1, 0.5], dt);
        // velocity innovation (0, 0.5) under variance 2 D dt = 1 and the
        // location innovation in y picks up -0.5 dt under variance tiny
        let expected_extra = 0.5 * 0.25 + 0.5 * 0.25 / DEFAULT_TINY;
        assert_relative_eq!(turned - still, expected_extra, max_relative = 1e-9);
    }

    #[test]
    fn test_non_positive_diffusion_is_non_finite() {
        let m = CorrelatedRandomWalk::new(-1.0_f64, [0.0; 4], DEFAULT_TINY);
        assert!(!m
            .innovation_nll([0.0, 0.0], [0.0, 0.0], [0.0, 0.0], [0.0, 0.0], 1.0)
            .is_finite());
    }
}
