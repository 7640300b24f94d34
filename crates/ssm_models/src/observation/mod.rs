//! Observation-error models.
//!
//! Every fix chooses its own error model through its [`ErrorDescriptor`]:
//! - [`LeastSquares`]: per-fix weights times global dispersions
//! - [`KalmanEllipse`]: reported error ellipse inflated by a global scale
//!
//! [`ObservationModel`] holds the global parameters of both and dispatches on
//! the descriptor variant. The residual is always
//! `observed − predicted_location`.

pub mod kalman_ellipse;
pub mod least_squares;

pub use kalman_ellipse::KalmanEllipse;
pub use least_squares::LeastSquares;

use ssm_core::math::gaussian::mvn_nll;
use ssm_core::math::matrix::CovarianceMatrix;
use ssm_core::traits::{lift, Scalar};

use crate::data::{ErrorDescriptor, Fix, TimeStep};
use crate::params::NaturalParameters;

/// Global observation-error parameters of both variants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObservationModel<T: Scalar> {
    /// Least-squares dispersions and correlation
    pub least_squares: LeastSquares<T>,
    /// Error-ellipse inflation
    pub kalman: KalmanEllipse<T>,
}

impl<T: Scalar> ObservationModel<T> {
    /// Build from natural-scale parameters.
    pub fn new(params: &NaturalParameters<T>) -> Self {
        Self {
            least_squares: LeastSquares::new(params.tau, params.rho_o),
            kalman: KalmanEllipse::new(params.psi),
        }
    }

    /// Error covariance for one fix descriptor.
    pub fn covariance(&self, descriptor: &ErrorDescriptor) -> CovarianceMatrix<T, 2> {
        match descriptor {
            ErrorDescriptor::LeastSquares { weights } => self.least_squares.covariance(*weights),
            ErrorDescriptor::KalmanEllipse(ellipse) => self.kalman.covariance(ellipse),
        }
    }

    /// NLL of `fix` given the predicted location.
    ///
    /// # Examples
    /// ```
    /// use ssm_models::data::{ErrorDescriptor, Fix};
    /// use ssm_models::observation::ObservationModel;
    /// use ssm_models::params::RawParameters;
    ///
    /// let obs = ObservationModel::new(&RawParameters::<f64>::default().transform());
    /// let fix = Fix {
    ///     position: [1.0, 0.0],
    ///     error: ErrorDescriptor::LeastSquares { weights: [1.0, 1.0] },
    /// };
    /// let expected = (2.0 * std::f64::consts::PI).ln() + 0.5;
    /// assert!((obs.fix_nll(&fix, [0.0, 0.0]) - expected).abs() < 1e-12);
    /// ```
    pub fn fix_nll(&self, fix: &Fix, predicted: [T; 2]) -> T {
        let residual = [
            lift::<T>(fix.position[0]) - predicted[0],
            lift::<T>(fix.position[1]) - predicted[1],
        ];
        mvn_nll(&self.covariance(&fix.error), &residual)
    }

    /// Observation contribution of one time step: zero without a fix.
    #[inline]
    pub fn step_nll(&self, step: &TimeStep, predicted: [T; 2]) -> T {
        match &step.fix {
            Some(fix) => self.fix_nll(fix, predicted),
            None => T::zero(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{EllipseDescriptor, TelemetryDataBuilder};
    use crate::params::RawParameters;
    use approx::assert_relative_eq;
    use ssm_core::math::gaussian::univariate_nll;

    fn model() -> ObservationModel<f64> {
        let mut natural = RawParameters::<f64>::default().transform();
        natural.tau = [2.0, 0.5];
        natural.psi = 1.5;
        ObservationModel::new(&natural)
    }

    #[test]
    fn test_dispatch_on_descriptor() {
        let obs = model();
        let ls = obs.covariance(&ErrorDescriptor::LeastSquares { weights: [1.0, 1.0] });
        assert_eq!(ls.get(0, 0), 4.0);
        assert_eq!(ls.get(1, 1), 0.25);

        let ellipse = EllipseDescriptor {
            semi_minor: 2.0,
            semi_major: 4.0,
            orientation: 0.0,
        };
        let kf = obs.covariance(&ErrorDescriptor::KalmanEllipse(ellipse));
        assert_relative_eq!(kf.get(0, 0), 4.5, epsilon = 1e-12);
        assert_relative_eq!(kf.get(1, 1), 8.0, epsilon = 1e-12);
    }

    #[test]
    fn test_uncorrelated_least_squares_residual() {
        let obs = model();
        let fix = Fix {
            position: [3.0, -1.0],
            error: ErrorDescriptor::LeastSquares { weights: [1.5, 4.0] },
        };
        let predicted = [2.0, 0.5];
        let expected = univariate_nll(3.0, 2.0, 2.0 * 1.5) + univariate_nll(-1.0, 0.5, 0.5 * 4.0);
        assert_relative_eq!(obs.fix_nll(&fix, predicted), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_interpolation_step_contributes_exactly_zero() {
        // descriptor values at unflagged steps are ignored entirely,
        // including ones that would give a degenerate covariance
        let data = TelemetryDataBuilder::new()
            .positions(vec![[f64::NAN, 1e9], [0.0, 0.0]])
            .time_deltas(vec![1.0, 1.0])
            .observation_flags(vec![0, 0])
            .observation_models(vec![0, 1])
            .least_squares_weights(vec![[0.0, -1.0], [0.0, 0.0]])
            .ellipses(vec![0.0; 2], vec![-1.0; 2], vec![f64::NAN; 2])
            .build()
            .unwrap();

        let obs = model();
        for step in data.steps() {
            assert_eq!(obs.step_nll(step, [123.0, -456.0]), 0.0);
        }
    }

    #[test]
    fn test_observed_step_uses_fix() {
        let obs = model();
        let fix = Fix {
            position: [0.0, 0.0],
            error: ErrorDescriptor::LeastSquares { weights: [1.0, 1.0] },
        };
        let step = TimeStep::observed(1.0, fix);
        assert_eq!(obs.step_nll(&step, [0.1, 0.2]), obs.fix_nll(&fix, [0.1, 0.2]));
    }
}
