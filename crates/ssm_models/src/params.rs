//! Model parameters on optimiser scale and natural scale.
//!
//! [`RawParameters`] is what the optimiser moves: unconstrained reals.
//! [`RawParameters::transform`] maps them to [`NaturalParameters`] with
//! `exp` for scales and a scaled logistic for correlations, so every natural
//! value satisfies its constraint for any finite input.
//!
//! Both process models' parameters are always present; the inactive model's
//! parameters simply do not enter the likelihood.

use ssm_core::math::transforms::{
    correlation, correlation_inverse, positive, positive_array, positive_inverse,
};
use ssm_core::traits::Scalar;

use crate::report::DerivedReport;

/// Unconstrained parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RawParameters<T: Scalar> {
    /// Log innovation standard deviations (RandomWalk)
    pub l_sigma: [T; 2],
    /// Link-scale innovation correlation (RandomWalk)
    pub l_rho_p: T,
    /// Log diffusion coefficient (CorrelatedRandomWalk)
    pub log_d: T,
    /// Log error-inflation scale (KalmanEllipse)
    pub l_psi: T,
    /// Log error dispersions (LeastSquares)
    pub l_tau: [T; 2],
    /// Link-scale error correlation (LeastSquares)
    pub l_rho_o: T,
}

impl<T: Scalar> Default for RawParameters<T> {
    /// All zeros: unit scales and zero correlations on natural scale.
    fn default() -> Self {
        Self {
            l_sigma: [T::zero(); 2],
            l_rho_p: T::zero(),
            log_d: T::zero(),
            l_psi: T::zero(),
            l_tau: [T::zero(); 2],
            l_rho_o: T::zero(),
        }
    }
}

impl<T: Scalar> RawParameters<T> {
    /// Map to natural scale.
    ///
    /// # Examples
    /// ```
    /// use ssm_models::params::RawParameters;
    ///
    /// let natural = RawParameters::<f64>::default().transform();
    /// assert_eq!(natural.sigma, [1.0, 1.0]);
    /// assert_eq!(natural.rho_p, 0.0);
    /// ```
    pub fn transform(&self) -> NaturalParameters<T> {
        NaturalParameters {
            sigma: positive_array(self.l_sigma),
            rho_p: correlation(self.l_rho_p),
            diffusion: positive(self.log_d),
            psi: positive(self.l_psi),
            tau: positive_array(self.l_tau),
            rho_o: correlation(self.l_rho_o),
        }
    }

    /// Inverse of [`transform`](Self::transform).
    ///
    /// Scales must be strictly positive and correlations strictly inside
    /// (−1, 1); other values produce non-finite raw parameters.
    pub fn from_natural(natural: &NaturalParameters<T>) -> Self {
        Self {
            l_sigma: natural.sigma.map(positive_inverse),
            l_rho_p: correlation_inverse(natural.rho_p),
            log_d: positive_inverse(natural.diffusion),
            l_psi: positive_inverse(natural.psi),
            l_tau: natural.tau.map(positive_inverse),
            l_rho_o: correlation_inverse(natural.rho_o),
        }
    }
}

/// Natural-scale parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NaturalParameters<T: Scalar> {
    /// Innovation standard deviations `(σ0, σ1)`
    pub sigma: [T; 2],
    /// Innovation correlation `ρp`
    pub rho_p: T,
    /// Diffusion coefficient `D`
    pub diffusion: T,
    /// Error-inflation scale `ψ`
    pub psi: T,
    /// Error dispersions `(τ0, τ1)`
    pub tau: [T; 2],
    /// Error correlation `ρo`
    pub rho_o: T,
}

impl<T: Scalar> NaturalParameters<T> {
    /// Quantities exposed to the reporting layer.
    pub fn report(&self) -> DerivedReport<T> {
        DerivedReport::from_natural(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_transform() {
        let n = RawParameters::<f64>::default().transform();
        assert_eq!(n.sigma, [1.0, 1.0]);
        assert_eq!(n.tau, [1.0, 1.0]);
        assert_eq!(n.diffusion, 1.0);
        assert_eq!(n.psi, 1.0);
        assert_eq!(n.rho_p, 0.0);
        assert_eq!(n.rho_o, 0.0);
    }

    #[test]
    fn test_transform_known_values() {
        let raw = RawParameters {
            l_sigma: [2.0_f64.ln(), 0.5_f64.ln()],
            l_rho_p: correlation_inverse(0.3),
            log_d: 0.1_f64.ln(),
            l_psi: 3.0_f64.ln(),
            l_tau: [1.5_f64.ln(), 4.0_f64.ln()],
            l_rho_o: correlation_inverse(-0.6),
        };
        let n = raw.transform();
        assert_relative_eq!(n.sigma[0], 2.0, epsilon = 1e-12);
        assert_relative_eq!(n.sigma[1], 0.5, epsilon = 1e-12);
        assert_relative_eq!(n.rho_p, 0.3, epsilon = 1e-12);
        assert_relative_eq!(n.diffusion, 0.1, epsilon = 1e-12);
        assert_relative_eq!(n.psi, 3.0, epsilon = 1e-12);
        assert_relative_eq!(n.tau[1], 4.0, epsilon = 1e-12);
        assert_relative_eq!(n.rho_o, -0.6, epsilon = 1e-12);
    }

    #[test]
    fn test_from_natural_round_trip() {
        let raw = RawParameters {
            l_sigma: [0.3_f64, -1.2],
            l_rho_p: 0.8,
            log_d: -2.0,
            l_psi: 0.4,
            l_tau: [1.1, -0.7],
            l_rho_o: -1.9,
        };
        let back = RawParameters::from_natural(&raw.transform());
        assert_relative_eq!(back.l_sigma[1], raw.l_sigma[1], epsilon = 1e-12);
        assert_relative_eq!(back.l_rho_p, raw.l_rho_p, epsilon = 1e-12);
        assert_relative_eq!(back.log_d, raw.log_d, epsilon = 1e-12);
        assert_relative_eq!(back.l_tau[0], raw.l_tau[0], epsilon = 1e-12);
        assert_relative_eq!(back.l_rho_o, raw.l_rho_o, epsilon = 1e-12);
    }

    #[test]
    fn test_extreme_raw_values_stay_in_domain() {
        let raw = RawParameters {
            l_sigma: [-40.0_f64, 40.0],
            l_rho_p: 30.0,
            log_d: -40.0,
            l_psi: 40.0,
            l_tau: [-40.0, 40.0],
            l_rho_o: -30.0,
        };
        let n = raw.transform();
        assert!(n.sigma.iter().all(|&s| s > 0.0));
        assert!(n.diffusion > 0.0);
        assert!(n.rho_p < 1.0 && n.rho_o > -1.0);
    }
}
