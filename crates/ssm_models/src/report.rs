//! Natural-scale quantities marked for standard-error reporting.
//!
//! The kernel does not compute uncertainties. It only makes each derived
//! quantity an individually addressable output, under a stable name, so an
//! external reporting layer can push its own delta-method or Hessian-based
//! machinery through them.

use ssm_core::traits::Scalar;

use crate::params::NaturalParameters;

/// Names of the reported quantities, in reporting order.
pub const REPORTED_NAMES: [&str; 8] = [
    "rho_p", "sigma[0]", "sigma[1]", "D", "rho_o", "tau[0]", "tau[1]", "psi",
];

/// Derived quantities of one evaluation.
///
/// # Examples
/// ```
/// use ssm_models::params::RawParameters;
///
/// let report = RawParameters::<f64>::default().transform().report();
/// assert_eq!(report.get("D"), Some(1.0));
/// assert_eq!(report.get("unknown"), None);
/// assert_eq!(report.entries().len(), 8);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DerivedReport<T: Scalar> {
    values: [T; 8],
}

impl<T: Scalar> DerivedReport<T> {
    /// Collect the reported quantities from natural-scale parameters.
    pub fn from_natural(p: &NaturalParameters<T>) -> Self {
        Self {
            values: [
                p.rho_p,
                p.sigma[0],
                p.sigma[1],
                p.diffusion,
                p.rho_o,
                p.tau[0],
                p.tau[1],
                p.psi,
            ],
        }
    }

    /// Value by name.
    pub fn get(&self, name: &str) -> Option<T> {
        REPORTED_NAMES
            .iter()
            .position(|&n| n == name)
            .map(|i| self.values[i])
    }

    /// `(name, value)` pairs in reporting order.
    pub fn entries(&self) -> Vec<(&'static str, T)> {
        REPORTED_NAMES
            .iter()
            .copied()
            .zip(self.values.iter().copied())
            .collect()
    }

    /// Values in reporting order.
    pub fn values(&self) -> &[T; 8] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::RawParameters;

    #[test]
    fn test_every_name_is_addressable() {
        let natural = NaturalParameters {
            sigma: [1.0_f64, 2.0],
            rho_p: 0.1,
            diffusion: 0.5,
            psi: 3.0,
            tau: [4.0, 5.0],
            rho_o: -0.2,
        };
        let report = natural.report();
        assert_eq!(report.get("rho_p"), Some(0.1));
        assert_eq!(report.get("sigma[0]"), Some(1.0));
        assert_eq!(report.get("sigma[1]"), Some(2.0));
        assert_eq!(report.get("D"), Some(0.5));
        assert_eq!(report.get("rho_o"), Some(-0.2));
        assert_eq!(report.get("tau[0]"), Some(4.0));
        assert_eq!(report.get("tau[1]"), Some(5.0));
        assert_eq!(report.get("psi"), Some(3.0));
    }

    #[test]
    fn test_entries_order() {
        let report = RawParameters::<f64>::default().transform().report();
        let names: Vec<&str> = report.entries().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, REPORTED_NAMES.to_vec());
    }
}
