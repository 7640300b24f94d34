//! Kalman-filter error-ellipse observation model.
//!
//! A fix reports an error ellipse (semi-minor `m`, semi-major `M`,
//! orientation `c`). The ellipse is turned into a 2×2 covariance in the
//! observation frame, with the semi-minor axis inflated by a global `ψ`:
//!
//! ```text
//! s2c = sin²c,  c2c = cos²c
//! M2  = (M/√2)²,  m2 = (m ψ/√2)²
//! Σ   = [[M2 s2c + m2 c2c,             0.5 (M² − (m ψ)²) cos c sin c],
//!        [0.5 (M² − (m ψ)²) cos c sin c, M2 c2c + m2 s2c            ]]
//! ```
//!
//! The eigenvalues of `Σ` are `M2` and `m2`, so `|Σ| = M2 m2`.

use std::f64::consts::SQRT_2;

use ssm_core::math::matrix::CovarianceMatrix;
use ssm_core::traits::{lift, Scalar};

use crate::data::EllipseDescriptor;

/// Global error-ellipse parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KalmanEllipse<T: Scalar> {
    /// Error-inflation scale `ψ` applied to the semi-minor axis
    pub psi: T,
}

impl<T: Scalar> KalmanEllipse<T> {
    /// Create from the natural-scale inflation.
    pub fn new(psi: T) -> Self {
        Self { psi }
    }

    /// Error covariance of a fix reporting `ellipse`.
    pub fn covariance(&self, ellipse: &EllipseDescriptor) -> CovarianceMatrix<T, 2> {
        let half: T = lift(0.5);
        let sqrt2: T = lift(SQRT_2);
        let semi_major: T = lift(ellipse.semi_major);
        let inflated_minor = lift::<T>(ellipse.semi_minor) * self.psi;
        let (sin_c, cos_c) = lift::<T>(ellipse.orientation).sin_cos();

        let s2c = sin_c * sin_c;
        let c2c = cos_c * cos_c;
        let major_var = (semi_major / sqrt2).powi(2);
        let minor_var = (inflated_minor / sqrt2).powi(2);

        CovarianceMatrix::symmetric_2x2(
            major_var * s2c + minor_var * c2c,
            major_var * c2c + minor_var * s2c,
            half * (semi_major * semi_major - inflated_minor * inflated_minor) * cos_c * sin_c,
        )
    }
}
