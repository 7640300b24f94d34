//! Parameter transforms between optimiser scale and natural scale.
//!
//! The external optimiser works on unconstrained real values. Model code
//! needs strictly positive scales and correlations strictly inside (−1, 1).
//! Both constraints are enforced by smooth bijections, never by clamping, so
//! derivatives exist everywhere.
//!
//! | Quantity | Forward | Inverse |
//! |----------|---------|---------|
//! | scale (sd, dispersion, diffusion, inflation) | `exp(x)` | `ln(y)` |
//! | correlation | `2 / (1 + exp(-x)) - 1` | `ln((1 + r) / (1 - r))` |

use crate::traits::Scalar;

/// Map an unconstrained value to a strictly positive scale.
///
/// # Examples
/// ```
/// use ssm_core::math::transforms::positive;
///
/// assert_eq!(positive(0.0_f64), 1.0);
/// assert!(positive(-50.0_f64) > 0.0);
/// ```
#[inline]
pub fn positive<T: Scalar>(x: T) -> T {
    x.exp()
}

/// Inverse of [`positive`].
#[inline]
pub fn positive_inverse<T: Scalar>(y: T) -> T {
    y.ln()
}

/// Element-wise [`positive`] for vector-valued scale parameters.
#[inline]
pub fn positive_array<T: Scalar, const N: usize>(xs: [T; N]) -> [T; N] {
    xs.map(positive)
}

/// Map an unconstrained value to a correlation in (−1, 1).
///
/// This is a scaled logistic: monotonic, odd, and `0 → 0`.
///
/// # Examples
/// ```
/// use ssm_core::math::transforms::correlation;
///
/// assert_eq!(correlation(0.0_f64), 0.0);
/// assert!(correlation(5.0_f64) < 1.0);
/// assert!(correlation(-5.0_f64) > -1.0);
/// ```
#[inline]
pub fn correlation<T: Scalar>(x: T) -> T {
    let one = T::one();
    let two = one + one;
    two / (one + (-x).exp()) - one
}

/// Inverse of [`correlation`].
///
/// # Examples
/// ```
/// use ssm_core::math::transforms::{correlation, correlation_inverse};
///
/// let x = correlation_inverse(0.3_f64);
/// assert!((correlation(x) - 0.3).abs() < 1e-12);
/// ```
#[inline]
pub fn correlation_inverse<T: Scalar>(r: T) -> T {
    let one = T::one();
    ((one + r) / (one - r)).ln()
}
