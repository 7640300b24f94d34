//! Scalar abstraction shared by every layer.
//!
//! The likelihood kernel is written once against [`Scalar`] and compiled
//! against `f64` for closed-form checks and against `num_dual::Dual64` when
//! a driver needs derivatives. All model code uses static dispatch over
//! closed enums; no `Box<dyn Trait>` appears on the evaluation path.
//!
//! `num_traits::Float` is not usable as the bound: dual numbers do not
//! implement it. [`Scalar`] is built on `num_dual::DualNum<f64>` instead,
//! which `f64` and every first-order dual type satisfy.

use num_dual::DualNum;

/// Generic scalar for the likelihood kernel.
///
/// Every operation the kernel needs (arithmetic, `exp`, `ln`, `sqrt`,
/// `sin_cos`, `powi`, conversion from `f64`) comes from `DualNum<f64>`, so
/// any implementing scalar carries derivatives straight through the
/// evaluator. `Copy + Send + Sync` lets the Rayon path share parameters
/// across workers.
///
/// Finiteness is judged on the real part ([`DualNum::re`]).
///
/// # Examples
/// ```
/// use ssm_core::traits::Scalar;
///
/// fn scaled_variance<T: Scalar>(sd: T, dt: T) -> T {
///     sd * sd * dt * dt
/// }
///
/// assert_eq!(scaled_variance(2.0_f64, 0.5), 1.0);
/// ```
pub trait Scalar: DualNum<f64> + Copy + Send + Sync {
    /// Not-a-number in this scalar type.
    #[inline]
    fn nan() -> Self {
        Self::from(f64::NAN)
    }

    /// Real part as a plain `f64`, for logging and feasibility checks.
    #[inline]
    fn value(&self) -> f64 {
        self.re()
    }

    /// Whether the real part is finite.
    #[inline]
    fn is_finite(&self) -> bool {
        self.re().is_finite()
    }

    /// Whether the real part is NaN.
    #[inline]
    fn is_nan(&self) -> bool {
        self.re().is_nan()
    }
}

impl<T> Scalar for T where T: DualNum<f64> + Copy + Send + Sync {}

/// Convert a data constant into the scalar type.
///
/// Telemetry data is `f64`; parameters and latent states are `T`. Data
/// enters the computation through this conversion with a zero derivative
/// part.
///
/// # Examples
/// ```
/// use ssm_core::traits::lift;
/// use num_dual::Dual64;
///
/// let x: Dual64 = lift(0.25);
/// assert_eq!(x.re, 0.25);
/// assert_eq!(x.eps, 0.0);
/// ```
#[inline]
pub fn lift<T: Scalar>(value: f64) -> T {
    T::from(value)
}
