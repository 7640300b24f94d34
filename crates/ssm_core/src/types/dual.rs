//! Dual number type integration for automatic differentiation.
//!
//! The likelihood kernel is generic over `T: Scalar`. Evaluating it with
//! [`DualNumber`] instead of `f64` yields the directional derivative of the
//! negative log-likelihood alongside its value, which is how the kernel is
//! checked against finite differences.
//!
//! ## Usage
//!
//! ```
//! use ssm_core::math::transforms::positive;
//! use ssm_core::types::dual::DualNumber;
//!
//! // d/dx exp(x) at x = 0 is 1
//! let x = DualNumber::new(0.0, 1.0);
//! let y = positive(x);
//! assert!((y.re - 1.0).abs() < 1e-12);
//! assert!((y.eps - 1.0).abs() < 1e-12);
//! ```

/// Type alias for num-dual's Dual64 (f64-based dual numbers).
///
/// - `re`: Real part (function value)
/// - `eps`: Dual part (derivative along the seeded direction)
pub type DualNumber = num_dual::Dual64;

/// Seed a dual number: value `re` with unit derivative.
#[inline]
pub fn seeded(re: f64) -> DualNumber {
    DualNumber::new(re, 1.0)
}

/// Lift a plain value into a dual number with zero derivative.
#[inline]
pub fn constant(re: f64) -> DualNumber {
    DualNumber::new(re, 0.0)
}
