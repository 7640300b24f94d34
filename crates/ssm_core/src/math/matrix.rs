//! Fixed-size symmetric covariance matrices with Cholesky decomposition.
//!
//! The kernel only ever needs 2×2 and 4×4 covariances, so matrices are
//! stack-allocated `[[T; N]; N]` arrays with the dimension as a const
//! generic.
//!
//! ## Mathematical Background
//!
//! For a symmetric positive-definite `Σ` the Cholesky factor is the lower
//! triangular `L` with positive diagonal such that:
//!
//! ```text
//! Σ = L * L^T
//! ```
//!
//! giving `ln|Σ| = 2 Σ ln L_ii` and `r^T Σ^{-1} r = ‖L^{-1} r‖²`.
//!
//! ## Non positive-definite input
//!
//! The factorisation does not check pivots. A non-positive pivot turns into
//! NaN (negative) or a zero diagonal (zero), and the non-finite value flows
//! into every quantity derived from the factor. Callers rely on this to
//! signal an infeasible parameter point.

use crate::traits::Scalar;

/// Symmetric `N × N` covariance matrix (row-major).
///
/// # Examples
/// ```
/// use ssm_core::math::matrix::CovarianceMatrix;
///
/// let cov = CovarianceMatrix::symmetric_2x2(4.0_f64, 9.0, 3.0);
/// assert_eq!(cov.get(0, 1), cov.get(1, 0));
/// assert_eq!(cov.get(1, 1), 9.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CovarianceMatrix<T: Scalar, const N: usize> {
    data: [[T; N]; N],
}

impl<T: Scalar, const N: usize> CovarianceMatrix<T, N> {
    /// All-zero matrix.
    pub fn zeros() -> Self {
        Self {
            data: [[T::zero(); N]; N],
        }
    }

    /// Diagonal matrix with the given variances.
    pub fn diagonal(variances: [T; N]) -> Self {
        let mut m = Self::zeros();
        for (i, v) in variances.into_iter().enumerate() {
            m.data[i][i] = v;
        }
        m
    }

    /// Build from explicit rows.
    ///
    /// Symmetry is not enforced; use [`is_symmetric`](Self::is_symmetric)
    /// when the rows come from outside the crate.
    pub fn from_rows(rows: [[T; N]; N]) -> Self {
        Self { data: rows }
    }

    /// Element at `(i, j)`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> T {
        self.data[i][j]
    }

    /// Set `(i, j)` and `(j, i)` together.
    #[inline]
    pub fn set_symmetric(&mut self, i: usize, j: usize, value: T) {
        self.data[i][j] = value;
        self.data[j][i] = value;
    }

    /// Row-major view of the elements.
    pub fn rows(&self) -> &[[T; N]; N] {
        &self.data
    }

    /// Multiply every element by `factor`.
    pub fn scaled(&self, factor: T) -> Self {
        Self {
            data: self.data.map(|row| row.map(|v| v * factor)),
        }
    }

    /// Exact element-wise symmetry check.
    pub fn is_symmetric(&self) -> bool {
        (0..N).all(|i| (i + 1..N).all(|j| self.data[i][j] == self.data[j][i]))
    }

    /// Cholesky factorisation `Σ = L L^T`.
    ///
    /// Never fails: see the module documentation for how a non
    /// positive-definite input shows up in the factor.
    pub fn cholesky(&self) -> CholeskyFactor<T, N> {
        let mut lower = [[T::zero(); N]; N];

        for i in 0..N {
            for j in 0..=i {
                let mut sum = self.data[i][j];
                for k in 0..j {
                    sum = sum - lower[i][k] * lower[j][k];
                }

                if i == j {
                    lower[i][i] = sum.sqrt();
                } else {
                    lower[i][j] = sum / lower[j][j];
                }
            }
        }

        CholeskyFactor { data: lower }
    }
}

impl<T: Scalar> CovarianceMatrix<T, 2> {
    /// 2×2 covariance from two variances and a covariance term.
    pub fn symmetric_2x2(var0: T, var1: T, cov01: T) -> Self {
        Self {
            data: [[var0, cov01], [cov01, var1]],
        }
    }
}

/// Lower triangular Cholesky factor of a [`CovarianceMatrix`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CholeskyFactor<T: Scalar, const N: usize> {
    data: [[T; N]; N],
}

impl<T: Scalar, const N: usize> CholeskyFactor<T, N> {
    /// Element at `(i, j)`; zero above the diagonal.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> T {
        if j > i {
            T::zero()
        } else {
            self.data[i][j]
        }
    }

    /// `ln|Σ| = 2 Σ ln L_ii`.
    pub fn log_determinant(&self) -> T {
        let two = T::one() + T::one();
        let mut acc = T::zero();
        for i in 0..N {
            acc = acc + self.data[i][i].ln();
        }
        two * acc
    }

    /// Solve `L y = b` by forward substitution.
    pub fn solve_lower(&self, b: &[T; N]) -> [T; N] {
        let mut y = [T::zero(); N];
        for i in 0..N {
            let mut sum = b[i];
            for j in 0..i {
                sum = sum - self.data[i][j] * y[j];
            }
            y[i] = sum / self.data[i][i];
        }
        y
    }

    /// Squared Mahalanobis norm `r^T Σ^{-1} r = ‖L^{-1} r‖²`.
    pub fn mahalanobis_squared(&self, r: &[T; N]) -> T {
        self.solve_lower(r)
            .into_iter()
            .fold(T::zero(), |acc, z| acc + z * z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_diagonal_construction() {
        let m = CovarianceMatrix::diagonal([1.0_f64, 2.0, 3.0, 4.0]);
        assert_eq!(m.get(2, 2), 3.0);
        assert_eq!(m.get(0, 3), 0.0);
        assert!(m.is_symmetric());
    }

    #[test]
    fn test_set_symmetric_writes_both_halves() {
        let mut m = CovarianceMatrix::<f64, 4>::zeros();
        m.set_symmetric(1, 3, 0.7);
        assert_eq!(m.get(1, 3), 0.7);
        assert_eq!(m.get(3, 1), 0.7);
        assert!(m.is_symmetric());
    }

    #[test]
    fn test_is_symmetric_detects_asymmetry() {
        let m = CovarianceMatrix::from_rows([[1.0_f64, 0.2], [0.3, 1.0]]);
        assert!(!m.is_symmetric());
    }

    #[test]
    fn test_scaled() {
        let m = CovarianceMatrix::symmetric_2x2(1.0_f64, 4.0, 0.5).scaled(2.0);
        assert_eq!(m.rows(), &[[2.0, 1.0], [1.0, 8.0]]);
    }

    #[test]
    fn test_cholesky_reconstructs_matrix() {
        let m = CovarianceMatrix::symmetric_2x2(4.0_f64, 10.0, 2.0);
        let l = m.cholesky();

        assert_relative_eq!(l.get(0, 0), 2.0, epsilon = 1e-12);
        assert_relative_eq!(l.get(1, 0), 1.0, epsilon = 1e-12);
        assert_relative_eq!(l.get(1, 1), 3.0, epsilon = 1e-12);
        assert_eq!(l.get(0, 1), 0.0);

        for i in 0..2 {
            for j in 0..2 {
                let mut v = 0.0;
                for k in 0..2 {
                    v += l.get(i, k) * l.get(j, k);
                }
                assert_relative_eq!(v, m.get(i, j), epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_log_determinant() {
        let m = CovarianceMatrix::symmetric_2x2(4.0_f64, 10.0, 2.0);
        // |Σ| = 40 - 4 = 36
        assert_relative_eq!(m.cholesky().log_determinant(), 36.0_f64.ln(), epsilon = 1e-12);
    }

    #[test]
    fn test_mahalanobis_identity() {
        let m = CovarianceMatrix::diagonal([1.0_f64, 1.0, 1.0, 1.0]);
        let d2 = m.cholesky().mahalanobis_squared(&[1.0, 2.0, 0.0, -2.0]);
        assert_relative_eq!(d2, 9.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mahalanobis_correlated() {
        // Σ = [[2, 1], [1, 2]], Σ^{-1} = (1/3) [[2, -1], [-1, 2]]
        let m = CovarianceMatrix::symmetric_2x2(2.0_f64, 2.0, 1.0);
        let d2 = m.cholesky().mahalanobis_squared(&[1.0, 1.0]);
        assert_relative_eq!(d2, 2.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_not_positive_definite_yields_non_finite() {
        // |ρ| > 1 makes the second pivot negative
        let m = CovarianceMatrix::symmetric_2x2(1.0_f64, 1.0, 1.5);
        let l = m.cholesky();
        assert!(!l.log_determinant().is_finite());
        assert!(!l.mahalanobis_squared(&[1.0, 0.5]).is_finite());
    }

    #[test]
    fn test_singular_yields_non_finite() {
        let m = CovarianceMatrix::diagonal([1.0_f64, 0.0]);
        assert!(!m.cholesky().log_determinant().is_finite());
    }
}
