//! Explicit accumulator for negative log-likelihood contributions.
//!
//! Every evaluation creates an empty accumulator, threads it through the
//! per-step contributions and consumes it with [`NllAccumulator::finish`].
//! Parallel evaluation gives each Rayon worker its own accumulator and
//! combines them with [`NllAccumulator::merge`]; there is no shared mutable
//! state.

use std::iter::Sum;
use std::ops::AddAssign;

use ssm_core::traits::Scalar;

/// Running NLL total.
///
/// # Examples
/// ```
/// use ssm_likelihood::accumulator::NllAccumulator;
///
/// let mut left = NllAccumulator::new();
/// left.add(1.5_f64);
/// let mut right = NllAccumulator::new();
/// right += 2.0;
/// assert_eq!(left.merge(right).finish(), 3.5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NllAccumulator<T: Scalar> {
    total: T,
    terms: usize,
}

impl<T: Scalar> NllAccumulator<T> {
    /// Empty accumulator (total zero).
    pub fn new() -> Self {
        Self {
            total: T::zero(),
            terms: 0,
        }
    }

    /// Add one contribution.
    #[inline]
    pub fn add(&mut self, contribution: T) {
        self.total = self.total + contribution;
        self.terms += 1;
    }

    /// Combine two partial sums.
    #[inline]
    pub fn merge(self, other: Self) -> Self {
        Self {
            total: self.total + other.total,
            terms: self.terms + other.terms,
        }
    }

    /// Number of contributions added so far.
    pub fn terms(&self) -> usize {
        self.terms
    }

    /// Consume the accumulator, returning the total.
    #[inline]
    pub fn finish(self) -> T {
        self.total
    }
}

impl<T: Scalar> Default for NllAccumulator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Scalar> AddAssign<T> for NllAccumulator<T> {
    #[inline]
    fn add_assign(&mut self, contribution: T) {
        self.add(contribution);
    }
}

impl<T: Scalar> Sum<T> for NllAccumulator<T> {
    fn sum<I: Iterator<Item = T>>(iter: I) -> Self {
        iter.fold(Self::new(), |mut acc, x| {
            acc.add(x);
            acc
        })
    }
}

impl<T: Scalar> Sum<NllAccumulator<T>> for NllAccumulator<T> {
    fn sum<I: Iterator<Item = NllAccumulator<T>>>(iter: I) -> Self {
        iter.fold(Self::new(), Self::merge)
    }
}

/// Finished process and observation totals of one evaluation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NllBreakdown<T: Scalar> {
    /// Anchor plus innovation terms
    pub process: T,
    /// Terms of all real observations
    pub observation: T,
}

impl<T: Scalar> NllBreakdown<T> {
    /// Total NLL.
    pub fn total(&self) -> T {
        self.process + self.observation
    }
}

/// Pair of accumulators keeping the process and observation sums apart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SplitAccumulator<T: Scalar> {
    process: NllAccumulator<T>,
    observation: NllAccumulator<T>,
}

impl<T: Scalar> SplitAccumulator<T> {
    /// Empty pair.
    pub fn new() -> Self {
        Self {
            process: NllAccumulator::new(),
            observation: NllAccumulator::new(),
        }
    }

    /// Add the two contributions of one time step.
    #[inline]
    pub fn add_step(&mut self, process: T, observation: T) {
        self.process.add(process);
        self.observation.add(observation);
    }

    /// Combine two partial pairs.
    #[inline]
    pub fn merge(self, other: Self) -> Self {
        Self {
            process: self.process.merge(other.process),
            observation: self.observation.merge(other.observation),
        }
    }

    /// Number of time steps added.
    pub fn steps(&self) -> usize {
        self.process.terms()
    }

    /// Consume into the finished totals.
    pub fn finish(self) -> NllBreakdown<T> {
        NllBreakdown {
            process: self.process.finish(),
            observation: self.observation.finish(),
        }
    }
}

impl<T: Scalar> Default for SplitAccumulator<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_split_accumulator() {
        let mut a = SplitAccumulator::new();
        a.add_step(1.0_f64, 0.0);
        a.add_step(2.0, 0.5);
        let mut b = SplitAccumulator::new();
        b.add_step(4.0, 0.25);

        let merged = a.merge(b);
        assert_eq!(merged.steps(), 3);
        let breakdown = merged.finish();
        assert_eq!(breakdown.process, 7.0);
        assert_eq!(breakdown.observation, 0.75);
        assert_eq!(breakdown.total(), 7.75);
    }

    #[test]
    fn test_empty_is_zero() {
        let acc = NllAccumulator::<f64>::default();
        assert_eq!(acc.terms(), 0);
        assert_eq!(acc.finish(), 0.0);
    }

    #[test]
    fn test_sum_of_values() {
        let acc: NllAccumulator<f64> = [1.0, 2.0, 3.5].into_iter().sum();
        assert_eq!(acc.terms(), 3);
        assert_eq!(acc.finish(), 6.5);
    }

    #[test]
    fn test_non_finite_propagates() {
        let mut acc = NllAccumulator::new();
        acc += 1.0_f64;
        acc += f64::NAN;
        acc += 2.0;
        assert!(acc.finish().is_nan());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_merge_matches_sequential(
            values in prop::collection::vec(-1e3f64..1e3, 0..200),
            split in 0usize..200,
        ) {
            let split = split.min(values.len());
            let sequential: NllAccumulator<f64> = values.iter().copied().sum();
            let left: NllAccumulator<f64> = values[..split].iter().copied().sum();
            let right: NllAccumulator<f64> = values[split..].iter().copied().sum();

            let merged = right.merge(left);
            prop_assert_eq!(merged.terms(), values.len());
            assert_relative_eq!(merged.finish(), sequential.finish(), epsilon = 1e-6);
        }
    }
}
