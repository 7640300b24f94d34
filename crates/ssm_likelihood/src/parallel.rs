//! Rayon-based reduction over time-step contributions.
//!
//! Given the parameters, the process and observation contributions of each
//! time step are independent, so they can be computed in any order and
//! combined through an associative reduction. Every Rayon work item folds
//! into its own [`SplitAccumulator`] and the partial accumulators are merged
//! pairwise.
//!
//! Floating-point addition is not associative, so the parallel total agrees
//! with the sequential one only up to rounding.

use rayon::prelude::*;
use ssm_core::traits::Scalar;

use crate::accumulator::SplitAccumulator;

/// Minimum steps per work item when none is configured.
pub const DEFAULT_MIN_CHUNK_LEN: usize = 64;

/// Folds `contribution(i)` for `i in 0..n_steps` on the current thread.
///
/// `contribution` returns the `(process, observation)` pair of one step.
pub fn accumulate_sequential<T, F>(n_steps: usize, contribution: F) -> SplitAccumulator<T>
where
    T: Scalar,
    F: Fn(usize) -> (T, T),
{
    (0..n_steps).fold(SplitAccumulator::new(), |mut acc, i| {
        let (process, observation) = contribution(i);
        acc.add_step(process, observation);
        acc
    })
}

/// Parallel fold/reduce of `contribution(i)` for `i in 0..n_steps`.
///
/// # Arguments
///
/// * `n_steps` - Number of time steps
/// * `min_chunk_len` - Minimum steps per Rayon work item (at least 1)
/// * `contribution` - Per-step `(process, observation)` pair
pub fn accumulate_parallel<T, F>(
    n_steps: usize,
    min_chunk_len: usize,
    contribution: F,
) -> SplitAccumulator<T>
where
    T: Scalar,
    F: Fn(usize) -> (T, T) + Sync + Send,
{
    (0..n_steps)
        .into_par_iter()
        .with_min_len(min_chunk_len.max(1))
        .fold(SplitAccumulator::new, |mut acc, i| {
            let (process, observation) = contribution(i);
            acc.add_step(process, observation);
            acc
        })
        .reduce(SplitAccumulator::new, SplitAccumulator::merge)
}
