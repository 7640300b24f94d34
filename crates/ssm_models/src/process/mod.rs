//! Process models for the latent trajectory.
//!
//! This module provides:
//! - [`RandomWalk`]: time-scaled correlated Gaussian steps in location
//! - [`CorrelatedRandomWalk`]: velocity diffusion with integrated location
//! - [`ProcessModel`]: static dispatch enum over the two
//!
//! ## Per-step contributions
//!
//! The process NLL is a sum of independent per-step terms given the
//! parameters: step 0 contributes the anchor term (zero for a random walk),
//! and every step `i >= 1` contributes the innovation from `i-1` to `i`.
//! [`ProcessModel::step_nll`] exposes one term so that callers can reduce
//! them in any order.

pub mod correlated_random_walk;
pub mod random_walk;

pub use correlated_random_walk::{CorrelatedRandomWalk, DEFAULT_TINY};
pub use random_walk::RandomWalk;

use ssm_core::traits::{lift, Scalar};

use crate::data::{ProcessModelKind, TelemetryData};
use crate::params::NaturalParameters;
use crate::trajectory::Trajectory;

/// Static dispatch enum for process models.
///
/// # Example
///
/// ```
/// use ssm_models::data::ProcessModelKind;
/// use ssm_models::params::RawParameters;
/// use ssm_models::process::ProcessModel;
///
/// let natural = RawParameters::<f64>::default().transform();
/// let model = ProcessModel::new(ProcessModelKind::CorrelatedRandomWalk, &natural, [0.0; 4], 1e-5);
/// assert_eq!(model.kind(), ProcessModelKind::CorrelatedRandomWalk);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ProcessModel<T: Scalar> {
    /// Random walk on locations
    RandomWalk(RandomWalk<T>),
    /// Correlated random walk on locations and velocities
    CorrelatedRandomWalk(CorrelatedRandomWalk<T>),
}

impl<T: Scalar> ProcessModel<T> {
    /// Build the selected model from natural-scale parameters.
    ///
    /// `initial_state` and `tiny` are only used by the correlated random walk.
    pub fn new(
        kind: ProcessModelKind,
        params: &NaturalParameters<T>,
        initial_state: [f64; 4],
        tiny: f64,
    ) -> Self {
        match kind {
            ProcessModelKind::RandomWalk => {
                ProcessModel::RandomWalk(RandomWalk::new(params.sigma, params.rho_p))
            }
            ProcessModelKind::CorrelatedRandomWalk => ProcessModel::CorrelatedRandomWalk(
                CorrelatedRandomWalk::new(params.diffusion, initial_state, tiny),
            ),
        }
    }

    /// Which variant this is.
    pub fn kind(&self) -> ProcessModelKind {
        match self {
            ProcessModel::RandomWalk(_) => ProcessModelKind::RandomWalk,
            ProcessModel::CorrelatedRandomWalk(_) => ProcessModelKind::CorrelatedRandomWalk,
        }
    }

    /// Model name.
    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Location an observation at step `i` is compared against.
    #[inline]
    pub fn predicted_location(&self, trajectory: &Trajectory<T>, i: usize) -> [T; 2] {
        trajectory.location(i)
    }

    /// Anchor term of step 0.
    pub fn anchor_nll(&self, trajectory: &Trajectory<T>) -> T {
        match (self, trajectory) {
            (ProcessModel::RandomWalk(_), Trajectory::RandomWalk { .. }) => T::zero(),
            (
                ProcessModel::CorrelatedRandomWalk(m),
                Trajectory::CorrelatedRandomWalk {
                    locations,
                    velocities,
                },
            ) => m.anchor_nll(locations[0], velocities[0]),
            _ => T::nan(),
        }
    }

    /// Innovation term for the transition into step `i`.
    ///
    /// Reads step `i - 1`, so `i` must be at least 1; [`step_nll`](Self::step_nll)
    /// routes step 0 to the anchor instead.
    pub(crate) fn innovation_nll(&self, trajectory: &Trajectory<T>, i: usize, dt: f64) -> T {
        let dt: T = lift(dt);
        match (self, trajectory) {
            (ProcessModel::RandomWalk(m), Trajectory::RandomWalk { locations }) => {
                m.innovation_nll(locations[i - 1], locations[i], dt)
            }
            (
                ProcessModel::CorrelatedRandomWalk(m),
                Trajectory::CorrelatedRandomWalk {
                    locations,
                    velocities,
                },
            ) => m.innovation_nll(
                locations[i - 1],
                locations[i],
                velocities[i - 1],
                velocities[i],
                dt,
            ),
            _ => T::nan(),
        }
    }

    /// Process contribution of step `i`: the anchor at 0, the innovation otherwise.
    ///
    /// A trajectory of the other variant yields NaN; evaluators reject that
    /// case beforehand with `Trajectory::validate`.
    pub fn step_nll(&self, trajectory: &Trajectory<T>, data: &TelemetryData, i: usize) -> T {
        if i == 0 {
            self.anchor_nll(trajectory)
        } else {
            self.innovation_nll(trajectory, i, data.dt(i))
        }
    }

    /// Sequential sum of [`step_nll`](Self::step_nll) over all steps.
    pub fn total_nll(&self, trajectory: &Trajectory<T>, data: &TelemetryData) -> T {
        (0..data.len()).fold(T::zero(), |acc, i| acc + self.step_nll(trajectory, data, i))
    }
}
