//! Latent trajectory representations.
//!
//! The latent states are parameters from the optimiser's point of view, so
//! they are generic over the scalar type. Each process model has its own
//! representation:
//!
//! - RandomWalk: one predicted location `X[i]` per step
//! - CorrelatedRandomWalk: a location `mu[i]` and a velocity `v[i]` per step

use ssm_core::traits::Scalar;
use ssm_core::types::ModelError;

use crate::data::ProcessModelKind;

/// Latent trajectory for one evaluation.
#[derive(Clone, Debug, PartialEq)]
pub enum Trajectory<T: Scalar> {
    /// Predicted locations of a random walk.
    RandomWalk {
        /// `(x, y)` per step
        locations: Vec<[T; 2]>,
    },
    /// Locations and velocities of a correlated random walk.
    CorrelatedRandomWalk {
        /// `(x, y)` per step
        locations: Vec<[T; 2]>,
        /// `(vx, vy)` per step
        velocities: Vec<[T; 2]>,
    },
}

impl<T: Scalar> Trajectory<T> {
    /// Random-walk trajectory.
    pub fn random_walk(locations: Vec<[T; 2]>) -> Self {
        Trajectory::RandomWalk { locations }
    }

    /// Correlated random-walk trajectory.
    pub fn correlated(locations: Vec<[T; 2]>, velocities: Vec<[T; 2]>) -> Self {
        Trajectory::CorrelatedRandomWalk {
            locations,
            velocities,
        }
    }

    /// Process model this representation belongs to.
    pub fn kind(&self) -> ProcessModelKind {
        match self {
            Trajectory::RandomWalk { .. } => ProcessModelKind::RandomWalk,
            Trajectory::CorrelatedRandomWalk { .. } => ProcessModelKind::CorrelatedRandomWalk,
        }
    }

    /// Number of steps (length of the location sequence).
    pub fn len(&self) -> usize {
        self.locations().len()
    }

    /// Whether there are no steps.
    pub fn is_empty(&self) -> bool {
        self.locations().is_empty()
    }

    /// Location sequence.
    pub fn locations(&self) -> &[[T; 2]] {
        match self {
            Trajectory::RandomWalk { locations } => locations,
            Trajectory::CorrelatedRandomWalk { locations, .. } => locations,
        }
    }

    /// Location at step `i`: the point an observation at `i` is compared with.
    #[inline]
    pub fn location(&self, i: usize) -> [T; 2] {
        self.locations()[i]
    }

    /// Velocity sequence, if this representation has one.
    pub fn velocities(&self) -> Option<&[[T; 2]]> {
        match self {
            Trajectory::RandomWalk { .. } => None,
            Trajectory::CorrelatedRandomWalk { velocities, .. } => Some(velocities),
        }
    }

    /// Check this trajectory against a process selector and a step count.
    ///
    /// # Errors
    /// - `ProcessModelMismatch` when the representation differs from `kind`
    /// - `DimensionMismatch` when a sequence is not `n_steps` long
    pub fn validate(&self, kind: ProcessModelKind, n_steps: usize) -> Result<(), ModelError> {
        if self.kind() != kind {
            return Err(ModelError::ProcessModelMismatch {
                data: kind.name(),
                trajectory: self.kind().name(),
            });
        }
        ModelError::check_len("locations", n_steps, self.len())?;
        if let Some(velocities) = self.velocities() {
            ModelError::check_len("velocities", n_steps, velocities.len())?;
        }
        Ok(())
    }
}
