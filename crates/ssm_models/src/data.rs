//! Telemetry inputs for one likelihood evaluation.
//!
//! The data-preparation layer hands over column-oriented vectors: positions,
//! time deltas, observation flags, integer model selectors and the
//! observation-error descriptors. [`TelemetryDataBuilder`] checks all of them
//! up front and produces a [`TelemetryData`] in which every time step is
//! either an interpolation step (no fix) or carries exactly one typed fix.
//!
//! ## Selector codes
//!
//! | Selector | 0 | 1 |
//! |----------|---|---|
//! | process model | RandomWalk | CorrelatedRandomWalk |
//! | observation model | LeastSquares | KalmanEllipse |
//!
//! Any other code is rejected with `ModelError::UnsupportedModelSelector`.

use ssm_core::types::error::SelectorSite;
use ssm_core::types::ModelError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Process model for the whole trajectory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ProcessModelKind {
    /// Uncorrelated, time-scaled Gaussian steps in location.
    RandomWalk,
    /// Velocity follows a diffusion; location integrates velocity.
    CorrelatedRandomWalk,
}

impl ProcessModelKind {
    /// Parse a process-model selector code.
    ///
    /// # Examples
    /// ```
    /// use ssm_models::data::ProcessModelKind;
    ///
    /// assert_eq!(ProcessModelKind::from_code(1).unwrap(), ProcessModelKind::CorrelatedRandomWalk);
    /// assert!(ProcessModelKind::from_code(2).is_err());
    /// ```
    pub fn from_code(code: i32) -> Result<Self, ModelError> {
        match code {
            0 => Ok(ProcessModelKind::RandomWalk),
            1 => Ok(ProcessModelKind::CorrelatedRandomWalk),
            other => Err(ModelError::UnsupportedModelSelector {
                site: SelectorSite::Process,
                selector: other,
            }),
        }
    }

    /// Selector code of this variant.
    pub fn code(&self) -> i32 {
        match self {
            ProcessModelKind::RandomWalk => 0,
            ProcessModelKind::CorrelatedRandomWalk => 1,
        }
    }

    /// Model name.
    pub fn name(&self) -> &'static str {
        match self {
            ProcessModelKind::RandomWalk => "RandomWalk",
            ProcessModelKind::CorrelatedRandomWalk => "CorrelatedRandomWalk",
        }
    }
}

impl TryFrom<i32> for ProcessModelKind {
    type Error = ModelError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

/// Observation-error model of a single fix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ObservationModelKind {
    /// Per-fix weighting factors scaled by global dispersions.
    LeastSquares,
    /// Reported error ellipse inflated by a global scale.
    KalmanEllipse,
}

impl ObservationModelKind {
    /// Parse the observation-model selector of time step `step`.
    pub fn from_code(code: i32, step: usize) -> Result<Self, ModelError> {
        match code {
            0 => Ok(ObservationModelKind::LeastSquares),
            1 => Ok(ObservationModelKind::KalmanEllipse),
            other => Err(ModelError::UnsupportedModelSelector {
                site: SelectorSite::Observation { step },
                selector: other,
            }),
        }
    }

    /// Selector code of this variant.
    pub fn code(&self) -> i32 {
        match self {
            ObservationModelKind::LeastSquares => 0,
            ObservationModelKind::KalmanEllipse => 1,
        }
    }
}

/// Error ellipse reported with a fix.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EllipseDescriptor {
    /// Semi-minor axis length `m`
    pub semi_minor: f64,
    /// Semi-major axis length `M`
    pub semi_major: f64,
    /// Ellipse orientation `c` (radians)
    pub orientation: f64,
}

/// Observation-error descriptor of one fix.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ErrorDescriptor {
    /// Least-squares weighting factors `(k0, k1)`.
    LeastSquares {
        /// Weighting factor per coordinate
        weights: [f64; 2],
    },
    /// Kalman-filter error ellipse.
    KalmanEllipse(EllipseDescriptor),
}

impl ErrorDescriptor {
    /// Observation model this descriptor belongs to.
    pub fn kind(&self) -> ObservationModelKind {
        match self {
            ErrorDescriptor::LeastSquares { .. } => ObservationModelKind::LeastSquares,
            ErrorDescriptor::KalmanEllipse(_) => ObservationModelKind::KalmanEllipse,
        }
    }
}

/// A measured position with its error descriptor.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Fix {
    /// Observed `(x, y)` position
    pub position: [f64; 2],
    /// Observation-error descriptor
    pub error: ErrorDescriptor,
}

/// One time step of the trajectory.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeStep {
    /// Elapsed time used to scale the process covariance at this step
    pub dt: f64,
    /// The fix, or `None` for an interpolation-only step
    pub fix: Option<Fix>,
}

impl TimeStep {
    /// Interpolation-only step.
    pub fn interpolation(dt: f64) -> Self {
        Self { dt, fix: None }
    }

    /// Step with a real observation.
    pub fn observed(dt: f64, fix: Fix) -> Self {
        Self { dt, fix: Some(fix) }
    }

    /// Whether this step carries a real observation.
    pub fn is_observed(&self) -> bool {
        self.fix.is_some()
    }
}

/// Validated telemetry inputs.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TelemetryData {
    steps: Vec<TimeStep>,
    initial_state: [f64; 4],
    process_model: ProcessModelKind,
}

impl TelemetryData {
    /// Assemble from typed steps.
    ///
    /// # Errors
    /// `ModelError::EmptyTrajectory` when `steps` is empty.
    pub fn new(
        steps: Vec<TimeStep>,
        initial_state: [f64; 4],
        process_model: ProcessModelKind,
    ) -> Result<Self, ModelError> {
        if steps.is_empty() {
            return Err(ModelError::EmptyTrajectory);
        }
        Ok(Self {
            steps,
            initial_state,
            process_model,
        })
    }

    /// Number of time steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false for validated data.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// All time steps.
    pub fn steps(&self) -> &[TimeStep] {
        &self.steps
    }

    /// Time step `i`.
    #[inline]
    pub fn step(&self, i: usize) -> &TimeStep {
        &self.steps[i]
    }

    /// Time delta of step `i`.
    #[inline]
    pub fn dt(&self, i: usize) -> f64 {
        self.steps[i].dt
    }

    /// Initial `(x, y, vx, vy)` state anchoring a correlated random walk.
    pub fn initial_state(&self) -> [f64; 4] {
        self.initial_state
    }

    /// Process model selected for the trajectory.
    pub fn process_model(&self) -> ProcessModelKind {
        self.process_model
    }

    /// Number of steps with a real observation.
    pub fn n_observations(&self) -> usize {
        self.steps.iter().filter(|s| s.is_observed()).count()
    }
}

/// Builder for [`TelemetryData`] from column-oriented inputs.
///
/// Descriptor columns are only required for the observation models that
/// observed steps actually select: data with only Kalman-ellipse fixes may
/// omit the least-squares weights and vice versa. Descriptor values at
/// interpolation-only steps are accepted and ignored.
///
/// # Example
///
/// ```
/// use ssm_models::data::TelemetryDataBuilder;
///
/// let data = TelemetryDataBuilder::new()
///     .positions(vec![[0.0, 0.0], [0.5, 0.2]])
///     .time_deltas(vec![1.0, 0.5])
///     .observation_flags(vec![1, 0])
///     .observation_models(vec![1, 1])
///     .ellipses(vec![100.0, 100.0], vec![500.0, 500.0], vec![0.3, 0.3])
///     .process_model(1)
///     .initial_state([0.0, 0.0, 0.0, 0.0])
///     .build()
///     .unwrap();
///
/// assert_eq!(data.len(), 2);
/// assert_eq!(data.n_observations(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct TelemetryDataBuilder {
    positions: Vec<[f64; 2]>,
    dt: Vec<f64>,
    flags: Vec<i32>,
    observation_models: Vec<i32>,
    process_model: i32,
    ls_weights: Vec<[f64; 2]>,
    semi_minor: Vec<f64>,
    semi_major: Vec<f64>,
    orientation: Vec<f64>,
    initial_state: [f64; 4],
}

impl TelemetryDataBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Observed positions, one row per time step.
    pub fn positions(mut self, positions: Vec<[f64; 2]>) -> Self {
        self.positions = positions;
        self
    }

    /// Time deltas, one per time step.
    pub fn time_deltas(mut self, dt: Vec<f64>) -> Self {
        self.dt = dt;
        self
    }

    /// Observation flags: 1 for a real fix, 0 for interpolation only.
    pub fn observation_flags(mut self, flags: Vec<i32>) -> Self {
        self.flags = flags;
        self
    }

    /// Per-step observation-model selector codes.
    pub fn observation_models(mut self, codes: Vec<i32>) -> Self {
        self.observation_models = codes;
        self
    }

    /// Process-model selector code.
    pub fn process_model(mut self, code: i32) -> Self {
        self.process_model = code;
        self
    }

    /// Least-squares weighting factors, one row per time step.
    pub fn least_squares_weights(mut self, weights: Vec<[f64; 2]>) -> Self {
        self.ls_weights = weights;
        self
    }

    /// Error-ellipse columns: semi-minor, semi-major, orientation.
    pub fn ellipses(mut self, semi_minor: Vec<f64>, semi_major: Vec<f64>, orientation: Vec<f64>) -> Self {
        self.semi_minor = semi_minor;
        self.semi_major = semi_major;
        self.orientation = orientation;
        self
    }

    /// Initial `(x, y, vx, vy)` state.
    pub fn initial_state(mut self, state: [f64; 4]) -> Self {
        self.initial_state = state;
        self
    }

    /// Validate and assemble.
    ///
    /// # Errors
    /// - `EmptyTrajectory` when no time deltas are given
    /// - `DimensionMismatch` when a column does not have one entry per step
    /// - `UnsupportedModelSelector` for an unknown process selector, or an
    ///   unknown observation selector at an observed step
    /// - `InvalidFlag` for a flag other than 0 or 1
    pub fn build(self) -> Result<TelemetryData, ModelError> {
        let n = self.dt.len();
        if n == 0 {
            return Err(ModelError::EmptyTrajectory);
        }
        ModelError::check_len("positions", n, self.positions.len())?;
        ModelError::check_len("observation_flags", n, self.flags.len())?;
        ModelError::check_len("observation_models", n, self.observation_models.len())?;

        let process_model = ProcessModelKind::from_code(self.process_model)?;

        let mut steps = Vec::with_capacity(n);
        for i in 0..n {
            let dt = self.dt[i];
            match self.flags[i] {
                0 => steps.push(TimeStep::interpolation(dt)),
                1 => {
                    let kind = ObservationModelKind::from_code(self.observation_models[i], i)?;
                    let error = self.descriptor(kind, i, n)?;
                    steps.push(TimeStep::observed(
                        dt,
                        Fix {
                            position: self.positions[i],
                            error,
                        },
                    ));
                }
                value => return Err(ModelError::InvalidFlag { step: i, value }),
            }
        }

        TelemetryData::new(steps, self.initial_state, process_model)
    }

    fn descriptor(
        &self,
        kind: ObservationModelKind,
        i: usize,
        n: usize,
    ) -> Result<ErrorDescriptor, ModelError> {
        match kind {
            ObservationModelKind::LeastSquares => {
                ModelError::check_len("least_squares_weights", n, self.ls_weights.len())?;
                Ok(ErrorDescriptor::LeastSquares {
                    weights: self.ls_weights[i],
                })
            }
            ObservationModelKind::KalmanEllipse => {
                ModelError::check_len("semi_minor", n, self.semi_minor.len())?;
                ModelError::check_len("semi_major", n, self.semi_major.len())?;
                ModelError::check_len("orientation", n, self.orientation.len())?;
                Ok(ErrorDescriptor::KalmanEllipse(EllipseDescriptor {
                    semi_minor: self.semi_minor[i],
                    semi_major: self.semi_major[i],
                    orientation: self.orientation[i],
                }))
            }
        }
    }
}
