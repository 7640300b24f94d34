//! Negative log-likelihood evaluation for one parameter point.
//!
//! ## Evaluation Flow
//!
//! 1. Structural checks: the latent trajectory must match the data's process
//!    model and step count. Failures are returned before any numeric work.
//! 2. Raw parameters are mapped to natural scale.
//! 3. The process and observation models are built from natural-scale
//!    parameters.
//! 4. Each step contributes `(process, observation)`; contributions are
//!    reduced sequentially or in parallel according to [`EvaluatorConfig`].
//!
//! A covariance matrix that is not positive definite makes the result
//! non-finite. That result is returned as a value so an external optimiser
//! can reject the parameter point; it is logged at `warn` level.

use ssm_core::traits::Scalar;
use ssm_models::data::TelemetryData;
use ssm_models::observation::ObservationModel;
use ssm_models::params::RawParameters;
use ssm_models::process::ProcessModel;
use ssm_models::report::DerivedReport;
use ssm_models::trajectory::Trajectory;

use crate::accumulator::{NllBreakdown, SplitAccumulator};
use crate::config::EvaluatorConfig;
use crate::error::LikelihoodError;
use crate::parallel::{accumulate_parallel, accumulate_sequential};

/// Result of a detailed evaluation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LikelihoodOutput<T: Scalar> {
    /// Total negative log-likelihood
    pub nll: T,
    /// Process and observation totals
    pub breakdown: NllBreakdown<T>,
    /// Natural-scale quantities for standard-error reporting
    pub report: DerivedReport<T>,
}

impl<T: Scalar> LikelihoodOutput<T> {
    /// Whether the parameter point gave a finite NLL.
    pub fn is_feasible(&self) -> bool {
        self.nll.is_finite()
    }
}

/// Likelihood evaluator bound to one telemetry data set.
///
/// The evaluator holds no per-evaluation state; every call creates its own
/// accumulator, so one evaluator can serve concurrent callers.
///
/// # Examples
///
/// ```
/// use ssm_likelihood::LikelihoodEvaluator;
/// use ssm_models::data::TelemetryDataBuilder;
/// use ssm_models::params::RawParameters;
/// use ssm_models::trajectory::Trajectory;
///
/// let data = TelemetryDataBuilder::new()
///     .positions(vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]])
///     .time_deltas(vec![1.0, 1.0, 1.0])
///     .observation_flags(vec![0, 0, 0])
///     .observation_models(vec![0, 0, 0])
///     .process_model(0)
///     .build()
///     .unwrap();
///
/// let evaluator = LikelihoodEvaluator::new(&data);
/// let trajectory = Trajectory::random_walk(vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]);
/// let nll = evaluator
///     .evaluate(&RawParameters::<f64>::default(), &trajectory)
///     .unwrap();
///
/// let expected = 2.0 * ((2.0 * std::f64::consts::PI).ln() + 0.5);
/// assert!((nll - expected).abs() < 1e-6);
/// ```
#[derive(Clone, Debug)]
pub struct LikelihoodEvaluator<'a> {
    data: &'a TelemetryData,
    config: EvaluatorConfig,
}

impl<'a> LikelihoodEvaluator<'a> {
    /// Evaluator with the default configuration.
    pub fn new(data: &'a TelemetryData) -> Self {
        Self {
            data,
            config: EvaluatorConfig::default(),
        }
    }

    /// Evaluator with an explicit configuration.
    ///
    /// # Errors
    /// `LikelihoodError::Config` when the configuration does not validate.
    pub fn with_config(
        data: &'a TelemetryData,
        config: EvaluatorConfig,
    ) -> Result<Self, LikelihoodError> {
        config.validate()?;
        Ok(Self { data, config })
    }

    /// Telemetry data being evaluated.
    pub fn data(&self) -> &TelemetryData {
        self.data
    }

    /// Active configuration.
    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Total negative log-likelihood.
    ///
    /// # Errors
    /// `LikelihoodError::Model` when the trajectory does not match the data.
    pub fn evaluate<T>(
        &self,
        params: &RawParameters<T>,
        trajectory: &Trajectory<T>,
    ) -> Result<T, LikelihoodError>
    where
        T: Scalar,
    {
        self.evaluate_detailed(params, trajectory).map(|out| out.nll)
    }

    /// Negative log-likelihood with its process/observation breakdown and
    /// the derived quantities.
    ///
    /// # Errors
    /// `LikelihoodError::Model` when the trajectory does not match the data.
    pub fn evaluate_detailed<T>(
        &self,
        params: &RawParameters<T>,
        trajectory: &Trajectory<T>,
    ) -> Result<LikelihoodOutput<T>, LikelihoodError>
    where
        T: Scalar,
    {
        let data = self.data;
        let n_steps = data.len();
        let parallel = self.config.use_parallel(n_steps);

        let span = tracing::debug_span!(
            "nll_evaluation",
            steps = n_steps,
            observations = data.n_observations(),
            process_model = data.process_model().name(),
            parallel,
        );
        let _enter = span.enter();

        trajectory.validate(data.process_model(), n_steps)?;
        tracing::trace!("Structure validated");

        let natural = params.transform();
        let process = ProcessModel::new(
            data.process_model(),
            &natural,
            data.initial_state(),
            self.config.anchor_sd,
        );
        let observation = ObservationModel::new(&natural);
        tracing::trace!("Models built from natural-scale parameters");

        let contribution = |i: usize| {
            let step = data.step(i);
            (
                process.step_nll(trajectory, data, i),
                observation.step_nll(step, process.predicted_location(trajectory, i)),
            )
        };
        let accumulated: SplitAccumulator<T> = if parallel {
            accumulate_parallel(n_steps, self.config.min_chunk_len, contribution)
        } else {
            accumulate_sequential(n_steps, contribution)
        };
        tracing::trace!(steps = accumulated.steps(), "Contributions reduced");

        let breakdown = accumulated.finish();
        let output = LikelihoodOutput {
            nll: breakdown.total(),
            breakdown,
            report: natural.report(),
        };

        if !output.is_feasible() {
            tracing::warn!(
                process = breakdown.process.value(),
                observation = breakdown.observation.value(),
                "Non-finite negative log-likelihood"
            );
        }
        Ok(output)
    }
}
