//! # ssm_likelihood (L3: Likelihood Kernel)
//!
//! Negative log-likelihood of a telemetry state-space model at one parameter
//! point, the objective an external optimiser / AD engine minimises.
//!
//! This crate provides:
//! - `LikelihoodEvaluator`: structural checks, parameter transform, model
//!   construction and reduction of per-step contributions (`evaluator`)
//! - `NllAccumulator` / `SplitAccumulator`: explicit, mergeable running totals
//!   (`accumulator`)
//! - Sequential and Rayon fold/reduce over time steps (`parallel`)
//! - `EvaluatorConfig`: defaults, TOML file and environment overrides (`config`)
//! - `LikelihoodError` (`error`)
//!
//! ## Differentiation
//!
//! The evaluator is generic over `T: Scalar`. It never
//! differentiates itself; evaluating with a dual number type yields the
//! derivative along the seeded direction.
//!
//! ## Logging
//!
//! Each evaluation runs inside a `debug` span (`nll_evaluation`) with
//! `trace` events per phase. A non-finite result is reported at `warn`.
//! The library installs no subscriber.
//!
//! ## Example
//!
//! ```
//! use ssm_likelihood::{EvaluatorConfig, LikelihoodEvaluator};
//! use ssm_models::data::TelemetryDataBuilder;
//! use ssm_models::params::RawParameters;
//! use ssm_models::trajectory::Trajectory;
//!
//! let data = TelemetryDataBuilder::new()
//!     .positions(vec![[0.0, 0.0], [0.9, 0.1]])
//!     .time_deltas(vec![1.0, 1.0])
//!     .observation_flags(vec![1, 1])
//!     .observation_models(vec![0, 1])
//!     .least_squares_weights(vec![[1.0, 1.0]; 2])
//!     .ellipses(vec![0.5; 2], vec![2.0; 2], vec![0.3; 2])
//!     .process_model(1)
//!     .initial_state([0.0, 0.0, 1.0, 0.0])
//!     .build()
//!     .unwrap();
//!
//! let evaluator = LikelihoodEvaluator::with_config(&data, EvaluatorConfig::sequential()).unwrap();
//! let trajectory = Trajectory::correlated(
//!     vec![[0.0, 0.0], [1.0, 0.0]],
//!     vec![[1.0, 0.0], [1.0, 0.0]],
//! );
//! let out = evaluator
//!     .evaluate_detailed(&RawParameters::<f64>::default(), &trajectory)
//!     .unwrap();
//!
//! assert!(out.is_feasible());
//! assert_eq!(out.report.get("D"), Some(1.0));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod accumulator;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod parallel;

pub use accumulator::{NllAccumulator, NllBreakdown, SplitAccumulator};
pub use config::{build_config, ConfigError, EvaluatorConfig, ExecutionMode};
pub use error::LikelihoodError;
pub use evaluator::{LikelihoodEvaluator, LikelihoodOutput};
