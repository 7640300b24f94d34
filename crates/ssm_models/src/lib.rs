//! # ssm_models (L2: Models)
//!
//! Process and observation models for a telemetry state-space model.
//!
//! This crate provides:
//! - Validated telemetry inputs (`data`)
//! - The latent trajectory representations (`trajectory`)
//! - Raw (optimiser-scale) and natural-scale parameters (`params`)
//! - Process models: RandomWalk and CorrelatedRandomWalk (`process`)
//! - Observation models: LeastSquares and KalmanEllipse (`observation`)
//! - Natural-scale quantities exposed for standard-error reporting (`report`)
//!
//! ## Design Principles
//!
//! - **Enum-based models** for static dispatch over a closed variant set
//! - **Generic `Scalar` type** so the same code runs on `f64` and dual numbers
//! - **Per-step contributions** so the likelihood can be reduced in any order
//!
//! ## Example
//!
//! ```
//! use ssm_models::data::TelemetryDataBuilder;
//! use ssm_models::params::RawParameters;
//! use ssm_models::process::ProcessModel;
//! use ssm_models::trajectory::Trajectory;
//!
//! let data = TelemetryDataBuilder::new()
//!     .positions(vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]])
//!     .time_deltas(vec![1.0, 1.0, 1.0])
//!     .observation_flags(vec![0, 0, 0])
//!     .observation_models(vec![0, 0, 0])
//!     .process_model(0)
//!     .build()
//!     .unwrap();
//!
//! let natural = RawParameters::<f64>::default().transform();
//! let model = ProcessModel::new(data.process_model(), &natural, data.initial_state(), 1e-5);
//! let trajectory = Trajectory::random_walk(vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]);
//!
//! let nll = model.total_nll(&trajectory, &data);
//! assert!(nll.is_finite());
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod data;
pub mod observation;
pub mod params;
pub mod process;
pub mod report;
pub mod trajectory;

pub use data::{
    EllipseDescriptor, ErrorDescriptor, Fix, ObservationModelKind, ProcessModelKind,
    TelemetryData, TelemetryDataBuilder, TimeStep,
};
pub use observation::ObservationModel;
pub use params::{NaturalParameters, RawParameters};
pub use process::ProcessModel;
pub use report::DerivedReport;
pub use trajectory::Trajectory;
