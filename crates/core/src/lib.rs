//! # SuperBench Core
//!
//! Dataset adapters and evaluation interfaces for a medical image
//! registration benchmark.
//!
//! This crate contains:
//! - Typed on-disk layouts of benchmark datasets ([`paths`])
//! - Case catalogues built from those layouts ([`Dataset`], [`datasets::Empire`])
//! - The seams a benchmark runner plugs into: [`RegistrationDriver`],
//!   [`Metric`] and [`Evaluator`]
//!
//! **No image I/O**: reading MetaImage voxels and computing metrics belong to
//! the drivers and metrics callers supply.

pub mod config;
pub mod constants;
pub mod dataset;
pub mod datasets;
pub mod driver;
pub mod error;
pub mod evaluation;
pub mod metrics;
pub mod paths;
pub mod validation;

pub use dataset::{CaseDescriptor, Dataset, DeformationFieldNames, ImagePair, PointSetPair};
pub use driver::{CommandDriver, Direction, RegistrationDriver, RegistrationRequest};
pub use error::{BenchError, BenchResult};
pub use evaluation::{BenchmarkEvaluator, EvaluationRecord, Evaluator, RegistrationOutcome};
pub use metrics::{merge_records, Metric, MetricKind, MetricRecord};
pub use superbench_types::{CaseNumber, NonEmptyText};
