//! Scoring a single registration case.
//!
//! [`Evaluator`] is the seam between "which cases exist" (a
//! [`Dataset`](crate::dataset::Dataset)) and "how a case is scored".
//! [`BenchmarkEvaluator`] is the standard implementation:
//!
//! 1. verify both input scans exist
//! 2. remove fields left by an earlier run, then register fixed onto moving and moving onto fixed, writing both
//!    deformation fields into an explicit output directory
//! 3. verify both fields were written
//! 4. run every configured metric and merge the results
//!
//! Every failure is returned to the caller as its own [`BenchError`] variant;
//! nothing is retried.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use superbench_types::CaseNumber;

use crate::dataset::CaseDescriptor;
use crate::driver::{Direction, RegistrationDriver, RegistrationRequest};
use crate::metrics::{merge_records, Metric, MetricKind, MetricRecord};
use crate::validation::verify_case_inputs;
use crate::{BenchError, BenchResult};

/// A finished registration, handed to every metric.
#[derive(Debug, Clone)]
pub struct RegistrationOutcome {
    pub case: CaseDescriptor,
    pub fixed_to_moving: PathBuf,
    pub moving_to_fixed: PathBuf,
    /// Wall-clock time spent in the driver for both directions.
    pub registration_time: Duration,
}

/// Merged result of evaluating one case.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EvaluationRecord {
    pub case_number: CaseNumber,
    pub evaluated_at: DateTime<Utc>,
    pub registration_seconds: f64,
    pub metrics: MetricRecord,
}

/// Scores one case of a dataset.
pub trait Evaluator: Send + Sync {
    fn evaluate(
        &self,
        driver: &dyn RegistrationDriver,
        case: &CaseDescriptor,
    ) -> BenchResult<EvaluationRecord>;
}

/// Registers a case in both directions and runs a list of metrics on it.
pub struct BenchmarkEvaluator {
    output_dir: PathBuf,
    metrics: Vec<Box<dyn Metric>>,
}

impl BenchmarkEvaluator {
    /// Creates an evaluator writing deformation fields into `output_dir`.
    ///
    /// The directory is created on first use.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            metrics: Vec::new(),
        }
    }

    pub fn with_metric(mut self, metric: Box<dyn Metric>) -> Self {
        self.metrics.push(metric);
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn metric_kinds(&self) -> Vec<MetricKind> {
        self.metrics.iter().map(|m| m.kind()).collect()
    }

    fn run_metric(metric: &dyn Metric, outcome: &RegistrationOutcome) -> BenchResult<MetricRecord> {
        metric.compute(outcome).map_err(|e| match e {
            BenchError::Metric { .. } => e,
            other => BenchError::Metric {
                metric: metric.kind().to_string(),
                message: other.to_string(),
            },
        })
    }
}

/// Deletes a deformation field from an earlier run so that a driver which
/// writes nothing is reported as `MissingOutput`.
fn remove_stale_output(path: &Path) -> BenchResult<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            tracing::debug!("removed previous output {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(BenchError::StaleOutputRemoval {
            path: path.to_path_buf(),
            source,
        }),
    }
}

impl std::fmt::Debug for BenchmarkEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BenchmarkEvaluator")
            .field("output_dir", &self.output_dir)
            .field("metrics", &self.metric_kinds())
            .finish()
    }
}

impl Evaluator for BenchmarkEvaluator {
    fn evaluate(
        &self,
        driver: &dyn RegistrationDriver,
        case: &CaseDescriptor,
    ) -> BenchResult<EvaluationRecord> {
        verify_case_inputs(case)?;
        fs::create_dir_all(&self.output_dir).map_err(BenchError::OutputDirCreation)?;

        let (fixed_to_moving, moving_to_fixed) = case.deformation_field_paths(&self.output_dir);
        let requests = [
            RegistrationRequest::for_case(case, Direction::FixedToMoving, fixed_to_moving.clone()),
            RegistrationRequest::for_case(case, Direction::MovingToFixed, moving_to_fixed.clone()),
        ];

        for request in &requests {
            remove_stale_output(&request.output_deformation_field)?;
        }

        let started = Instant::now();
        for request in &requests {
            driver.register(request)?;
        }
        let registration_time = started.elapsed();

        for request in &requests {
            if !request.output_deformation_field.is_file() {
                return Err(BenchError::MissingOutput(
                    request.output_deformation_field.clone(),
                ));
            }
        }

        let outcome = RegistrationOutcome {
            case: case.clone(),
            fixed_to_moving,
            moving_to_fixed,
            registration_time,
        };

        let records = self
            .metrics
            .iter()
            .map(|metric| Self::run_metric(metric.as_ref(), &outcome))
            .collect::<BenchResult<Vec<_>>>()?;

        tracing::info!(
            "evaluated case {} in {:.2}s ({} metrics)",
            case.case_number,
            registration_time.as_secs_f64(),
            records.len()
        );

        Ok(EvaluationRecord {
            case_number: case.case_number,
            evaluated_at: Utc::now(),
            registration_seconds: registration_time.as_secs_f64(),
            metrics: merge_records(records),
        })
    }
}
