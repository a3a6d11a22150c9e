//! Dataset abstraction.
//!
//! A dataset answers one question: which registration cases exist. How a case
//! is scored lives behind [`Evaluator`](crate::evaluation::Evaluator) so that
//! datasets never depend on a particular registration method or metric.

use std::path::{Path, PathBuf};

use superbench_types::CaseNumber;

use crate::driver::RegistrationDriver;
use crate::evaluation::{EvaluationRecord, Evaluator};
use crate::BenchResult;

/// Fixed and moving scan headers of one case.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ImagePair {
    pub fixed: PathBuf,
    pub moving: PathBuf,
}

/// Corresponding landmark files of the fixed and moving scans.
///
/// Landmark-based metrics (TRE, inverse consistency over points) read these.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PointSetPair {
    pub fixed: PathBuf,
    pub moving: PathBuf,
}

/// Bare file names of the two deformation fields a case produces.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeformationFieldNames {
    pub fixed_to_moving: String,
    pub moving_to_fixed: String,
}

/// Everything a benchmark runner needs to know about one case.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CaseDescriptor {
    pub case_number: CaseNumber,
    pub image_file_names: ImagePair,
    /// `None` when the dataset ships no landmarks for this case.
    #[serde(default)]
    pub point_set_file_names: Option<PointSetPair>,
    pub deformation_field_file_names: DeformationFieldNames,
}

impl CaseDescriptor {
    /// Resolves the deformation field names against an output directory.
    ///
    /// Returns `(fixed_to_moving, moving_to_fixed)`.
    pub fn deformation_field_paths(&self, output_dir: &Path) -> (PathBuf, PathBuf) {
        (
            output_dir.join(&self.deformation_field_file_names.fixed_to_moving),
            output_dir.join(&self.deformation_field_file_names.moving_to_fixed),
        )
    }
}

/// A catalogue of registration cases rooted at an input directory.
///
/// Implementations are immutable once constructed and can be shared between
/// threads without synchronisation.
pub trait Dataset: Send + Sync {
    fn name(&self) -> &str;

    fn category(&self) -> &str;

    fn input_directory(&self) -> &Path;

    /// Number of cases in the dataset.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the descriptor for `number`, or `None` when out of range.
    fn case(&self, number: CaseNumber) -> Option<CaseDescriptor>;

    /// Returns a fresh iterator over all cases in ascending case order.
    ///
    /// Each call is independent of any other, so the sequence can be
    /// restarted at will.
    fn generator(&self) -> Box<dyn Iterator<Item = CaseDescriptor> + '_>;

    /// Sibling resources that exist in the input directory but are not used.
    fn unused_resources(&self) -> Vec<PathBuf> {
        Vec::new()
    }

    /// Scores one case with the given evaluator and registration driver.
    fn evaluate(
        &self,
        evaluator: &dyn Evaluator,
        driver: &dyn RegistrationDriver,
        file_names: &CaseDescriptor,
    ) -> BenchResult<EvaluationRecord> {
        evaluator.evaluate(driver, file_names)
    }
}
