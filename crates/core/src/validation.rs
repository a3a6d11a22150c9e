//! Input validation utilities.
//!
//! Dataset construction never touches the filesystem. These checks are run
//! explicitly by callers that want to fail fast with a clear missing-file
//! error instead of a downstream I/O error.

use std::path::Path;

use crate::dataset::CaseDescriptor;
use crate::{BenchError, BenchResult};

/// Validates that `path` exists and is a directory.
///
/// # Errors
///
/// Returns `BenchError::InvalidInputDirectory` if the path is missing or is
/// not a directory.
pub fn verify_input_directory(path: &Path) -> BenchResult<()> {
    if !path.exists() {
        return Err(BenchError::InvalidInputDirectory(format!(
            "Directory does not exist: {}",
            path.display()
        )));
    }

    if !path.is_dir() {
        return Err(BenchError::InvalidInputDirectory(format!(
            "Path is not a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Validates that both scan headers of a case exist.
///
/// # Errors
///
/// Returns `BenchError::MissingInput` naming the first absent file, fixed
/// before moving.
pub fn verify_case_inputs(case: &CaseDescriptor) -> BenchResult<()> {
    for path in [&case.image_file_names.fixed, &case.image_file_names.moving] {
        if !path.is_file() {
            return Err(BenchError::MissingInput(path.clone()));
        }
    }
    Ok(())
}
