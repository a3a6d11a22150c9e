//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into core
//! services. Nothing below startup reads process-wide environment variables.

use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_OUTPUT_DIR, INPUT_DIR_ENV};
use crate::{BenchError, BenchResult};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    input_dir: PathBuf,
    output_dir: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// The two directories must differ so that registration outputs never
    /// land among the dataset's scans.
    pub fn new(input_dir: PathBuf, output_dir: PathBuf) -> BenchResult<Self> {
        if input_dir.as_os_str().is_empty() {
            return Err(BenchError::InvalidInput("input_dir cannot be empty".into()));
        }
        if output_dir.as_os_str().is_empty() {
            return Err(BenchError::InvalidInput("output_dir cannot be empty".into()));
        }
        if input_dir == output_dir {
            return Err(BenchError::InvalidInput(
                "output_dir must differ from input_dir".into(),
            ));
        }

        Ok(Self {
            input_dir,
            output_dir,
        })
    }

    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Resolve the dataset input directory from an optional environment value.
///
/// # Errors
///
/// Returns `BenchError::InvalidInput` when the value is absent or blank; the
/// input directory has no sensible default.
pub fn input_dir_from_env_value(value: Option<String>) -> BenchResult<PathBuf> {
    non_blank(value).map(PathBuf::from).ok_or_else(|| {
        BenchError::InvalidInput(format!(
            "no input directory given and {INPUT_DIR_ENV} is not set"
        ))
    })
}

/// Resolve the output directory from an optional environment value.
///
/// Falls back to [`DEFAULT_OUTPUT_DIR`] when the value is absent or blank.
pub fn output_dir_from_env_value(value: Option<String>) -> PathBuf {
    non_blank(value)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
}
