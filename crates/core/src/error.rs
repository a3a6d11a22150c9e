use std::path::PathBuf;

use superbench_types::{CaseNumber, CaseNumberError, TextError};

use crate::driver::Direction;

#[derive(Debug, thiserror::Error)]
pub enum BenchError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid input directory: {0}")]
    InvalidInputDirectory(String),
    #[error("missing input file: {}", .0.display())]
    MissingInput(PathBuf),
    #[error("registration failed for case {case} ({direction}): {message}")]
    Registration {
        case: CaseNumber,
        direction: Direction,
        message: String,
    },
    #[error("failed to start registration driver: {0}")]
    DriverSpawn(std::io::Error),
    #[error("missing output deformation field: {}", .0.display())]
    MissingOutput(PathBuf),
    #[error("failed to create output directory: {0}")]
    OutputDirCreation(std::io::Error),
    #[error("failed to remove previous output {}: {source}", path.display())]
    StaleOutputRemoval {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("metric {metric} failed: {message}")]
    Metric { metric: String, message: String },

    #[error("invalid text: {0}")]
    Text(#[from] TextError),
    #[error("invalid case number: {0}")]
    CaseNumber(#[from] CaseNumberError),
}

pub type BenchResult<T> = std::result::Result<T, BenchError>;
