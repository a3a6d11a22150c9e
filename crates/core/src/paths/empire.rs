//! EMPIRE10 on-disk paths.
//!
//! This module defines the relative filesystem structure of the EMPIRE10 lung
//! CT dataset and the names of the deformation fields a registration of one
//! case is expected to produce.
//!
//! # Path Structure
//!
//! ```text
//! <input_directory>/
//!     scans/
//!         01_Fixed.mhd
//!         01_Moving.mhd
//!         ...
//!         30_Moving.mhd
//!     lungMasks/          (present, intentionally unused)
//! ```
//!
//! Output fields are bare file names (`01_Fixed_to_Moving.mhd`,
//! `01_Moving_to_Fixed.mhd`). They carry no directory; the caller decides
//! where they live.

use std::path::{Path, PathBuf};

use superbench_types::CaseNumber;

use super::common::mhd_file_name;

/// Directory holding the fixed and moving CT scans.
#[derive(Debug, Clone, Copy)]
pub struct ScansDir;

impl ScansDir {
    pub const NAME: &'static str = "scans";
}

/// Directory holding lung segmentation masks.
///
/// The masks ship with the dataset but no registration or metric in this
/// suite reads them.
#[derive(Debug, Clone, Copy)]
pub struct LungMasksDir;

impl LungMasksDir {
    pub const NAME: &'static str = "lungMasks";
}

/// Suffix of the reference scan of a case.
#[derive(Debug, Clone, Copy)]
pub struct FixedSuffix;

impl FixedSuffix {
    pub const NAME: &'static str = "Fixed";
}

/// Suffix of the scan that is warped onto the fixed scan.
#[derive(Debug, Clone, Copy)]
pub struct MovingSuffix;

impl MovingSuffix {
    pub const NAME: &'static str = "Moving";
}

/// Relative paths for a single EMPIRE case.
///
/// Scan paths are relative to the dataset input directory. Deformation field
/// paths are bare file names.
#[derive(Debug, Clone)]
pub struct EmpireCasePaths {
    case: CaseNumber,
}

impl EmpireCasePaths {
    pub fn new(case: CaseNumber) -> Self {
        Self { case }
    }

    /// Returns the relative path to `scans/<NN>_Fixed.mhd`.
    pub fn fixed_scan(&self) -> PathBuf {
        Path::new(ScansDir::NAME).join(mhd_file_name(&format!(
            "{}_{}",
            self.case,
            FixedSuffix::NAME
        )))
    }

    /// Returns the relative path to `scans/<NN>_Moving.mhd`.
    pub fn moving_scan(&self) -> PathBuf {
        Path::new(ScansDir::NAME).join(mhd_file_name(&format!(
            "{}_{}",
            self.case,
            MovingSuffix::NAME
        )))
    }

    /// Returns `<NN>_Fixed_to_Moving.mhd`.
    pub fn fixed_to_moving_field(&self) -> String {
        mhd_file_name(&format!(
            "{}_{}_to_{}",
            self.case,
            FixedSuffix::NAME,
            MovingSuffix::NAME
        ))
    }

    /// Returns `<NN>_Moving_to_Fixed.mhd`.
    pub fn moving_to_fixed_field(&self) -> String {
        mhd_file_name(&format!(
            "{}_{}_to_{}",
            self.case,
            MovingSuffix::NAME,
            FixedSuffix::NAME
        ))
    }
}
