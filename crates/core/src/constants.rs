//! Constants used throughout the SuperBench core crate.

/// Display name of the EMPIRE10 lung CT challenge dataset.
pub const EMPIRE_NAME: &str = "EMPIRE";

/// Anatomical category the EMPIRE dataset belongs to.
pub const EMPIRE_CATEGORY: &str = "Lung";

/// Number of fixed/moving scan pairs in the EMPIRE dataset.
pub const EMPIRE_CASE_COUNT: u32 = 30;

/// Default directory for registration outputs when none is configured.
pub const DEFAULT_OUTPUT_DIR: &str = "superbench_output";

/// Environment variable naming the dataset input directory.
pub const INPUT_DIR_ENV: &str = "SUPERBENCH_INPUT_DIR";

/// Environment variable naming the registration output directory.
pub const OUTPUT_DIR_ENV: &str = "SUPERBENCH_OUTPUT_DIR";
