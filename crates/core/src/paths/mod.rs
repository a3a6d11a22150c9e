//! On-disk path definitions for benchmark datasets.
//!
//! This module defines relative filesystem paths for dataset inputs and
//! registration outputs. It contains **no I/O logic** - only typed path construction.

pub mod common;
pub mod empire;
