//! Metric interfaces and result records.
//!
//! Metric implementations (target registration error, Hausdorff distance,
//! singularity ratio, inverse consistency) live outside this crate and plug in
//! through [`Metric`]. Each produces a [`MetricRecord`]; records of one case
//! are combined with [`merge_records`].

use std::collections::BTreeMap;
use std::fmt;

use crate::evaluation::RegistrationOutcome;
use crate::BenchResult;

/// The standard registration quality metrics of the benchmark suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Target registration error over corresponding landmarks.
    Tre,
    /// Hausdorff distance between warped and reference segmentations.
    Hausdorff,
    /// Fraction of voxels where the deformation folds (non-positive Jacobian).
    SingularityRatio,
    /// Round-trip error of points pushed through both deformation fields.
    InverseConsistencyPoints,
}

impl MetricKind {
    pub fn name(self) -> &'static str {
        match self {
            MetricKind::Tre => "tre",
            MetricKind::Hausdorff => "hausdorff",
            MetricKind::SingularityRatio => "singularity_ratio",
            MetricKind::InverseConsistencyPoints => "inverse_consistency_points",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Named scalar results, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct MetricRecord(BTreeMap<String, f64>);

impl MetricRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, returning the one it replaced.
    pub fn insert(&mut self, name: impl Into<String>, value: f64) -> Option<f64> {
        self.0.insert(name.into(), value)
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for MetricRecord {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Combines records into one. A key present in several records keeps the
/// value from the last record that has it.
pub fn merge_records<I>(records: I) -> MetricRecord
where
    I: IntoIterator<Item = MetricRecord>,
{
    let mut merged = MetricRecord::new();
    for record in records {
        for (name, value) in record.0 {
            if let Some(previous) = merged.insert(name.clone(), value) {
                tracing::debug!("metric {name} overwritten ({previous} -> {value})");
            }
        }
    }
    merged
}

/// A registration quality metric computed from a finished registration.
pub trait Metric: Send + Sync {
    fn kind(&self) -> MetricKind;

    fn compute(&self, outcome: &RegistrationOutcome) -> BenchResult<MetricRecord>;
}
