//! Recompute persisted fields from their voltage columns

use std::path::Path;
use tracing::warn;

use crate::dataset::{DatasetKind, FieldSample};
use crate::error::Result;
use crate::export::{load_dataset, RunManifest};
use crate::moment::MomentMapping;
use crate::superposition::FieldModel;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerifyReport {
    pub rows: usize,
    /// Largest component-wise |stored − recomputed|
    pub max_abs_error: f64,
    /// Rows whose deviation exceeds the tolerance
    pub failures: usize,
}

impl VerifyReport {
    pub fn passed(&self) -> bool {
        self.failures == 0
    }
}

pub fn verify_samples(
    model: &FieldModel,
    mapping: &MomentMapping,
    samples: &[FieldSample],
    tolerance: f64,
) -> VerifyReport {
    let mut max_abs_error: f64 = 0.0;
    let mut failures = 0;

    for sample in samples {
        let expected = model.total_field(&mapping.moments(&sample.voltage));
        let err = (sample.field - expected).amax();
        // NaN must count as a failure
        if !(err <= tolerance) {
            failures += 1;
        }
        max_abs_error = max_abs_error.max(err);
    }

    VerifyReport { rows: samples.len(), max_abs_error, failures }
}

/// Check every dataset listed in the manifest under `dir`
pub fn verify_run(dir: &Path, tolerance: f64) -> Result<Vec<(DatasetKind, VerifyReport)>> {
    let manifest = RunManifest::load(dir)?;
    manifest.config.validate()?;
    let model = manifest.config.field_model();

    let mut reports = Vec::with_capacity(manifest.datasets.len());
    for entry in &manifest.datasets {
        let dataset = load_dataset(dir, entry)?;
        let mapping = manifest.config.mapping(dataset.mode);
        let report = verify_samples(&model, &mapping, &dataset.samples, tolerance);
        if !report.passed() {
            warn!(
                "{}: {} of {} rows deviate (max error {:.3e})",
                entry.kind, report.failures, report.rows, report.max_abs_error
            );
        }
        reports.push((entry.kind, report));
    }

    Ok(reports)
}
