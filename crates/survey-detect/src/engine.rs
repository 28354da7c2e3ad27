//! Detection engine: runs the detector table against a dataset.

use std::collections::BTreeMap;

use serde::Serialize;
use survey_model::{Column, Dataset, DetectionOptions, DetectionResult, Role};
use tracing::{debug, info, info_span};

use crate::detectors::{Detection, DetectorConfig, detector_table};
use crate::error::Result;
use crate::pool::CandidatePool;

/// Full outcome of a detection run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionReport {
    pub result: DetectionResult,
    /// Per-role rankings in resolution order.
    pub detections: Vec<Detection>,
}

impl DetectionReport {
    pub fn detection(&self, role: Role) -> Option<&Detection> {
        self.detections.iter().find(|d| d.role == role)
    }
}

/// Resolves every role against one dataset.
///
/// Roles are resolved in a fixed priority order. A column bound to one role
/// leaves the candidate pool, so later roles never see it.
#[derive(Debug, Clone)]
pub struct DetectionEngine {
    detectors: Vec<DetectorConfig>,
}

impl Default for DetectionEngine {
    fn default() -> Self {
        Self {
            detectors: detector_table(&DetectionOptions::default()),
        }
    }
}

impl DetectionEngine {
    pub fn new(options: DetectionOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            detectors: detector_table(&options),
        })
    }

    /// Runs every detector and keeps the per-role rankings.
    pub fn run(&self, dataset: &Dataset) -> DetectionReport {
        let span = info_span!(
            "detect",
            columns = dataset.width(),
            rows = dataset.row_count()
        );
        let _guard = span.enter();

        let mut pool = CandidatePool::new(dataset);
        let mut bindings = BTreeMap::new();
        let mut detections = Vec::with_capacity(self.detectors.len());

        for detector in &self.detectors {
            let candidates = pool.view(detector.pool);
            let detection = detector.detect(&candidates);

            match detection.column() {
                Some(column) => {
                    pool.claim(column);
                    info!(role = %detector.role, column, "bound role");
                    bindings.insert(detector.role, column.to_string());
                }
                None => debug!(role = %detector.role, "role left unbound"),
            }
            detections.push(detection);
        }

        info!(
            bound = bindings.len(),
            unbound = pool.len(),
            "detection finished"
        );

        DetectionReport {
            result: DetectionResult::new(bindings),
            detections,
        }
    }

    /// Runs every detector and returns only the role bindings.
    pub fn detect(&self, dataset: &Dataset) -> DetectionResult {
        self.run(dataset).result
    }
}

/// Detects roles with default options.
pub fn auto_detect_columns(dataset: &Dataset) -> DetectionResult {
    DetectionEngine::default().detect(dataset)
}

/// Validates `columns` into a dataset, then detects roles with default options.
pub fn detect_from_columns(columns: Vec<Column>) -> Result<DetectionResult> {
    let dataset = Dataset::new(columns)?;
    Ok(auto_detect_columns(&dataset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use survey_model::ModelError;

    use crate::error::DetectError;

    #[test]
    fn invalid_options_are_rejected() {
        let options = DetectionOptions::default().with_name_bonus_multiplier(0.0);
        let err = DetectionEngine::new(options).unwrap_err();
        assert!(matches!(
            err,
            DetectError::Model(ModelError::InvalidOption { .. })
        ));
    }

    #[test]
    fn empty_dataset_binds_nothing() {
        let dataset = Dataset::new(Vec::new()).unwrap();
        let report = DetectionEngine::default().run(&dataset);
        assert!(report.result.is_empty());
        assert_eq!(report.detections.len(), Role::ALL.len());
    }

    #[test]
    fn ragged_columns_fail_before_detection() {
        let err = detect_from_columns(vec![
            Column::from_numbers("a", &[Some(1.0)]),
            Column::from_numbers("b", &[Some(1.0), Some(2.0)]),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            DetectError::Model(ModelError::RaggedColumns { .. })
        ));
    }
}
