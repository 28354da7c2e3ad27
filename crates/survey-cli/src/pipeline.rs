//! Command pipeline: load, detect, then report or extract.
//!
//! Each stage takes the output of the previous one, so the commands in the
//! binary stay thin and the stages can be tested without a terminal.

use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use survey_detect::{DetectionEngine, DetectionReport};
use survey_ingest::read_csv_dataset;
use survey_model::{Dataset, DetectionOptions, Role};
use survey_report::{
    CancellationOverview, cancellation_overview, extract_roles,
    remove_numeric_or_special_responses,
};
use tracing::{debug, info, info_span, trace};

use crate::logging::redact_value;

/// Command-line overrides applied on top of the options file.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionOverrides {
    pub min_numeric_fraction: Option<f64>,
    pub bonus_multiplier: Option<f64>,
}

/// A loaded export with its detection report.
#[derive(Debug)]
pub struct DetectedExport {
    pub dataset: Dataset,
    pub report: DetectionReport,
}

/// Loads detection options from an optional JSON file, then applies overrides.
pub fn load_options(path: Option<&Path>, overrides: OptionOverrides) -> Result<DetectionOptions> {
    let mut options = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("read options file {}", path.display()))?;
            serde_json::from_str::<DetectionOptions>(&text)
                .with_context(|| format!("parse options file {}", path.display()))?
        }
        None => DetectionOptions::default(),
    };
    if let Some(value) = overrides.min_numeric_fraction {
        options = options.with_min_numeric_fraction(value);
    }
    if let Some(value) = overrides.bonus_multiplier {
        options = options.with_name_bonus_multiplier(value);
    }
    options.validate().context("invalid detection options")?;
    Ok(options)
}

/// Reads a CSV export and runs detection over it.
pub fn detect_export(path: &Path, options: DetectionOptions) -> Result<DetectedExport> {
    let span = info_span!("export", path = %path.display());
    let _guard = span.enter();

    let start = Instant::now();
    let dataset =
        read_csv_dataset(path).with_context(|| format!("read export {}", path.display()))?;
    let engine = DetectionEngine::new(options).context("configure detection")?;
    let report = engine.run(&dataset);
    info!(
        roles = report.result.len(),
        duration_ms = start.elapsed().as_millis(),
        "detection complete"
    );
    Ok(DetectedExport { dataset, report })
}

/// Builds the reason overview for `column`, or for the detected exit reason.
pub fn reasons_overview(
    export: &DetectedExport,
    column: Option<&str>,
) -> Result<CancellationOverview> {
    let name = match column {
        Some(name) => name,
        None => match export.report.result.get(Role::ExitReason) {
            Some(name) => name,
            None => bail!("no exit reason column detected; pass --column to choose one"),
        },
    };
    let source = export.dataset.require_column(name)?;
    let overview = cancellation_overview(source, export.dataset.row_count());
    for row in &overview.rows {
        trace!(
            category = redact_value(&row.category),
            count = row.count,
            "reason counted"
        );
    }
    debug!(column = name, categories = overview.rows.len(), "built overview");
    Ok(overview)
}

/// Builds the role-named extraction of an export.
///
/// Unless `keep_numeric_responses` is set, rows whose freeform answer is
/// only numbers or symbols are dropped first.
pub fn extract_export(export: &DetectedExport, keep_numeric_responses: bool) -> Result<Dataset> {
    let result = &export.report.result;
    if result.is_empty() {
        bail!("no roles detected; nothing to extract");
    }

    let filtered;
    let source = match result.get(Role::FreeformAnswer) {
        Some(column) if !keep_numeric_responses => {
            filtered = remove_numeric_or_special_responses(&export.dataset, column)?;
            info!(
                removed = export.dataset.row_count() - filtered.row_count(),
                "dropped responses without words"
            );
            &filtered
        }
        _ => &export.dataset,
    };

    Ok(extract_roles(source, result)?)
}
