//! Role-based column extraction.

use survey_model::{Column, Dataset, DetectionResult};

use crate::error::{ReportError, Result};

/// Builds a dataset with one column per bound role, named after the role.
///
/// Columns follow role priority order; unbound roles are skipped.
pub fn extract_roles(dataset: &Dataset, result: &DetectionResult) -> Result<Dataset> {
    let mut columns = Vec::with_capacity(result.len());
    for (role, name) in result.iter() {
        let source = dataset
            .column(name)
            .ok_or_else(|| ReportError::StaleBinding {
                role,
                column: name.to_string(),
            })?;
        columns.push(Column::new(role.as_str(), source.values().to_vec()));
    }
    Ok(Dataset::new(columns)?)
}
