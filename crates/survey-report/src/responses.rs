//! Filtering of answers that carry no words.

use std::sync::LazyLock;

use regex::Regex;
use survey_model::{CellValue, Dataset};
use tracing::debug;

use crate::error::Result;

static SPECIAL_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^A-Za-z0-9]+$").expect("Invalid regex"));

/// True for numbers, numeric strings, and strings made only of symbols.
///
/// Missing cells and empty strings are false.
pub fn is_numeric_or_special(value: &CellValue) -> bool {
    match value {
        CellValue::Missing => false,
        CellValue::Number(_) => true,
        CellValue::Text(text) => {
            let trimmed = text.trim();
            trimmed.parse::<f64>().is_ok() || SPECIAL_ONLY.is_match(trimmed)
        }
    }
}

/// Drops the rows whose `column` value is numeric or symbols only.
pub fn remove_numeric_or_special_responses(dataset: &Dataset, column: &str) -> Result<Dataset> {
    let target = dataset.require_column(column)?;
    let keep: Vec<bool> = target
        .values()
        .iter()
        .map(|value| !is_numeric_or_special(value))
        .collect();

    let filtered = dataset.filter_rows(&keep)?;
    debug!(
        column,
        removed = dataset.row_count() - filtered.row_count(),
        "removed numeric or symbol-only responses"
    );
    Ok(filtered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use survey_model::{Column, ModelError};

    use crate::error::ReportError;

    #[test]
    fn classifies_responses() {
        assert!(is_numeric_or_special(&CellValue::Number(3.0)));
        assert!(is_numeric_or_special(&CellValue::from(" 42 ")));
        assert!(is_numeric_or_special(&CellValue::from("1e5")));
        assert!(is_numeric_or_special(&CellValue::from("?!")));
        assert!(is_numeric_or_special(&CellValue::from("...")));
        assert!(!is_numeric_or_special(&CellValue::from("ok")));
        assert!(!is_numeric_or_special(&CellValue::from("3 stars")));
        assert!(!is_numeric_or_special(&CellValue::from("")));
        assert!(!is_numeric_or_special(&CellValue::Missing));
    }

    #[test]
    fn removes_rows_across_all_columns() {
        let dataset = Dataset::new(vec![
            Column::from_text("answer", &[Some("Great!"), Some("5"), Some("--"), None]),
            Column::from_numbers("score", &[Some(1.0), Some(2.0), Some(3.0), Some(4.0)]),
        ])
        .unwrap();

        let filtered = remove_numeric_or_special_responses(&dataset, "answer").unwrap();
        assert_eq!(filtered.row_count(), 2);
        assert_eq!(
            filtered.column("score").unwrap().values(),
            &[CellValue::Number(1.0), CellValue::Number(4.0)]
        );
    }

    #[test]
    fn unknown_column_is_an_error() {
        let dataset = Dataset::new(vec![Column::from_numbers("score", &[Some(1.0)])]).unwrap();
        let err = remove_numeric_or_special_responses(&dataset, "answer").unwrap_err();
        assert!(matches!(
            err,
            ReportError::Model(ModelError::ColumnNotFound(_))
        ));
    }
}
