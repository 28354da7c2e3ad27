//! Conversion between polars DataFrames and survey datasets.

use polars::prelude::*;
use survey_model::{CellValue, Column as SurveyColumn, ColumnKind, Dataset, format_numeric};

use crate::error::Result;

/// Converts a Polars `AnyValue` into a cell.
///
/// Numbers keep their value, blank strings and nulls become
/// [`CellValue::Missing`], and every other type is kept as its display text.
pub fn any_to_cell(value: AnyValue<'_>) -> CellValue {
    match value {
        AnyValue::Null => CellValue::Missing,
        AnyValue::Int8(v) => CellValue::Number(f64::from(v)),
        AnyValue::Int16(v) => CellValue::Number(f64::from(v)),
        AnyValue::Int32(v) => CellValue::Number(f64::from(v)),
        AnyValue::Int64(v) => CellValue::Number(v as f64),
        AnyValue::UInt8(v) => CellValue::Number(f64::from(v)),
        AnyValue::UInt16(v) => CellValue::Number(f64::from(v)),
        AnyValue::UInt32(v) => CellValue::Number(f64::from(v)),
        AnyValue::UInt64(v) => CellValue::Number(v as f64),
        AnyValue::Float32(v) => CellValue::Number(f64::from(v)),
        AnyValue::Float64(v) => CellValue::Number(v),
        AnyValue::String(s) => text_cell(s),
        AnyValue::StringOwned(s) => text_cell(&s),
        AnyValue::Boolean(b) => CellValue::Text(b.to_string()),
        other => {
            let s = other.to_string();
            // Display wraps some types in quotes.
            let s = s
                .strip_prefix('"')
                .and_then(|inner| inner.strip_suffix('"'))
                .unwrap_or(&s);
            text_cell(s)
        }
    }
}

fn text_cell(value: &str) -> CellValue {
    if value.trim().is_empty() {
        CellValue::Missing
    } else {
        CellValue::Text(value.to_string())
    }
}

/// Builds a [`Dataset`] from a DataFrame, preserving column order.
pub fn dataset_from_frame(df: &DataFrame) -> Result<Dataset> {
    let height = df.height();
    let mut columns = Vec::with_capacity(df.width());
    for column in df.get_columns() {
        let mut values = Vec::with_capacity(height);
        for row_idx in 0..height {
            values.push(any_to_cell(column.get(row_idx)?));
        }
        columns.push(SurveyColumn::new(column.name().to_string(), values));
    }
    Ok(Dataset::new(columns)?)
}

/// Builds a DataFrame from a [`Dataset`].
///
/// Numeric-typed columns become `Float64`; every other column becomes
/// `String` with numbers formatted without trailing zeros.
pub fn frame_from_dataset(dataset: &Dataset) -> Result<DataFrame> {
    let columns = dataset
        .columns()
        .iter()
        .map(|column| {
            let name = PlSmallStr::from(column.name());
            let series = if column.kind() == ColumnKind::Numeric {
                let values: Vec<Option<f64>> =
                    column.values().iter().map(CellValue::as_number).collect();
                Series::new(name, values)
            } else {
                let values: Vec<Option<String>> = column
                    .values()
                    .iter()
                    .map(|value| match value {
                        CellValue::Number(v) => Some(format_numeric(*v)),
                        other => other.as_text().map(|s| s.into_owned()),
                    })
                    .collect();
                Series::new(name, values)
            };
            Column::from(series)
        })
        .collect::<Vec<_>>();
    Ok(DataFrame::new(columns)?)
}
