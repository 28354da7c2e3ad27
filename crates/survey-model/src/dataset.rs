//! Tabular survey exports with unknown schema.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::cell::CellValue;
use crate::error::{ModelError, Result};

/// Storage type of a column, derived from its non-missing cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Every non-missing cell is a number.
    Numeric,
    /// Every non-missing cell is text.
    Text,
    /// Both numbers and text occur.
    Mixed,
    /// No non-missing cells.
    Empty,
}

impl ColumnKind {
    /// True for kinds that hold string data (`Text` and `Mixed`).
    pub fn holds_text(self) -> bool {
        matches!(self, Self::Text | Self::Mixed)
    }
}

/// A named, ordered sequence of cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    name: String,
    values: Vec<CellValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Builds a text column, treating `None` as missing.
    pub fn from_text<S: AsRef<str>>(name: impl Into<String>, values: &[Option<S>]) -> Self {
        let values = values
            .iter()
            .map(|v| match v {
                Some(s) => CellValue::Text(s.as_ref().to_string()),
                None => CellValue::Missing,
            })
            .collect();
        Self::new(name, values)
    }

    /// Builds a numeric column, treating `None` as missing.
    pub fn from_numbers(name: impl Into<String>, values: &[Option<f64>]) -> Self {
        let values = values.iter().map(|v| CellValue::from(*v)).collect();
        Self::new(name, values)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[CellValue] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn kind(&self) -> ColumnKind {
        let mut numbers = false;
        let mut text = false;
        for value in &self.values {
            match value {
                CellValue::Number(_) => numbers = true,
                CellValue::Text(_) => text = true,
                CellValue::Missing => {}
            }
        }
        match (numbers, text) {
            (true, false) => ColumnKind::Numeric,
            (false, true) => ColumnKind::Text,
            (true, true) => ColumnKind::Mixed,
            (false, false) => ColumnKind::Empty,
        }
    }
}

/// An immutable, rectangular collection of uniquely named columns.
///
/// Construction validates the shape; every `Dataset` value is well formed.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Dataset {
    columns: Vec<Column>,
    row_count: usize,
}

impl Dataset {
    /// Builds a dataset, rejecting blank or duplicate names and ragged columns.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let row_count = columns.first().map_or(0, Column::len);
        let mut seen = BTreeSet::new();
        for (index, column) in columns.iter().enumerate() {
            if column.name.trim().is_empty() {
                return Err(ModelError::EmptyColumnName { index });
            }
            if !seen.insert(column.name.as_str()) {
                return Err(ModelError::DuplicateColumn(column.name.clone()));
            }
            if column.len() != row_count {
                return Err(ModelError::RaggedColumns {
                    column: column.name.clone(),
                    expected: row_count,
                    found: column.len(),
                });
            }
        }
        Ok(Self { columns, row_count })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(Column::name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Like [`Dataset::column`] but reports a missing column as an error.
    pub fn require_column(&self, name: &str) -> Result<&Column> {
        self.column(name)
            .ok_or_else(|| ModelError::ColumnNotFound(name.to_string()))
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Returns a new dataset keeping only the rows where `keep` is true.
    pub fn filter_rows(&self, keep: &[bool]) -> Result<Self> {
        if keep.len() != self.row_count {
            return Err(ModelError::RaggedColumns {
                column: "<row mask>".to_string(),
                expected: self.row_count,
                found: keep.len(),
            });
        }
        let columns = self
            .columns
            .iter()
            .map(|column| {
                let values = column
                    .values
                    .iter()
                    .zip(keep)
                    .filter(|(_, keep)| **keep)
                    .map(|(value, _)| value.clone())
                    .collect();
                Column::new(column.name.clone(), values)
            })
            .collect();
        Self::new(columns)
    }
}

impl<'de> Deserialize<'de> for Dataset {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            columns: Vec<Column>,
        }
        let raw = Raw::deserialize(deserializer)?;
        Dataset::new(raw.columns).map_err(serde::de::Error::custom)
    }
}
