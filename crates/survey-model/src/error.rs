use thiserror::Error;

/// Errors raised when building or querying survey model types.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// A column does not have the same number of rows as the first column.
    #[error("column '{column}' has {found} rows, expected {expected}")]
    RaggedColumns {
        column: String,
        expected: usize,
        found: usize,
    },

    /// Two columns share the same name.
    #[error("duplicate column name: {0}")]
    DuplicateColumn(String),

    /// A column name is empty or whitespace only.
    #[error("column at index {index} has an empty name")]
    EmptyColumnName { index: usize },

    #[error("column not found: {0}")]
    ColumnNotFound(String),

    #[error("unknown role: {0}")]
    UnknownRole(String),

    /// A detection option is out of its accepted range.
    #[error("invalid option {field}: {reason}")]
    InvalidOption { field: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
