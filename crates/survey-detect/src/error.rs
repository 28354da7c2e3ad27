//! Error types for detection operations.

use survey_model::ModelError;
use thiserror::Error;

/// Errors from configuring or running the detection engine.
///
/// A detector finding no column is not an error; it is an absent role.
#[derive(Debug, Error)]
pub enum DetectError {
    /// Invalid dataset or detection options.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// A name bonus pattern failed to compile.
    #[error("invalid name pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

pub type Result<T> = std::result::Result<T, DetectError>;
