//! Error types for report generation.

use survey_model::{ModelError, Role};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Model(#[from] ModelError),

    /// The detection result binds a role to a column the dataset lacks.
    #[error("role {role} is bound to column '{column}', which is not in the dataset")]
    StaleBinding { role: Role, column: String },
}

pub type Result<T> = std::result::Result<T, ReportError>;
