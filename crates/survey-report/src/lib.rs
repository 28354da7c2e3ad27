//! Downstream reports over detected survey columns.
//!
//! Consumers of a [`survey_model::DetectionResult`]: a frequency overview of
//! cancellation reasons, a filter for answers without words, and extraction
//! of role-named columns.

#![deny(unsafe_code)]

pub mod error;
pub mod extract;
pub mod reasons;
pub mod responses;

pub use error::{ReportError, Result};
pub use extract::extract_roles;
pub use reasons::{CancellationOverview, Priority, ReasonRow, cancellation_overview, quantile};
pub use responses::{is_numeric_or_special, remove_numeric_or_special_responses};
