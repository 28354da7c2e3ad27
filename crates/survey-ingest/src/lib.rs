//! Survey export ingestion.
//!
//! Reads CSV exports through polars into a [`survey_model::Dataset`] and
//! writes extracted datasets back out as CSV.

#![deny(unsafe_code)]

pub mod convert;
pub mod csv;
pub mod error;

pub use convert::{any_to_cell, dataset_from_frame, frame_from_dataset};
pub use csv::{read_csv_dataset, read_csv_frame, validate_encoding, write_csv};
pub use error::{IngestError, Result};
