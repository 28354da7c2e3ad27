//! Data model for survey column role detection.
//!
//! A [`Dataset`] is the immutable input of the detection engine, a
//! [`DetectionResult`] its output, and [`DetectionOptions`] the knobs in
//! between.

#![deny(unsafe_code)]

pub mod cell;
pub mod dataset;
pub mod detection;
pub mod error;
pub mod options;
pub mod role;

pub use cell::{CellValue, format_numeric};
pub use dataset::{Column, ColumnKind, Dataset};
pub use detection::DetectionResult;
pub use error::{ModelError, Result};
pub use options::DetectionOptions;
pub use role::Role;
