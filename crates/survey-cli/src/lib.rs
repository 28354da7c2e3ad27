//! CLI library components for survey column detection.

pub mod logging;
pub mod pipeline;
