//! Heuristic role detection for survey export columns.
//!
//! Column headers in survey exports are unreliable, so roles are inferred
//! from cell contents. Every role has a content scorer, optional name
//! bonuses, and an acceptance rule; the [`DetectionEngine`] resolves roles in
//! a fixed priority order and removes each bound column from the pool.
//!
//! ```
//! use survey_detect::auto_detect_columns;
//! use survey_model::{Column, Dataset, Role};
//!
//! let dataset = Dataset::new(vec![
//!     Column::from_numbers("q1", &[Some(4.0), Some(5.0)]),
//!     Column::from_text("notes", &[Some("Loved it, thanks!"), Some("Too pricey; sorry.")]),
//!     Column::from_text("land", &[Some("Chile"), Some("India")]),
//! ])
//! .unwrap();
//! let result = auto_detect_columns(&dataset);
//! assert_eq!(result.get(Role::NumericScore), Some("q1"));
//! assert_eq!(result.get(Role::FreeformAnswer), Some("notes"));
//! assert_eq!(result.get(Role::Country), Some("land"));
//! ```

#![deny(unsafe_code)]

pub mod datetime;
pub mod detectors;
pub mod engine;
pub mod error;
pub mod pool;
pub mod rank;
pub mod score;

pub use detectors::{
    Detection, DetectorConfig, Strategy, detect_career, detect_country, detect_date,
    detect_exit_reason, detect_freeform_answer, detect_numeric, detect_secondary_reason,
    detector_table,
};
pub use engine::{DetectionEngine, DetectionReport, auto_detect_columns, detect_from_columns};
pub use error::{DetectError, Result};
pub use pool::{CandidatePool, PoolFilter};
pub use rank::{Acceptance, AcceptanceTier, NameBonus, RankedCandidate, Ranking, Selection, rank};
pub use score::{ColumnScore, ScoreComponent};
