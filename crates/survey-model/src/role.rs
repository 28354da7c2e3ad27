//! Semantic roles a survey column can be bound to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Semantic role of a survey column.
///
/// Variants are declared in detection priority order, so the derived `Ord`
/// matches the order in which roles are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Numeric satisfaction score.
    NumericScore,
    /// Free-text comment written by the respondent.
    FreeformAnswer,
    /// Respondent's career or membership segment.
    Career,
    Country,
    /// Primary cancellation reason from the exit survey.
    ExitReason,
    /// Secondary cancellation reason.
    SecondaryReason,
    Date,
}

impl Role {
    /// All roles in detection priority order.
    pub const ALL: [Role; 7] = [
        Role::NumericScore,
        Role::FreeformAnswer,
        Role::Career,
        Role::Country,
        Role::ExitReason,
        Role::SecondaryReason,
        Role::Date,
    ];

    /// Returns the snake_case key used in serialized mappings.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::NumericScore => "numeric_score",
            Role::FreeformAnswer => "freeform_answer",
            Role::Career => "career",
            Role::Country => "country",
            Role::ExitReason => "exit_reason",
            Role::SecondaryReason => "secondary_reason",
            Role::Date => "date",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Role::NumericScore => "Numeric satisfaction score",
            Role::FreeformAnswer => "Free-text respondent comment",
            Role::Career => "Career or membership segment",
            Role::Country => "Respondent country",
            Role::ExitReason => "Primary cancellation reason",
            Role::SecondaryReason => "Secondary cancellation reason",
            Role::Date => "Response date",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ModelError;

    /// Parses a role key, accepting `-` or spaces in place of `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == normalized)
            .ok_or_else(|| ModelError::UnknownRole(s.to_string()))
    }
}
