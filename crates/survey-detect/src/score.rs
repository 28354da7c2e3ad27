//! Content scorers for column role detection.
//!
//! Each scorer is a pure function over a column's cells. Scorers that can
//! have nothing to measure return `Option`, where `None` means "no score" and
//! keeps the column out of ranking. Zero is a legitimate score and never
//! stands in for missing data.

use std::collections::BTreeSet;

use serde::Serialize;
use survey_model::CellValue;

use crate::datetime::parse_datetime;

/// Weight of the parse fraction in the date composite.
pub const DATE_PARSE_WEIGHT: f64 = 0.6;
/// Weight of the uniqueness ratio in the date composite.
pub const DATE_UNIQUENESS_WEIGHT: f64 = 0.4;

/// Score for a single candidate column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnScore {
    /// Final score after all multipliers.
    pub score: f64,
    /// Breakdown of score components for explainability.
    pub explanation: Vec<ScoreComponent>,
}

impl ColumnScore {
    /// Starts a score from its base component.
    pub fn new(score: f64, name: &'static str, description: impl Into<String>) -> Self {
        Self {
            score,
            explanation: vec![ScoreComponent {
                name,
                value: score,
                description: description.into(),
            }],
        }
    }

    /// Records an informational component without changing the score.
    #[must_use]
    pub fn with_component(
        mut self,
        name: &'static str,
        value: f64,
        description: impl Into<String>,
    ) -> Self {
        self.explanation.push(ScoreComponent {
            name,
            value,
            description: description.into(),
        });
        self
    }

    /// Multiplies the score and records the adjustment.
    pub fn scale(&mut self, name: &'static str, multiplier: f64, description: impl Into<String>) {
        self.score *= multiplier;
        self.explanation.push(ScoreComponent {
            name,
            value: multiplier,
            description: description.into(),
        });
    }

    /// Human-readable explanation of the score.
    pub fn explain(&self) -> String {
        self.explanation
            .iter()
            .map(|c| format!("{}: {:.3}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// A component contributing to a final score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreComponent {
    /// Component name (e.g., "Keyword match").
    pub name: &'static str,
    /// Sub-score, or the multiplier for adjustments.
    pub value: f64,
    pub description: String,
}

fn normalized(value: &CellValue) -> Option<String> {
    value.as_text().map(|s| s.trim().to_lowercase())
}

/// Fraction of non-missing values containing at least one keyword.
///
/// Matching is a literal, case-insensitive substring search, so `"sen"`
/// matches `"SEN teacher"` and also `"absent"`. Returns 0 when the column
/// has no non-missing values.
pub fn keyword_fraction<S: AsRef<str>>(values: &[CellValue], keywords: &[S]) -> f64 {
    let keywords: Vec<String> = keywords
        .iter()
        .map(|k| k.as_ref().trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect();

    let mut total = 0usize;
    let mut matched = 0usize;
    for text in values.iter().filter_map(normalized) {
        total += 1;
        if keywords.iter().any(|k| text.contains(k.as_str())) {
            matched += 1;
        }
    }

    if total == 0 {
        return 0.0;
    }
    matched as f64 / total as f64
}

/// Fraction of non-missing values equal to one of `expected`.
///
/// Both sides are trimmed and lower-cased, so `" Other "` equals `"other"`.
/// Returns `None` when the column has no non-missing values.
pub fn exact_match_fraction<S: AsRef<str>>(values: &[CellValue], expected: &[S]) -> Option<f64> {
    let expected: BTreeSet<String> = expected
        .iter()
        .map(|v| v.as_ref().trim().to_lowercase())
        .collect();

    let mut total = 0usize;
    let mut matched = 0usize;
    for text in values.iter().filter_map(normalized) {
        total += 1;
        if expected.contains(&text) {
            matched += 1;
        }
    }

    if total == 0 {
        return None;
    }
    Some(matched as f64 / total as f64)
}

/// Parses a string as a finite-or-infinite number, rejecting NaN and blanks.
pub fn parse_numeric(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Fraction of all rows (missing included) that parse as numbers.
pub fn numeric_fraction(values: &[CellValue]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let parsed = values
        .iter()
        .filter(|value| match value {
            CellValue::Number(v) => !v.is_nan(),
            CellValue::Text(s) => parse_numeric(s).is_some(),
            CellValue::Missing => false,
        })
        .count();
    parsed as f64 / values.len() as f64
}

/// Date parse statistics of a column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DateScore {
    /// Fraction of all rows that parse as dates.
    pub parsed_fraction: f64,
    /// Distinct parsed dates divided by the row count.
    pub uniqueness_ratio: f64,
}

impl DateScore {
    /// Weighted composite `0.6 × parsed + 0.4 × uniqueness`.
    pub fn composite(&self) -> f64 {
        DATE_PARSE_WEIGHT * self.parsed_fraction + DATE_UNIQUENESS_WEIGHT * self.uniqueness_ratio
    }
}

/// Parses each text cell as a date and measures coverage and variety.
///
/// Numeric cells never count as dates. An empty column scores zero on both.
pub fn date_fraction_and_uniqueness(values: &[CellValue]) -> DateScore {
    let total = values.len();
    if total == 0 {
        return DateScore {
            parsed_fraction: 0.0,
            uniqueness_ratio: 0.0,
        };
    }

    let mut parsed = 0usize;
    let mut distinct = BTreeSet::new();
    for value in values {
        if let CellValue::Text(s) = value
            && let Some(dt) = parse_datetime(s)
        {
            parsed += 1;
            distinct.insert(dt);
        }
    }

    DateScore {
        parsed_fraction: parsed as f64 / total as f64,
        uniqueness_ratio: distinct.len() as f64 / total as f64,
    }
}

/// Text statistics used to recognize free-text answers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextStats {
    /// Mean length in characters.
    pub mean_length: f64,
    /// Mean number of ASCII punctuation characters per value.
    pub mean_punctuation: f64,
    /// Distinct values divided by non-missing values.
    pub uniqueness_ratio: f64,
}

/// Computes [`TextStats`] over non-missing values.
///
/// Returns `None` when the column has no non-missing values.
pub fn text_richness(values: &[CellValue]) -> Option<TextStats> {
    let mut count = 0usize;
    let mut total_length = 0usize;
    let mut total_punctuation = 0usize;
    let mut distinct = BTreeSet::new();

    for text in values.iter().filter_map(CellValue::as_text) {
        count += 1;
        total_length += text.chars().count();
        total_punctuation += text.chars().filter(char::is_ascii_punctuation).count();
        distinct.insert(text.into_owned());
    }

    if count == 0 {
        return None;
    }
    let n = count as f64;
    Some(TextStats {
        mean_length: total_length as f64 / n,
        mean_punctuation: total_punctuation as f64 / n,
        uniqueness_ratio: distinct.len() as f64 / n,
    })
}
