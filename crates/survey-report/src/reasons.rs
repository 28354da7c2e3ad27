//! Overview of cancellation reasons with frequency-based priorities.

use std::collections::HashMap;

use serde::Serialize;
use survey_model::Column;

/// Quantile of the counts at or above which a reason is high priority.
pub const HIGH_QUANTILE: f64 = 0.67;
/// Quantile of the counts at or above which a reason is medium priority.
pub const MEDIUM_QUANTILE: f64 = 0.33;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One distinct answer of the reason column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReasonRow {
    pub category: String,
    pub count: usize,
    /// Share of all rows, missing included, rounded to one decimal.
    pub percentage: f64,
    pub priority: Priority,
}

/// Reason frequencies of one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CancellationOverview {
    pub column: String,
    pub total_rows: usize,
    /// Rows sorted by descending count; ties keep first appearance.
    pub rows: Vec<ReasonRow>,
}

impl CancellationOverview {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Counts the distinct non-missing values of `column` and ranks them.
///
/// Percentages use `total_rows` as denominator so they reflect the whole
/// survey, not just respondents who answered. A value is `High` priority
/// when its count reaches the 67th percentile of all counts and `Medium` when
/// it reaches the 33rd.
pub fn cancellation_overview(column: &Column, total_rows: usize) -> CancellationOverview {
    let mut order: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for value in column.values() {
        let Some(text) = value.as_text() else {
            continue;
        };
        match index.get(&*text) {
            Some(&i) => order[i].1 += 1,
            None => {
                index.insert(text.to_string(), order.len());
                order.push((text.into_owned(), 1));
            }
        }
    }
    // Stable sort keeps first appearance among equal counts.
    order.sort_by(|a, b| b.1.cmp(&a.1));

    let counts: Vec<f64> = order.iter().map(|(_, count)| *count as f64).collect();
    let high = quantile(&counts, HIGH_QUANTILE);
    let medium = quantile(&counts, MEDIUM_QUANTILE);

    let rows = order
        .into_iter()
        .map(|(category, count)| {
            let value = count as f64;
            let priority = if value >= high {
                Priority::High
            } else if value >= medium {
                Priority::Medium
            } else {
                Priority::Low
            };
            ReasonRow {
                category,
                count,
                percentage: percentage(count, total_rows),
                priority,
            }
        })
        .collect();

    CancellationOverview {
        column: column.name().to_string(),
        total_rows,
        rows,
    }
}

/// Share of `total_rows` in percent, rounded to one decimal with ties to even.
fn percentage(count: usize, total_rows: usize) -> f64 {
    if total_rows == 0 {
        return 0.0;
    }
    (count as f64 / total_rows as f64 * 1000.0).round_ties_even() / 10.0
}

/// Quantile with linear interpolation between closest ranks.
///
/// Returns 0 for an empty input.
pub fn quantile(values: &[f64], q: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

#[cfg(test)]
mod tests {
    use super::*;
    use survey_model::CellValue;

    #[test]
    fn quantile_interpolates() {
        assert_eq!(quantile(&[], 0.5), 0.0);
        assert_eq!(quantile(&[4.0], 0.67), 4.0);
        assert!((quantile(&[1.0, 2.0, 3.0, 10.0], 0.67) - 3.07).abs() < 1e-9);
        assert!((quantile(&[1.0, 2.0, 3.0, 10.0], 0.33) - 1.99).abs() < 1e-9);
    }

    #[test]
    fn ties_keep_first_appearance() {
        let column = Column::from_text("why", &[Some("b"), Some("a"), Some("a"), Some("b"), None]);
        let overview = cancellation_overview(&column, 5);
        let categories: Vec<&str> = overview.rows.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(categories, vec!["b", "a"]);
        assert_eq!(overview.rows[0].percentage, 40.0);
        assert!(overview.rows.iter().all(|r| r.priority == Priority::High));
    }

    #[test]
    fn missing_values_are_not_a_category() {
        let column = Column::new("why", vec![CellValue::Missing, CellValue::Missing]);
        let overview = cancellation_overview(&column, 2);
        assert!(overview.is_empty());
    }

    #[test]
    fn percentage_rounds_to_one_decimal() {
        assert_eq!(percentage(1, 3), 33.3);
        assert_eq!(percentage(2, 3), 66.7);
        assert_eq!(percentage(1, 0), 0.0);
    }

    #[test]
    fn percentage_halves_round_to_even() {
        assert_eq!(percentage(1, 16), 6.2);
        assert_eq!(percentage(3, 16), 18.8);
        assert_eq!(percentage(5, 16), 31.2);
    }
}
