//! Arg-max candidate selection with name bonuses and acceptance thresholds.

use regex::{Regex, RegexBuilder};
use serde::Serialize;
use survey_model::Column;
use tracing::debug;

use crate::error::{DetectError, Result};
use crate::score::ColumnScore;

/// Score multiplier for columns whose name matches a pattern.
///
/// Patterns are case-insensitive regular expressions searched anywhere in
/// the name, so `exit|reason` matches `Exit_Why`.
#[derive(Debug, Clone)]
pub struct NameBonus {
    pattern: Regex,
    multiplier: f64,
}

impl NameBonus {
    /// Multiplier used by the categorical detectors.
    pub const DEFAULT_MULTIPLIER: f64 = 1.1;

    pub fn new(pattern: &str, multiplier: f64) -> Result<Self> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| DetectError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;
        Ok(Self::from_regex(regex, multiplier))
    }

    /// Wraps an already compiled pattern.
    pub fn from_regex(pattern: Regex, multiplier: f64) -> Self {
        Self {
            pattern,
            multiplier,
        }
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn matches(&self, column_name: &str) -> bool {
        self.pattern.is_match(column_name)
    }
}

/// Rule deciding whether the best candidate is good enough.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Acceptance {
    /// Accept when the best score is at least the threshold.
    AtLeast { threshold: f64 },
    /// Try `primary` first, then accept anything at or above `fallback`.
    WithFallback { primary: f64, fallback: f64 },
    /// Always accept the best scored candidate.
    BestAvailable,
}

impl Acceptance {
    /// Classifies a best score; `None` means rejected.
    pub fn decide(&self, score: f64) -> Option<AcceptanceTier> {
        match *self {
            Self::AtLeast { threshold } => (score >= threshold).then_some(AcceptanceTier::Primary),
            Self::WithFallback { primary, fallback } => {
                if score >= primary {
                    Some(AcceptanceTier::Primary)
                } else if score >= fallback {
                    Some(AcceptanceTier::Fallback)
                } else {
                    None
                }
            }
            Self::BestAvailable => Some(AcceptanceTier::BestAvailable),
        }
    }
}

/// How a selected column was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AcceptanceTier {
    /// Cleared the primary threshold.
    Primary,
    /// Cleared only the fallback threshold.
    Fallback,
    /// Accepted without a threshold.
    BestAvailable,
    /// The only numeric-typed column, picked without scoring.
    SoleNumericColumn,
}

/// A scored candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCandidate {
    pub column: String,
    pub score: ColumnScore,
}

/// The accepted candidate of a ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub column: String,
    /// Final score; `None` when the column was picked without scoring.
    pub score: Option<f64>,
    pub tier: AcceptanceTier,
}

/// Outcome of ranking one candidate pool.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Ranking {
    /// Scored candidates in pool order.
    pub candidates: Vec<RankedCandidate>,
    /// Candidates the scorer had no data for.
    pub unscored: Vec<String>,
    /// Index into `candidates` of the highest score, accepted or not.
    pub best: Option<usize>,
    pub selected: Option<Selection>,
}

impl Ranking {
    /// Ranking that bypassed scoring and picked `column` directly.
    pub fn direct(column: &str, tier: AcceptanceTier) -> Self {
        Self {
            selected: Some(Selection {
                column: column.to_string(),
                score: None,
                tier,
            }),
            ..Self::default()
        }
    }

    pub fn selected_column(&self) -> Option<&str> {
        self.selected.as_ref().map(|s| s.column.as_str())
    }

    pub fn best_candidate(&self) -> Option<&RankedCandidate> {
        self.best.and_then(|idx| self.candidates.get(idx))
    }

    /// Candidates sorted by score, highest first; ties keep pool order.
    pub fn sorted(&self) -> Vec<&RankedCandidate> {
        let mut sorted: Vec<_> = self.candidates.iter().collect();
        sorted.sort_by(|a, b| b.score.score.total_cmp(&a.score.score));
        sorted
    }
}

/// Scores every candidate, applies name bonuses, and picks the arg-max.
///
/// Candidates for which `score_fn` returns `None` are excluded. Ties go to
/// the candidate seen first, so the result is deterministic for a given
/// candidate order. An empty pool yields no selection.
pub fn rank<F>(
    candidates: &[&Column],
    mut score_fn: F,
    bonuses: &[NameBonus],
    acceptance: Acceptance,
) -> Ranking
where
    F: FnMut(&Column) -> Option<ColumnScore>,
{
    let mut ranking = Ranking::default();
    let mut best_score = f64::NEG_INFINITY;

    for &column in candidates {
        let name = column.name();
        let Some(mut score) = score_fn(column).filter(|s| !s.score.is_nan()) else {
            ranking.unscored.push(name.to_string());
            continue;
        };

        for bonus in bonuses {
            if bonus.matches(name) {
                score.scale(
                    "Name bonus",
                    bonus.multiplier(),
                    format!("name matches '{}'", bonus.pattern()),
                );
            }
        }

        debug!(column = name, score = score.score, explanation = %score.explain(), "scored candidate");

        if ranking.best.is_none() || score.score > best_score {
            best_score = score.score;
            ranking.best = Some(ranking.candidates.len());
        }
        ranking.candidates.push(RankedCandidate {
            column: name.to_string(),
            score,
        });
    }

    ranking.selected = ranking.best_candidate().and_then(|best| {
        acceptance.decide(best.score.score).map(|tier| Selection {
            column: best.column.clone(),
            score: Some(best.score.score),
            tier,
        })
    });

    ranking
}

#[cfg(test)]
mod tests {
    use super::*;
    use survey_model::CellValue;

    fn column(name: &str) -> Column {
        Column::new(name, vec![CellValue::Missing])
    }

    fn fixed(scores: &'static [(&'static str, f64)]) -> impl FnMut(&Column) -> Option<ColumnScore> {
        move |c: &Column| {
            scores
                .iter()
                .find(|(name, _)| *name == c.name())
                .map(|(_, s)| ColumnScore::new(*s, "Fixed", "test score"))
        }
    }

    #[test]
    fn empty_pool_has_no_selection() {
        let ranking = rank(&[], fixed(&[]), &[], Acceptance::BestAvailable);
        assert!(ranking.selected.is_none());
        assert!(ranking.best.is_none());
    }

    #[test]
    fn ties_go_to_first_candidate() {
        let a = column("a");
        let b = column("b");
        let ranking = rank(
            &[&a, &b],
            fixed(&[("a", 0.7), ("b", 0.7)]),
            &[],
            Acceptance::AtLeast { threshold: 0.5 },
        );
        assert_eq!(ranking.selected_column(), Some("a"));
    }

    #[test]
    fn unscored_candidates_are_excluded() {
        let a = column("a");
        let b = column("b");
        let ranking = rank(
            &[&a, &b],
            fixed(&[("b", 0.1)]),
            &[],
            Acceptance::BestAvailable,
        );
        assert_eq!(ranking.unscored, vec!["a".to_string()]);
        assert_eq!(ranking.selected_column(), Some("b"));
    }

    #[test]
    fn threshold_is_inclusive() {
        let a = column("a");
        let accepted = rank(
            &[&a],
            fixed(&[("a", 0.5)]),
            &[],
            Acceptance::AtLeast { threshold: 0.5 },
        );
        assert_eq!(accepted.selected_column(), Some("a"));

        let rejected = rank(
            &[&a],
            fixed(&[("a", 0.499)]),
            &[],
            Acceptance::AtLeast { threshold: 0.5 },
        );
        assert!(rejected.selected.is_none());
        assert_eq!(rejected.best_candidate().map(|c| c.column.as_str()), Some("a"));
    }

    #[test]
    fn bonus_can_flip_a_close_winner() {
        let boosted = column("reason_boosted");
        let plain = column("plain");
        let bonus = NameBonus::new("boosted", NameBonus::DEFAULT_MULTIPLIER).unwrap();
        let ranking = rank(
            &[&boosted, &plain],
            fixed(&[("reason_boosted", 0.48), ("plain", 0.50)]),
            &[bonus],
            Acceptance::AtLeast { threshold: 0.5 },
        );
        let selection = ranking.selected.unwrap();
        assert_eq!(selection.column, "reason_boosted");
        assert!((selection.score.unwrap() - 0.528).abs() < 1e-9);
    }

    #[test]
    fn bonus_does_not_overturn_a_clear_winner() {
        let boosted = column("boosted");
        let plain = column("plain");
        let bonus = NameBonus::new("boosted", NameBonus::DEFAULT_MULTIPLIER).unwrap();
        let ranking = rank(
            &[&boosted, &plain],
            fixed(&[("boosted", 0.30), ("plain", 0.90)]),
            &[bonus],
            Acceptance::AtLeast { threshold: 0.5 },
        );
        assert_eq!(ranking.selected_column(), Some("plain"));
    }

    #[test]
    fn name_patterns_are_case_insensitive() {
        let bonus = NameBonus::new("exit|reason", 1.1).unwrap();
        assert!(bonus.matches("Exit_Why"));
        assert!(bonus.matches("CancelREASON"));
        assert!(!bonus.matches("comments"));
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let err = NameBonus::new("(", 1.1).unwrap_err();
        assert!(matches!(err, DetectError::InvalidPattern { .. }));
    }

    #[test]
    fn fallback_tier_is_reported() {
        let acceptance = Acceptance::WithFallback {
            primary: 0.6,
            fallback: 0.5,
        };
        assert_eq!(acceptance.decide(0.61), Some(AcceptanceTier::Primary));
        assert_eq!(acceptance.decide(0.55), Some(AcceptanceTier::Fallback));
        assert_eq!(acceptance.decide(0.49), None);
    }
}
