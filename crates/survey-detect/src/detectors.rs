//! Role detectors: fixed scorer, pool, threshold, and bonus configurations.
//!
//! Each role is a row in a strategy table ([`DetectorConfig`]). The
//! `detect_*` functions build the row for one role and run it against a
//! caller-supplied candidate slice, which keeps every detector usable on its
//! own.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use survey_model::{Column, DetectionOptions, Role};
use tracing::debug;

use crate::pool::{PoolFilter, numeric_typed};
use crate::rank::{Acceptance, AcceptanceTier, NameBonus, Ranking, rank};
use crate::score::{
    ColumnScore, TextStats, date_fraction_and_uniqueness, exact_match_fraction, keyword_fraction,
    numeric_fraction, text_richness,
};

/// Keywords identifying the career/membership segment.
pub const CAREER_KEYWORDS: &[&str] = &["ks3", "parent", "sen", "tutor", "grade", "esl"];

/// Country names seen in member exports.
pub const COUNTRY_KEYWORDS: &[&str] = &[
    "poland",
    "england",
    "united states",
    "romania",
    "jordan",
    "kazakhstan",
    "thailand",
    "italy",
    "philippines",
    "australia",
    "india",
    "south africa",
    "south korea",
    "vietnam",
    "norway",
    "moldova",
    "malaysia",
    "austria",
    "chile",
    "cameroon",
];

/// Answer options of the exit survey's primary question.
pub const EXIT_REASON_VALUES: &[&str] = &[
    "I can't afford it right now",
    "I'm not using the membership enough",
    "Other",
    "I am on family leave",
    "I can't find the resources I need",
    "I've changed careers",
    "I'm using an alternative resource provider",
    "My school has subscribed",
    "I'm unwell and not working at the moment",
    "I'm retiring",
];

/// Answer options of the exit survey's follow-up question.
pub const SECONDARY_REASON_VALUES: &[&str] = &[
    "Customer Service",
    "Resource Quality",
    "Variety of Materials",
    "Price",
    "Ease of Website",
    "other",
];

// Freeform composite weights.
const LENGTH_WEIGHT: f64 = 0.4;
const PUNCTUATION_WEIGHT: f64 = 0.3;
const UNIQUENESS_WEIGHT: f64 = 0.3;
/// Floor for normalization maxima.
const NORM_EPSILON: f64 = 1e-9;
const COMMENT_NAME_BONUS: f64 = 3.1;
const USAGE_NAME_PENALTY: f64 = 0.5;
const LOW_UNIQUENESS_PENALTY: f64 = 0.5;

fn name_pattern(pattern: &str) -> Regex {
    regex::RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .expect("Invalid built-in name pattern")
}

static COMMENT_NAME: LazyLock<Regex> = LazyLock::new(|| name_pattern("additional_comment"));
static USAGE_NAME: LazyLock<Regex> = LazyLock::new(|| name_pattern("usage_reason"));
static CAREER_NAME: LazyLock<Regex> = LazyLock::new(|| name_pattern("career"));
static COUNTRY_NAME: LazyLock<Regex> = LazyLock::new(|| name_pattern("country"));
static EXIT_NAME: LazyLock<Regex> = LazyLock::new(|| name_pattern("exit|reason"));
static SECONDARY_NAME: LazyLock<Regex> = LazyLock::new(|| name_pattern("secondary|reason"));
static DATE_NAME: LazyLock<Regex> = LazyLock::new(|| name_pattern("date|time"));

/// Content scorer used by a detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Strategy {
    /// Fraction of numerically parseable rows, with the single-numeric-column
    /// shortcut.
    NumericFraction,
    /// Length, punctuation, and uniqueness composite normalized across the pool.
    TextRichness { low_uniqueness_cutoff: f64 },
    /// Keyword substring containment.
    Keywords(&'static [&'static str]),
    /// Membership in a fixed answer set.
    ExactValues(&'static [&'static str]),
    /// Date parse fraction and uniqueness composite.
    DateComposite,
}

/// One row of the detector table.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    pub role: Role,
    pub pool: PoolFilter,
    pub strategy: Strategy,
    pub acceptance: Acceptance,
    pub bonuses: Vec<NameBonus>,
}

/// Result of running one detector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detection {
    pub role: Role,
    pub ranking: Ranking,
}

impl Detection {
    /// The bound column, if the detector accepted one.
    pub fn column(&self) -> Option<&str> {
        self.ranking.selected_column()
    }
}

impl DetectorConfig {
    /// Builds the configuration of `role` from `options`.
    pub fn for_role(role: Role, options: &DetectionOptions) -> Self {
        let category = Acceptance::AtLeast {
            threshold: options.category_threshold,
        };
        let bonus =
            |pattern: Regex| vec![NameBonus::from_regex(pattern, options.name_bonus_multiplier)];

        match role {
            Role::NumericScore => Self {
                role,
                pool: PoolFilter::AllColumns,
                strategy: Strategy::NumericFraction,
                acceptance: Acceptance::AtLeast {
                    threshold: options.min_numeric_fraction,
                },
                bonuses: Vec::new(),
            },
            Role::FreeformAnswer => Self {
                role,
                pool: PoolFilter::TextColumns,
                strategy: Strategy::TextRichness {
                    low_uniqueness_cutoff: options.low_uniqueness_cutoff,
                },
                acceptance: Acceptance::BestAvailable,
                bonuses: vec![
                    NameBonus::from_regex(COMMENT_NAME.clone(), COMMENT_NAME_BONUS),
                    NameBonus::from_regex(USAGE_NAME.clone(), USAGE_NAME_PENALTY),
                ],
            },
            Role::Career => Self {
                role,
                pool: PoolFilter::TextColumns,
                strategy: Strategy::Keywords(CAREER_KEYWORDS),
                acceptance: category,
                bonuses: bonus(CAREER_NAME.clone()),
            },
            Role::Country => Self {
                role,
                pool: PoolFilter::TextColumns,
                strategy: Strategy::Keywords(COUNTRY_KEYWORDS),
                acceptance: category,
                bonuses: bonus(COUNTRY_NAME.clone()),
            },
            Role::ExitReason => Self {
                role,
                pool: PoolFilter::TextColumns,
                strategy: Strategy::ExactValues(EXIT_REASON_VALUES),
                acceptance: category,
                bonuses: bonus(EXIT_NAME.clone()),
            },
            Role::SecondaryReason => Self {
                role,
                pool: PoolFilter::TextColumns,
                strategy: Strategy::ExactValues(SECONDARY_REASON_VALUES),
                acceptance: category,
                bonuses: bonus(SECONDARY_NAME.clone()),
            },
            Role::Date => Self {
                role,
                pool: PoolFilter::AllColumns,
                strategy: Strategy::DateComposite,
                acceptance: Acceptance::WithFallback {
                    primary: options.date_threshold,
                    fallback: options.date_fallback_threshold,
                },
                bonuses: vec![NameBonus::from_regex(
                    DATE_NAME.clone(),
                    options.date_name_bonus,
                )],
            },
        }
    }

    /// Runs the detector over `candidates`, which must already respect
    /// [`Self::pool`].
    pub fn detect(&self, candidates: &[&Column]) -> Detection {
        let ranking = match self.strategy {
            Strategy::NumericFraction => self.rank_numeric(candidates),
            Strategy::TextRichness {
                low_uniqueness_cutoff,
            } => self.rank_freeform(candidates, low_uniqueness_cutoff),
            Strategy::Keywords(keywords) => rank(
                candidates,
                |column| {
                    let fraction = keyword_fraction(column.values(), keywords);
                    Some(ColumnScore::new(
                        fraction,
                        "Keyword match",
                        format!("{:.0}% of values contain a known keyword", fraction * 100.0),
                    ))
                },
                &self.bonuses,
                self.acceptance,
            ),
            Strategy::ExactValues(expected) => rank(
                candidates,
                |column| {
                    exact_match_fraction(column.values(), expected).map(|fraction| {
                        ColumnScore::new(
                            fraction,
                            "Exact match",
                            format!("{:.0}% of values are known answers", fraction * 100.0),
                        )
                    })
                },
                &self.bonuses,
                self.acceptance,
            ),
            Strategy::DateComposite => rank(
                candidates,
                |column| {
                    let date = date_fraction_and_uniqueness(column.values());
                    Some(
                        ColumnScore::new(
                            date.composite(),
                            "Date composite",
                            "0.6 x parsed + 0.4 x distinct",
                        )
                        .with_component(
                            "Parsed dates",
                            date.parsed_fraction,
                            "fraction of rows parsed as dates",
                        )
                        .with_component(
                            "Distinct dates",
                            date.uniqueness_ratio,
                            "distinct parsed dates per row",
                        ),
                    )
                },
                &self.bonuses,
                self.acceptance,
            ),
        };

        match ranking.selected.as_ref() {
            Some(selection) => debug!(
                role = %self.role,
                column = %selection.column,
                tier = ?selection.tier,
                "detector accepted candidate"
            ),
            None => debug!(
                role = %self.role,
                candidates = candidates.len(),
                "detector found no match"
            ),
        }

        Detection {
            role: self.role,
            ranking,
        }
    }

    fn rank_numeric(&self, candidates: &[&Column]) -> Ranking {
        if let [only] = numeric_typed(candidates).as_slice() {
            return Ranking::direct(only.name(), AcceptanceTier::SoleNumericColumn);
        }
        rank(
            candidates,
            |column| {
                let fraction = numeric_fraction(column.values());
                Some(ColumnScore::new(
                    fraction,
                    "Numeric rows",
                    format!("{:.0}% of rows parse as numbers", fraction * 100.0),
                ))
            },
            &self.bonuses,
            self.acceptance,
        )
    }

    fn rank_freeform(&self, candidates: &[&Column], low_uniqueness_cutoff: f64) -> Ranking {
        let stats: BTreeMap<&str, TextStats> = candidates
            .iter()
            .filter_map(|column| text_richness(column.values()).map(|s| (column.name(), s)))
            .collect();

        let max_length = stats
            .values()
            .map(|s| s.mean_length)
            .fold(0.0, f64::max)
            .max(NORM_EPSILON);
        let max_punctuation = stats
            .values()
            .map(|s| s.mean_punctuation)
            .fold(0.0, f64::max)
            .max(NORM_EPSILON);

        rank(
            candidates,
            |column| {
                let s = stats.get(column.name())?;
                let length = s.mean_length / max_length;
                let punctuation = s.mean_punctuation / max_punctuation;
                let composite = LENGTH_WEIGHT * length
                    + PUNCTUATION_WEIGHT * punctuation
                    + UNIQUENESS_WEIGHT * s.uniqueness_ratio;

                let mut score = ColumnScore::new(
                    composite,
                    "Text richness",
                    "0.4 x length + 0.3 x punctuation + 0.3 x uniqueness",
                )
                .with_component("Length", length, format!("mean {:.1} chars", s.mean_length))
                .with_component(
                    "Punctuation",
                    punctuation,
                    format!("mean {:.2} marks", s.mean_punctuation),
                )
                .with_component("Uniqueness", s.uniqueness_ratio, "distinct values ratio");

                if s.uniqueness_ratio < low_uniqueness_cutoff {
                    score.scale(
                        "Low uniqueness",
                        LOW_UNIQUENESS_PENALTY,
                        format!("uniqueness below {low_uniqueness_cutoff}"),
                    );
                }
                Some(score)
            },
            &self.bonuses,
            self.acceptance,
        )
    }
}

/// Detector table in resolution order.
pub fn detector_table(options: &DetectionOptions) -> Vec<DetectorConfig> {
    Role::ALL
        .into_iter()
        .map(|role| DetectorConfig::for_role(role, options))
        .collect()
}

/// Detects the numeric score column among `candidates`.
pub fn detect_numeric(candidates: &[&Column], options: &DetectionOptions) -> Detection {
    DetectorConfig::for_role(Role::NumericScore, options).detect(candidates)
}

/// Detects the freeform answer column among the text columns of `candidates`.
///
/// There is no acceptance threshold: any text column with data can win, even
/// on datasets without a real free-text question.
pub fn detect_freeform_answer(candidates: &[&Column], options: &DetectionOptions) -> Detection {
    run_filtered(Role::FreeformAnswer, candidates, options)
}

pub fn detect_career(candidates: &[&Column], options: &DetectionOptions) -> Detection {
    run_filtered(Role::Career, candidates, options)
}

pub fn detect_country(candidates: &[&Column], options: &DetectionOptions) -> Detection {
    run_filtered(Role::Country, candidates, options)
}

pub fn detect_exit_reason(candidates: &[&Column], options: &DetectionOptions) -> Detection {
    run_filtered(Role::ExitReason, candidates, options)
}

pub fn detect_secondary_reason(candidates: &[&Column], options: &DetectionOptions) -> Detection {
    run_filtered(Role::SecondaryReason, candidates, options)
}

/// Detects the date column; accepts 0.6 and above, then falls back to 0.5.
pub fn detect_date(candidates: &[&Column], options: &DetectionOptions) -> Detection {
    run_filtered(Role::Date, candidates, options)
}

fn run_filtered(role: Role, candidates: &[&Column], options: &DetectionOptions) -> Detection {
    let config = DetectorConfig::for_role(role, options);
    let filtered: Vec<&Column> = match config.pool {
        PoolFilter::AllColumns => candidates.to_vec(),
        PoolFilter::TextColumns => candidates
            .iter()
            .copied()
            .filter(|column| column.kind().holds_text())
            .collect(),
    };
    config.detect(&filtered)
}
