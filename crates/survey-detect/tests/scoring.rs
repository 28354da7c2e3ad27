use proptest::prelude::*;
use survey_detect::score::{
    date_fraction_and_uniqueness, exact_match_fraction, keyword_fraction, numeric_fraction,
    text_richness,
};
use survey_detect::{Acceptance, ColumnScore, NameBonus, rank};
use survey_model::{CellValue, Column};

fn cells(values: &[Option<String>]) -> Vec<CellValue> {
    values.iter().cloned().map(CellValue::from).collect()
}

fn answers() -> impl Strategy<Value = Vec<Option<String>>> {
    prop::collection::vec(prop::option::of("[A-Za-z0-9 ,.!'-]{0,24}"), 0..40)
}

proptest! {
    #[test]
    fn fractions_stay_in_unit_interval(values in answers()) {
        let values = cells(&values);
        let keyword = keyword_fraction(&values, &["sen", "parent", "a"]);
        prop_assert!((0.0..=1.0).contains(&keyword));
        prop_assert!((0.0..=1.0).contains(&numeric_fraction(&values)));
        if let Some(exact) = exact_match_fraction(&values, &["Other", "Price"]) {
            prop_assert!((0.0..=1.0).contains(&exact));
        }
        let date = date_fraction_and_uniqueness(&values);
        prop_assert!(date.uniqueness_ratio <= date.parsed_fraction);
        prop_assert!((0.0..=1.0).contains(&date.composite()));
    }

    #[test]
    fn keyword_matching_ignores_case(values in answers()) {
        let upper: Vec<Option<String>> = values
            .iter()
            .map(|v| v.as_ref().map(|s| s.to_uppercase()))
            .collect();
        let keywords = ["tutor", "ks3", "grade"];
        prop_assert_eq!(
            keyword_fraction(&cells(&values), &keywords),
            keyword_fraction(&cells(&upper), &keywords)
        );
    }

    #[test]
    fn adding_keyword_rows_never_lowers_the_fraction(
        values in answers(),
        extra in prop::collection::vec("[a-z ]{0,6}(tutor|parent|ks3)[a-z ]{0,6}", 1..10),
    ) {
        let keywords = ["tutor", "parent", "ks3"];
        let before = keyword_fraction(&cells(&values), &keywords);
        let mut extended = values.clone();
        extended.extend(extra.into_iter().map(Some));
        prop_assert!(keyword_fraction(&cells(&extended), &keywords) >= before);
    }

    #[test]
    fn exact_matching_ignores_case_and_padding(
        picks in prop::collection::vec((0usize..4, any::<bool>(), " {0,3}", " {0,3}"), 1..30),
    ) {
        let pool = ["Other", "Price", "Customer Service", "Mars"];
        let expected = ["other", "Price", "customer service"];
        let canonical: Vec<Option<String>> =
            picks.iter().map(|(i, ..)| Some(pool[*i].to_string())).collect();
        let noisy: Vec<Option<String>> = picks
            .iter()
            .map(|(i, upper, lead, trail)| {
                let answer = if *upper { pool[*i].to_uppercase() } else { pool[*i].to_lowercase() };
                Some(format!("{lead}{answer}{trail}"))
            })
            .collect();
        prop_assert_eq!(
            exact_match_fraction(&cells(&canonical), &expected),
            exact_match_fraction(&cells(&noisy), &expected)
        );
    }

    #[test]
    fn text_stats_are_finite(values in answers()) {
        if let Some(stats) = text_richness(&cells(&values)) {
            prop_assert!(stats.mean_length.is_finite());
            prop_assert!(stats.mean_punctuation <= stats.mean_length);
            prop_assert!(stats.uniqueness_ratio > 0.0 && stats.uniqueness_ratio <= 1.0);
        }
    }

    #[test]
    fn rank_selects_first_maximum(scores in prop::collection::vec(0.0f64..1.0, 1..12)) {
        let columns: Vec<Column> = (0..scores.len())
            .map(|i| Column::new(format!("c{i}"), vec![CellValue::Missing]))
            .collect();
        let refs: Vec<&Column> = columns.iter().collect();
        let ranking = rank(
            &refs,
            |column| {
                let index: usize = column.name()[1..].parse().ok()?;
                Some(ColumnScore::new(scores[index], "Fixed", "generated"))
            },
            &[],
            Acceptance::BestAvailable,
        );

        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let first = scores.iter().position(|s| *s == max).unwrap();
        prop_assert_eq!(ranking.best, Some(first));
        let expected = format!("c{first}");
        prop_assert_eq!(ranking.selected_column(), Some(expected.as_str()));
    }

    #[test]
    fn name_bonus_never_demotes_the_boosted_winner(
        scores in prop::collection::vec(0.0f64..1.0, 2..8),
        multiplier in 1.0f64..3.0,
    ) {
        let columns: Vec<Column> = (0..scores.len())
            .map(|i| Column::new(format!("c{i}"), vec![CellValue::Missing]))
            .collect();
        let refs: Vec<&Column> = columns.iter().collect();
        let score_fn = |column: &Column| {
            let index: usize = column.name()[1..].parse().ok()?;
            Some(ColumnScore::new(scores[index], "Fixed", "generated"))
        };

        let plain = rank(&refs, score_fn, &[], Acceptance::BestAvailable);
        let winner = plain.selected_column().unwrap().to_string();
        let bonus = NameBonus::new(&format!("^{winner}$"), multiplier).unwrap();
        let boosted = rank(&refs, score_fn, &[bonus], Acceptance::BestAvailable);
        prop_assert_eq!(boosted.selected_column(), Some(winner.as_str()));
    }
}
