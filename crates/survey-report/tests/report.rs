use insta::assert_json_snapshot;
use survey_detect::auto_detect_columns;
use survey_model::{Column, Dataset, Role};
use survey_report::{
    Priority, cancellation_overview, extract_roles, remove_numeric_or_special_responses,
};

fn reasons() -> Column {
    Column::from_text(
        "exit_why",
        &[
            Some("I'm retiring"),
            Some("I can't afford it right now"),
            Some("I'm retiring"),
            Some("Other"),
            Some("I'm retiring"),
            Some("I can't afford it right now"),
            Some("My school has subscribed"),
            None,
        ],
    )
}

#[test]
fn overview_snapshot() {
    let overview = cancellation_overview(&reasons(), 8);
    assert_json_snapshot!(overview, @r###"
    {
      "column": "exit_why",
      "total_rows": 8,
      "rows": [
        {
          "category": "I'm retiring",
          "count": 3,
          "percentage": 37.5,
          "priority": "High"
        },
        {
          "category": "I can't afford it right now",
          "count": 2,
          "percentage": 25.0,
          "priority": "Medium"
        },
        {
          "category": "Other",
          "count": 1,
          "percentage": 12.5,
          "priority": "Medium"
        },
        {
          "category": "My school has subscribed",
          "count": 1,
          "percentage": 12.5,
          "priority": "Medium"
        }
      ]
    }
    "###);
}

#[test]
fn priorities_follow_count_quantiles() {
    let column = Column::from_text(
        "why",
        &[
            Some("a"),
            Some("a"),
            Some("a"),
            Some("a"),
            Some("b"),
            Some("b"),
            Some("c"),
        ],
    );
    let overview = cancellation_overview(&column, 7);
    let priorities: Vec<Priority> = overview.rows.iter().map(|r| r.priority).collect();
    assert_eq!(
        priorities,
        vec![Priority::High, Priority::Medium, Priority::Low]
    );
}

#[test]
fn detect_filter_and_extract() {
    let dataset = Dataset::new(vec![
        Column::from_numbers(
            "rating",
            &[Some(5.0), Some(3.0), Some(4.0), Some(1.0), Some(2.0)],
        ),
        Column::from_text(
            "feedback",
            &[
                Some("Great worksheets, thank you so much!"),
                Some("10"),
                Some("Too pricey; I'll come back in September."),
                Some("???"),
                Some("The search is hard to use, sadly."),
            ],
        ),
        Column::from_text(
            "country",
            &[
                Some("Poland"),
                Some("Chile"),
                Some("India"),
                Some("Italy"),
                Some("Norway"),
            ],
        ),
    ])
    .unwrap();

    let result = auto_detect_columns(&dataset);
    assert_eq!(result.get(Role::FreeformAnswer), Some("feedback"));

    let filtered = remove_numeric_or_special_responses(&dataset, "feedback").unwrap();
    assert_eq!(filtered.row_count(), 3);

    let extracted = extract_roles(&filtered, &result).unwrap();
    assert_eq!(
        extracted.column_names().collect::<Vec<_>>(),
        vec!["numeric_score", "freeform_answer", "country"]
    );
    assert_eq!(extracted.row_count(), 3);
}
