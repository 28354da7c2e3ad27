use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use survey_detect::{AcceptanceTier, Detection, DetectionReport, RankedCandidate};
use survey_model::{Dataset, Role};
use survey_report::{CancellationOverview, Priority};

pub fn print_detection(report: &DetectionReport, dataset: &Dataset) {
    println!(
        "Columns: {}  Rows: {}",
        dataset.width(),
        dataset.row_count()
    );
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Role"),
        header_cell("Column"),
        header_cell("Score"),
        header_cell("Accepted"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);

    for detection in &report.detections {
        let selection = detection.ranking.selected.as_ref();
        table.add_row(vec![
            role_cell(detection.role),
            match selection {
                Some(selection) => Cell::new(&selection.column),
                None => dim_cell("-"),
            },
            match selection.and_then(|s| s.score) {
                Some(score) => Cell::new(format!("{score:.3}")),
                None => dim_cell("-"),
            },
            tier_cell(selection.map(|s| s.tier)),
        ]);
    }
    println!("{table}");

    let unbound: Vec<&str> = dataset
        .column_names()
        .filter(|name| report.result.role_of(name).is_none())
        .collect();
    if !unbound.is_empty() {
        println!("Unbound columns: {}", unbound.join(", "));
    }
}

/// Prints every scored candidate of every role.
pub fn print_explanation(report: &DetectionReport) {
    for detection in &report.detections {
        println!();
        println!("{} ({})", detection.role, detection.role.description());
        if detection.ranking.candidates.is_empty() && detection.ranking.unscored.is_empty() {
            if let Some(selection) = &detection.ranking.selected {
                println!("  {} picked without scoring", selection.column);
            } else {
                println!("  no candidates");
            }
            continue;
        }
        println!("{}", candidate_table(detection));
    }
}

fn candidate_table(detection: &Detection) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Score"),
        header_cell("Components"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    let selected = detection.ranking.selected_column();
    for candidate in detection.ranking.sorted() {
        table.add_row(vec![
            candidate_cell(candidate, selected),
            Cell::new(format!("{:.3}", candidate.score.score)),
            Cell::new(candidate.score.explain()),
        ]);
    }
    for name in &detection.ranking.unscored {
        table.add_row(vec![dim_cell(name), dim_cell("-"), dim_cell("no data")]);
    }
    table
}

pub fn print_overview(overview: &CancellationOverview) {
    println!("Column: {}  Rows: {}", overview.column, overview.total_rows);
    if overview.is_empty() {
        println!("No answers recorded.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Category"),
        header_cell("Count"),
        header_cell("Percentage"),
        header_cell("Priority"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    for row in &overview.rows {
        table.add_row(vec![
            Cell::new(&row.category),
            Cell::new(row.count),
            Cell::new(format!("{:.1}%", row.percentage)),
            priority_cell(row.priority),
        ]);
    }
    println!("{table}");
}

pub fn print_roles() {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Role"), header_cell("Description")]);
    apply_table_style(&mut table);
    for role in Role::ALL {
        table.add_row(vec![role_cell(role), Cell::new(role.description())]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn role_cell(role: Role) -> Cell {
    Cell::new(role.as_str())
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn candidate_cell(candidate: &RankedCandidate, selected: Option<&str>) -> Cell {
    if selected == Some(candidate.column.as_str()) {
        Cell::new(format!("{} ✓", candidate.column))
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new(&candidate.column)
    }
}

fn tier_cell(tier: Option<AcceptanceTier>) -> Cell {
    match tier {
        Some(AcceptanceTier::Primary) => Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        Some(AcceptanceTier::Fallback) => Cell::new("fallback").fg(Color::Yellow),
        Some(AcceptanceTier::BestAvailable) => Cell::new("best").fg(Color::Yellow),
        Some(AcceptanceTier::SoleNumericColumn) => Cell::new("only numeric").fg(Color::Green),
        None => dim_cell("-"),
    }
}

fn priority_cell(priority: Priority) -> Cell {
    match priority {
        Priority::High => Cell::new(priority)
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Priority::Medium => Cell::new(priority).fg(Color::Yellow),
        Priority::Low => dim_cell(priority),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
