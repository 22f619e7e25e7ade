//! Group and trajectory table display
//!
//! Prints the stratified aggregates and the θ trajectory in a consistent
//! tabular format.

use std::collections::BTreeMap;

use jacet_analysis::{stratify::GroupAggregate, trajectory::TrajectorySeriesPoint};
use jacet_stats::proportion::round_to;

/// A row in a group table
pub(super) struct GroupTableRow<'a> {
    /// Label for this row (e.g., level, part of speech)
    pub label: String,
    /// Aggregate statistics for this row
    pub aggregate: &'a GroupAggregate,
}

impl<'a> GroupTableRow<'a> {
    pub(super) fn from_map<K, F>(map: &'a BTreeMap<K, GroupAggregate>, mut label: F) -> Vec<Self>
    where
        F: FnMut(&K) -> String,
    {
        map.iter()
            .map(|(key, aggregate)| GroupTableRow {
                label: label(key),
                aggregate,
            })
            .collect()
    }
}

/// Formats an optional value rounded to 2 decimal places
fn fmt_rounded(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{:.2}", round_to(v, 2)))
}

fn print_group_table_header(label_col: &str) {
    println!(
        "  {:<16} {:>10} {:>13} {:>10} {:>14} {:>10} {:>10} {:>10}",
        label_col,
        "Item Count",
        "Correct Count",
        "Accuracy",
        "Avg. Time (s)",
        "Min (s)",
        "Median (s)",
        "Max (s)",
    );
}

fn print_group_table_separator() {
    // label(16) + count(10) + correct(13) + accuracy(10) + avg(14) + min/median/max(30) + spaces(7)
    println!("  {}", "-".repeat(100));
}

fn print_group_table_row(row: &GroupTableRow) {
    let aggregate = row.aggregate;
    let spread = aggregate.response_time_sec.as_ref();

    println!(
        "  {:<16} {:>10} {:>13} {:>10} {:>14} {:>10} {:>10} {:>10}",
        row.label,
        aggregate.item_count(),
        aggregate.correct_count(),
        fmt_rounded(aggregate.accuracy()),
        fmt_rounded(aggregate.mean_response_time_sec()),
        fmt_rounded(spread.map(|s| s.min)),
        fmt_rounded(spread.map(|s| s.median)),
        fmt_rounded(spread.map(|s| s.max)),
    );
}

/// Print a formatted group statistics table
///
/// # Arguments
/// * `label_col` - Name of the label column
/// * `rows` - Table rows, in display order
pub(super) fn print_group_table(label_col: &str, rows: &[GroupTableRow]) {
    print_group_table_header(label_col);
    print_group_table_separator();

    for row in rows {
        print_group_table_row(row);
    }
}

/// Print the θ trajectory with its ±SE band
pub(super) fn print_trajectory_table(points: &[TrajectorySeriesPoint]) {
    println!(
        "  {:>8} {:>9} {:>8} {:>11} {:>11} {:>8}",
        "Question", "θ", "SE", "Upper(θ+SE)", "Lower(θ-SE)", "Result"
    );
    // question(8) + theta(9) + se(8) + upper(11) + lower(11) + result(8) + spaces(5)
    println!("  {}", "-".repeat(60));

    for point in points {
        println!(
            "  {:>8} {:>9.3} {:>8.3} {:>11.3} {:>11.3} {:>8}",
            point.question,
            point.theta,
            point.se,
            point.upper,
            point.lower,
            if point.correct { "correct" } else { "wrong" },
        );
    }
}

/// Print legend explaining table columns
pub(super) fn print_legend() {
    println!("Legend:");
    println!("  Accuracy      : Correct Count / Item Count (rounded to 2 decimals)");
    println!("  Avg. Time (s) : Mean response time in seconds");
    println!("  Min/Median/Max: Response time spread in seconds");
}
