//! Session summary command
//!
//! Prints the per-stage breakdowns of one session: basic vocabulary
//! statistics, the θ trajectory, level and part-of-speech tables, incorrect
//! response details, reading metrics and the mouse track.

mod table;

use std::path::PathBuf;

use clap::Args;
use jacet_analysis::{error_pattern::ErrorPatternRecord, pipeline::SessionAnalysis};

use crate::{command::summary::table::GroupTableRow, util};

#[derive(Debug, Clone, Args)]
pub(crate) struct SummaryArg {
    /// Path to the session log (JSON format)
    pub session: PathBuf,
}

pub(crate) fn run(arg: &SummaryArg) -> anyhow::Result<()> {
    let analysis = util::analyze_session_file(&arg.session)?;

    println!("JACET CAT Session Summary ({})", analysis.session_id);
    println!("==========================================\n");

    print_basic_stats(&analysis);
    println!();

    println!("Ability Score (θ) Progression");
    table::print_trajectory_table(&analysis.trajectory.series());
    if !analysis.lengths_match() {
        println!(
            "  ⚠ {} trajectory points vs {} vocabulary responses",
            analysis.trajectory.len(),
            analysis.responses.len()
        );
    }
    println!();

    table::print_legend();
    println!();

    println!("Analysis by Level");
    let rows = GroupTableRow::from_map(&analysis.levels.map, ToString::to_string);
    table::print_group_table("Level", &rows);
    println!();

    println!("Analysis by Part of Speech");
    let rows = GroupTableRow::from_map(&analysis.parts_of_speech.map, Clone::clone);
    table::print_group_table("Part of Speech", &rows);
    println!();

    print_incorrect_responses(&analysis.error_patterns);
    println!();

    print_reading(&analysis);
    println!();

    print_mouse_track(&analysis);

    Ok(())
}

fn print_basic_stats(analysis: &SessionAnalysis) {
    let summary = analysis.response_summary();

    println!("Vocabulary Test:");
    println!("  Total items: {}", summary.item_count());
    println!("  Correct answers: {}", summary.correct_count());
    match summary.accuracy.percentage() {
        Some(pct) => println!("  Accuracy: {pct:.1}%"),
        None => println!("  Accuracy: N/A"),
    }
    match summary.mean_response_time_sec {
        Some(mean) => println!("  Average response time: {mean:.1} seconds"),
        None => println!("  Average response time: N/A"),
    }
}

fn print_incorrect_responses(records: &[ErrorPatternRecord]) {
    println!("Incorrect Response Details ({}):", records.len());
    for record in records {
        println!();
        println!("  Word: {}", record.item);
        println!("  Correct Answer: {}", record.correct_answer);
        println!("  Selected: {}", record.selected_answer);
        println!("  Level: {}", record.level);
        println!("  Part of Speech: {}", record.part_of_speech);
        println!("  Response Time: {:.1} seconds", record.response_time_sec);
        println!("  Pattern: {}", record.pattern);
    }
}

fn print_reading(analysis: &SessionAnalysis) {
    let reading = &analysis.reading;

    println!("Reading Test (level {}K):", reading.level);
    for record in &reading.records {
        println!();
        println!("  {}:", record.text_type.title());
        println!("    Word Count: {}", record.word_count);
        println!("    Reading Time: {:.1} seconds", record.elapsed_secs);
        println!("    Reading Speed: {:.0} WPM", record.wpm);
        if let Some(secs) = record.question1_secs {
            println!("    Q1 Time: {secs:.1} seconds");
        }
        if let Some(secs) = record.question2_secs {
            println!("    Q2 Time: {secs:.1} seconds");
        }
        if let Some(secs) = record.total_secs {
            println!("    Total Time: {secs:.1} seconds");
        }
        for (q_num, answer) in record.answers.iter().enumerate() {
            println!(
                "    Q{} Answer: '{}' ({} characters)",
                q_num + 1,
                answer.answer,
                answer.char_count
            );
        }
        if let Some(anomaly) = &record.anomaly {
            println!("    ⚠ {anomaly}");
        }
    }

    if !reading.phase_counts.is_empty() {
        println!();
        println!("  Logged reading responses:");
        for (phase, count) in &reading.phase_counts {
            println!("    {phase}: {count}");
        }
    }
}

fn print_mouse_track(analysis: &SessionAnalysis) {
    println!("Mouse Tracking:");
    match analysis.mouse.summary() {
        Some(summary) => {
            println!("  Samples: {}", summary.sample_count);
            println!("  Tracked time: {:.1} seconds", summary.tracked_secs);
            println!(
                "  X range: {:.0} - {:.0}",
                summary.x_range.0, summary.x_range.1
            );
            println!(
                "  Y range: {:.0} - {:.0}",
                summary.y_range.0, summary.y_range.1
            );
        }
        None => println!("  No mouse movements recorded"),
    }
}
