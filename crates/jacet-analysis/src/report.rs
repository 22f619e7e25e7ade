//! Report synthesis
//!
//! Composes the derived views of a session into two artifacts:
//!
//! - a Markdown text report with a fixed section order
//!   (session info, vocabulary results, error analysis, reading results,
//!   level breakdown, data-quality notes, application suggestions)
//! - the error-pattern records, serialized as pretty UTF-8 JSON
//!
//! Both are built in memory; writing them out is left to the caller.

use std::fmt;

use jacet_stats::proportion::round_to;

use crate::{
    error_pattern::{self, ErrorPatternRecord},
    pipeline::SessionAnalysis,
    session::TextType,
};

const SUGGESTIONS: [&str; 3] = [
    "**Automated Distractor Generation**: Based on phonological similarity",
    "**Answer Quality Monitoring**: Real-time response checking system",
    "**Adaptive Difficulty Tuning**: Dynamic adjustment using Neural-IRT",
];

/// The terminal output of the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Markdown report
    pub text: String,
    /// Incorrect responses with their classification, in presentation order
    pub error_patterns: Vec<ErrorPatternRecord>,
}

impl Report {
    #[must_use]
    pub fn synthesize(analysis: &SessionAnalysis) -> Self {
        Self {
            text: ReportDocument(analysis).to_string(),
            error_patterns: analysis.error_patterns.clone(),
        }
    }

    /// Error-pattern export as indented JSON; non-ASCII text is kept as is.
    pub fn error_patterns_json(&self) -> serde_json::Result<String> {
        let mut json = serde_json::to_string_pretty(&self.error_patterns)?;
        json.push('\n');
        Ok(json)
    }
}

struct ReportDocument<'a>(&'a SessionAnalysis);

fn fmt_percentage(rate: Option<f64>) -> String {
    rate.map_or_else(|| "N/A".to_owned(), |r| format!("{:.1}%", r * 100.0))
}

impl fmt::Display for ReportDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let analysis = self.0;
        let summary = analysis.response_summary();

        writeln!(f, "# JACET CAT Analysis Report")?;
        writeln!(f)?;
        writeln!(f, "## Session Info")?;
        writeln!(f, "- Session ID: {}", analysis.session_id)?;
        writeln!(f, "- Date/Time: {}", analysis.start_time)?;
        writeln!(
            f,
            "- Total Duration: {:.1} minutes",
            analysis.total_duration_minutes()
        )?;
        writeln!(f)?;

        writeln!(f, "## Vocabulary Test Results")?;
        writeln!(
            f,
            "- Estimated Vocabulary Size: {:.0} words",
            analysis.vocabulary.vocab_size.trunc()
        )?;
        writeln!(f, "- Accuracy: {}", fmt_percentage(summary.accuracy.rate()))?;
        writeln!(
            f,
            "- Final Ability Score (θ): {:.3}",
            analysis.vocabulary.theta
        )?;
        writeln!(f, "- Standard Error (SE): {:.3}", analysis.vocabulary.se)?;
        writeln!(f)?;

        writeln!(f, "## Error Analysis")?;
        writeln!(
            f,
            "- Number of Incorrect Responses: {}",
            analysis.incorrect_count()
        )?;
        writeln!(
            f,
            "- Main Error Pattern: {}",
            error_pattern::dominant_pattern(&analysis.error_patterns).title()
        )?;
        writeln!(f)?;

        writeln!(f, "## Reading Test Results")?;
        writeln!(f, "- Reading Level: {}K", analysis.reading.level)?;
        for text_type in TextType::ALL {
            writeln!(
                f,
                "- {} Reading Speed: {:.0} WPM",
                text_type.title(),
                analysis.reading.wpm(text_type).trunc()
            )?;
        }
        writeln!(f)?;

        writeln!(f, "## Accuracy by Level")?;
        writeln!(
            f,
            "| Level | Item Count | Correct Count | Accuracy | Avg. Response Time (sec) |"
        )?;
        writeln!(
            f,
            "|------:|-----------:|--------------:|---------:|-------------------------:|"
        )?;
        for (level, aggregate) in &analysis.levels.map {
            let accuracy = aggregate
                .accuracy()
                .map_or_else(|| "N/A".to_owned(), |a| format!("{:.2}", round_to(a, 2)));
            let mean_time = aggregate
                .mean_response_time_sec()
                .map_or_else(|| "N/A".to_owned(), |t| format!("{:.2}", round_to(t, 2)));
            writeln!(
                f,
                "| {level} | {} | {} | {accuracy} | {mean_time} |",
                aggregate.item_count(),
                aggregate.correct_count(),
            )?;
        }
        writeln!(f)?;

        writeln!(f, "## Data Quality Notes")?;
        let mut noted = false;
        for anomaly in analysis.reading.anomalies() {
            writeln!(f, "- {anomaly}; reading speed reported as 0 WPM")?;
            noted = true;
        }
        if !analysis.lengths_match() {
            writeln!(
                f,
                "- Ability trajectory has {} points but {} vocabulary responses were logged",
                analysis.trajectory.len(),
                analysis.responses.len()
            )?;
            noted = true;
        }
        if !noted {
            writeln!(f, "- None")?;
        }
        writeln!(f)?;

        writeln!(f, "## AI Application Suggestions")?;
        for (i, suggestion) in SUGGESTIONS.iter().enumerate() {
            writeln!(f, "{}. {suggestion}", i + 1)?;
        }

        Ok(())
    }
}
