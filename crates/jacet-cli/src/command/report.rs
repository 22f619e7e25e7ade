use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::util::{self, Output};

#[derive(Debug, Clone, Args)]
pub(crate) struct ReportArg {
    /// Path to the session log (JSON format)
    pub session: PathBuf,

    /// Path to write the Markdown report to
    #[arg(long, default_value = "cat_analysis_report.md")]
    pub report: PathBuf,

    /// Path to write the error-pattern export (JSON) to
    #[arg(long, default_value = "error_patterns.json")]
    pub error_patterns: PathBuf,
}

pub(crate) fn run(arg: &ReportArg) -> anyhow::Result<()> {
    let analysis = util::analyze_session_file(&arg.session)?;

    // Both artifacts are rendered before any file is created
    let report = analysis.report();
    let error_patterns_json = report
        .error_patterns_json()
        .context("Failed to serialize error patterns")?;

    // Both destinations are opened before either is written
    let mut report_output = Output::open(arg.report.clone())?;
    let mut export_output = match Output::open(arg.error_patterns.clone()) {
        Ok(output) => output,
        Err(err) => {
            report_output.discard();
            return Err(err);
        }
    };

    if let Err(err) = report_output.write_text(&report.text) {
        report_output.discard();
        export_output.discard();
        return Err(err);
    }
    eprintln!("Saved report to {}", arg.report.display());

    export_output.write_text(&error_patterns_json)?;
    eprintln!(
        "Saved {} error patterns to {}",
        report.error_patterns.len(),
        arg.error_patterns.display()
    );

    Ok(())
}
