use clap::{Parser, Subcommand};

use self::{report::ReportArg, summary::SummaryArg, trajectory::TrajectoryArg};

mod report;
mod summary;
mod trajectory;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What to do with the session log
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Write the analysis report and the error-pattern export
    Report(#[clap(flatten)] ReportArg),
    /// Print the per-stage breakdowns of a session
    Summary(#[clap(flatten)] SummaryArg),
    /// Export the ability trajectory series as JSON
    Trajectory(#[clap(flatten)] TrajectoryArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Report(arg) => report::run(&arg)?,
        Mode::Summary(arg) => summary::run(&arg)?,
        Mode::Trajectory(arg) => trajectory::run(&arg)?,
    }
    Ok(())
}
