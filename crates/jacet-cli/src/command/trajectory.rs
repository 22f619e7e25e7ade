use std::path::PathBuf;

use clap::Args;

use crate::util::{self, Output};

#[derive(Debug, Clone, Args)]
pub(crate) struct TrajectoryArg {
    /// Path to the session log (JSON format)
    pub session: PathBuf,

    /// Output file path (stdout if not specified)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub(crate) fn run(arg: &TrajectoryArg) -> anyhow::Result<()> {
    let analysis = util::analyze_session_file(&arg.session)?;
    let series = analysis.trajectory.series();

    let mut output = Output::from_output_path(arg.output.clone())?;
    output.write_json(&series)?;
    eprintln!(
        "Wrote {} trajectory points to {}",
        series.len(),
        output.display_path()
    );

    Ok(())
}
