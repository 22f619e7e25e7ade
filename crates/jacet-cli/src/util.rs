use std::{
    fs::{self, File},
    io::{self, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use jacet_analysis::{pipeline::SessionAnalysis, session::SessionRecord};

/// Destination of a generated artifact.
#[derive(Debug)]
pub enum Output {
    Stdout,
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::open(path),
            None => Ok(Output::Stdout),
        }
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    /// Removes a file created by [`Output::open`] that will not be written.
    pub fn discard(self) {
        if let Output::File { writer, path } = self {
            drop(writer);
            if let Err(err) = fs::remove_file(&path) {
                log::warn!("failed to remove {}: {err}", path.display());
            }
        }
    }

    pub fn write_json<T>(&mut self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize + ?Sized,
    {
        let mut json = serde_json::to_string_pretty(value)
            .with_context(|| format!("Failed to serialize JSON for {}", self.display_path()))?;
        json.push('\n');
        self.write_text(&json)
    }

    pub fn write_text(&mut self, text: &str) -> anyhow::Result<()> {
        log::debug!("writing {} bytes to {}", text.len(), self.display_path());
        let result = match self {
            Output::Stdout => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(text.as_bytes()).and_then(|()| stdout.flush())
            }
            Output::File { writer, .. } => {
                writer.write_all(text.as_bytes()).and_then(|()| writer.flush())
            }
        };
        result.with_context(|| format!("Failed to write to {}", self.display_path()))
    }
}

/// Read and validate a session log
///
/// # Errors
///
/// Returns error if the file cannot be read, is not valid JSON, or lacks a
/// required section or field
pub fn read_session_file<P>(path: P) -> anyhow::Result<SessionRecord>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open session log: {}", path.display()))?;
    let record = SessionRecord::from_reader(io::BufReader::new(file))
        .with_context(|| format!("Failed to load session log: {}", path.display()))?;
    Ok(record)
}

/// Load a session log and run the full analysis on it
pub fn analyze_session_file<P>(path: P) -> anyhow::Result<SessionAnalysis>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();

    eprintln!("Loading session log from {}...", path.display());
    let record = read_session_file(path)?;
    eprintln!(
        "Loaded session {} ({} vocabulary responses, {} interactions)",
        record.session_info.session_id,
        record.test_results.vocabulary.responses.len(),
        record.session_info.interactions.len()
    );

    let analysis = SessionAnalysis::analyze(&record)
        .with_context(|| format!("Failed to analyze session log: {}", path.display()))?;
    eprintln!("Analysis complete");

    Ok(analysis)
}
