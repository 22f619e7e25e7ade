//! Error taxonomy for the analysis pipeline
//!
//! Two kinds of failure abort a run:
//!
//! - [`AnalysisError::MalformedInput`]: the session log is not parseable JSON
//! - [`AnalysisError::SchemaViolation`]: the log parses but a required field
//!   is missing or has the wrong shape
//!
//! Out-of-order reading timestamps are not fatal. They are reported as a
//! [`TimestampOrderError`](crate::reading::TimestampOrderError) attached to
//! the affected reading record.

/// Fatal error raised while loading or analyzing a session log.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum AnalysisError {
    /// The input document is not well-formed JSON.
    #[display("malformed session log: {source}")]
    MalformedInput { source: serde_json::Error },
    /// The input document lacks a required field or section.
    ///
    /// `path` is a dotted JSON path, e.g.
    /// `testResults.vocabulary.responses[3].responseTime`.
    #[display("schema violation at `{path}`: {reason}")]
    SchemaViolation { path: String, reason: String },
}

impl AnalysisError {
    pub(crate) fn schema<P, R>(path: P, reason: R) -> Self
    where
        P: Into<String>,
        R: Into<String>,
    {
        Self::SchemaViolation {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn missing<P>(path: P) -> Self
    where
        P: Into<String>,
    {
        Self::schema(path, "required field is missing")
    }

    /// Returns the JSON path of a schema violation.
    #[must_use]
    pub fn schema_path(&self) -> Option<&str> {
        match self {
            Self::MalformedInput { .. } => None,
            Self::SchemaViolation { path, .. } => Some(path),
        }
    }
}

/// Joins a parent path and a field name into a dotted JSON path.
pub(crate) fn join_path(parent: &str, field: &str) -> String {
    if parent.is_empty() {
        field.to_owned()
    } else {
        format!("{parent}.{field}")
    }
}

/// Unwraps an optional field, or reports it missing at `parent.field`.
pub(crate) fn required<T>(value: Option<&T>, parent: &str, field: &str) -> Result<T, AnalysisError>
where
    T: Clone,
{
    value
        .cloned()
        .ok_or_else(|| AnalysisError::missing(join_path(parent, field)))
}
