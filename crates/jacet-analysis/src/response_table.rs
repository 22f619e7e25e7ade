//! Vocabulary response table
//!
//! Flattens the logged vocabulary responses into validated rows with derived
//! fields (response time in seconds, 1-based presentation order).
//!
//! # Examples
//!
//! ```
//! use jacet_analysis::{
//!     response_table::ResponseTable,
//!     session::{Correctness, VocabResponseEntry},
//! };
//!
//! let entry = VocabResponseEntry {
//!     item: Some("犬".into()),
//!     correct_answer: Some("dog".into()),
//!     selected_answer: Some("dog".into()),
//!     level: Some(1),
//!     part_of_speech: Some("noun".into()),
//!     correct: Some(Correctness(true)),
//!     response_time: Some(2500.0),
//!     ..Default::default()
//! };
//!
//! let table = ResponseTable::build(&[entry]).unwrap();
//! assert_eq!(table.rows()[0].order, 1);
//! assert_eq!(table.rows()[0].response_time_sec, 2.5);
//! assert_eq!(table.summary().accuracy.rate(), Some(1.0));
//! ```

use jacet_stats::{descriptive, proportion::Proportion};

use crate::{
    error::{AnalysisError, required},
    session::{ItemParameters, VocabResponseEntry},
};

pub(crate) const RESPONSES_PATH: &str = "testResults.vocabulary.responses";

/// One administered vocabulary item with derived fields.
#[derive(Debug, Clone, PartialEq)]
pub struct VocabResponseRow {
    /// 1-based presentation order
    pub order: usize,
    /// Prompt shown to the test taker
    pub item: String,
    pub correct_answer: String,
    pub selected_answer: String,
    /// Distractors present in the log, in `distractor1..3` order
    pub distractors: Vec<String>,
    /// Proficiency level of the item
    pub level: u32,
    pub part_of_speech: String,
    pub correct: bool,
    /// Raw response time in milliseconds
    pub response_time_ms: f64,
    /// Response time in seconds
    pub response_time_sec: f64,
    /// Item parameters, if logged
    pub item_parameters: Option<ItemParameters>,
}

impl VocabResponseRow {
    /// JSON path of the log entry this row was built from.
    #[must_use]
    pub fn source_path(&self) -> String {
        format!("{RESPONSES_PATH}[{}]", self.order - 1)
    }

    fn from_entry(index: usize, entry: &VocabResponseEntry) -> Result<Self, AnalysisError> {
        let path = format!("{RESPONSES_PATH}[{index}]");
        let response_time_ms = required(entry.response_time.as_ref(), &path, "responseTime")?;
        let correct = required(entry.correct.as_ref(), &path, "correct")?.0;
        let item = required(entry.item.as_ref(), &path, "item")?;
        let correct_answer = required(entry.correct_answer.as_ref(), &path, "correctAnswer")?;
        let selected_answer = required(entry.selected_answer.as_ref(), &path, "selectedAnswer")?;
        let level = required(entry.level.as_ref(), &path, "level")?;
        let part_of_speech = required(entry.part_of_speech.as_ref(), &path, "partOfSpeech")?;

        let distractors = [&entry.distractor1, &entry.distractor2, &entry.distractor3]
            .into_iter()
            .flatten()
            .cloned()
            .collect();

        Ok(Self {
            order: index + 1,
            item,
            correct_answer,
            selected_answer,
            distractors,
            level,
            part_of_speech,
            correct,
            response_time_ms,
            response_time_sec: response_time_ms / 1000.0,
            item_parameters: entry.item_parameters,
        })
    }
}

/// Validated vocabulary responses in administration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseTable {
    rows: Vec<VocabResponseRow>,
}

/// Whole-table summary statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponseSummary {
    /// Correct answers out of administered items
    pub accuracy: Proportion,
    /// Mean response time in seconds, `None` for an empty table
    pub mean_response_time_sec: Option<f64>,
}

impl ResponseSummary {
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.accuracy.trials
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.accuracy.successes
    }
}

impl ResponseTable {
    /// Builds the table from logged entries.
    ///
    /// Fails with a schema violation naming the row and field if any row
    /// lacks a required field.
    pub fn build(entries: &[VocabResponseEntry]) -> Result<Self, AnalysisError> {
        let rows = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| VocabResponseRow::from_entry(index, entry))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rows })
    }

    #[must_use]
    pub fn rows(&self) -> &[VocabResponseRow] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows answered incorrectly, in presentation order.
    pub fn incorrect(&self) -> impl Iterator<Item = &VocabResponseRow> {
        self.rows.iter().filter(|row| !row.correct)
    }

    /// Unweighted accuracy and mean response time over all rows.
    #[must_use]
    pub fn summary(&self) -> ResponseSummary {
        ResponseSummary {
            accuracy: Proportion::from_outcomes(self.rows.iter().map(|row| row.correct)),
            mean_response_time_sec: descriptive::mean(
                self.rows.iter().map(|row| row.response_time_sec),
            ),
        }
    }
}
