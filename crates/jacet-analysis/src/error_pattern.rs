//! Classification of incorrect vocabulary responses
//!
//! Each incorrect response is labeled by comparing the correct answer with
//! the selected one. Rules are tried in order and the first match wins:
//!
//! 1. Same first character → [`ErrorPatternLabel::PhonologicalSimilarity`]
//! 2. Same character count → [`ErrorPatternLabel::MorphologicalSimilarity`]
//! 3. Otherwise → [`ErrorPatternLabel::None`]
//!
//! Comparison is by Unicode scalar value and case-sensitive. An empty answer
//! has no first character, so it never matches rule 1.
//!
//! # Examples
//!
//! ```
//! use jacet_analysis::error_pattern::{ErrorPatternLabel, classify};
//!
//! assert_eq!(classify("cat", "car"), ErrorPatternLabel::PhonologicalSimilarity);
//! assert_eq!(classify("dog", "run"), ErrorPatternLabel::MorphologicalSimilarity);
//! assert_eq!(classify("apple", "go"), ErrorPatternLabel::None);
//! ```

use std::fmt;

use serde::Serialize;

use crate::{
    error::{AnalysisError, required},
    response_table::{ResponseTable, VocabResponseRow},
};

/// Similarity category of an incorrect response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ErrorPatternLabel {
    #[serde(rename = "phonological similarity")]
    PhonologicalSimilarity,
    #[serde(rename = "morphological similarity")]
    MorphologicalSimilarity,
    #[serde(rename = "none")]
    None,
}

impl fmt::Display for ErrorPatternLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.to_str(), f)
    }
}

impl ErrorPatternLabel {
    #[must_use]
    pub fn to_str(self) -> &'static str {
        match self {
            ErrorPatternLabel::PhonologicalSimilarity => "phonological similarity",
            ErrorPatternLabel::MorphologicalSimilarity => "morphological similarity",
            ErrorPatternLabel::None => "none",
        }
    }

    /// Capitalized label used in report headings.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            ErrorPatternLabel::PhonologicalSimilarity => "Phonological Similarity",
            ErrorPatternLabel::MorphologicalSimilarity => "Morphological Similarity",
            ErrorPatternLabel::None => "None",
        }
    }
}

/// Classifies an incorrect answer against the correct one.
#[must_use]
pub fn classify(correct_answer: &str, selected_answer: &str) -> ErrorPatternLabel {
    match (correct_answer.chars().next(), selected_answer.chars().next()) {
        (Some(c), Some(s)) if c == s => ErrorPatternLabel::PhonologicalSimilarity,
        _ if correct_answer.chars().count() == selected_answer.chars().count() => {
            ErrorPatternLabel::MorphologicalSimilarity
        }
        _ => ErrorPatternLabel::None,
    }
}

/// One incorrect response with its item parameters and classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPatternRecord {
    /// Presentation order of the source row
    pub order: usize,
    pub item: String,
    pub correct_answer: String,
    pub selected_answer: String,
    pub level: u32,
    #[serde(rename = "pos")]
    pub part_of_speech: String,
    pub response_time_sec: f64,
    pub difficulty: f64,
    pub discrimination: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guessing: Option<f64>,
    pub pattern: ErrorPatternLabel,
}

impl ErrorPatternRecord {
    fn from_row(row: &VocabResponseRow) -> Result<Self, AnalysisError> {
        let path = row.source_path();
        let params = required(row.item_parameters.as_ref(), &path, "itemParameters")?;
        let params_path = format!("{path}.itemParameters");
        let difficulty = required(params.difficulty.as_ref(), &params_path, "difficulty")?;
        let discrimination =
            required(params.discrimination.as_ref(), &params_path, "discrimination")?;

        Ok(Self {
            order: row.order,
            item: row.item.clone(),
            correct_answer: row.correct_answer.clone(),
            selected_answer: row.selected_answer.clone(),
            level: row.level,
            part_of_speech: row.part_of_speech.clone(),
            response_time_sec: row.response_time_sec,
            difficulty,
            discrimination,
            guessing: params.guessing,
            pattern: classify(&row.correct_answer, &row.selected_answer),
        })
    }

    /// Whether this record was derived from `row`.
    #[must_use]
    pub fn traces_to(&self, row: &VocabResponseRow) -> bool {
        self.item == row.item
            && self.selected_answer == row.selected_answer
            && self.level == row.level
    }
}

/// Extracts one record per incorrect row, in presentation order.
///
/// Fails if an incorrect row lacks `itemParameters.difficulty` or
/// `itemParameters.discrimination`. Correct rows are never inspected.
pub fn extract_error_patterns(
    table: &ResponseTable,
) -> Result<Vec<ErrorPatternRecord>, AnalysisError> {
    table.incorrect().map(ErrorPatternRecord::from_row).collect()
}

/// The headline error pattern of a session.
///
/// This is [`ErrorPatternLabel::PhonologicalSimilarity`] whenever any error
/// record exists and [`ErrorPatternLabel::None`] otherwise. It is not a
/// frequency count over the labels.
#[must_use]
pub fn dominant_pattern(records: &[ErrorPatternRecord]) -> ErrorPatternLabel {
    if records.is_empty() {
        ErrorPatternLabel::None
    } else {
        ErrorPatternLabel::PhonologicalSimilarity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        session::ItemParameters,
        test_support::{answered, entry},
    };

    #[test]
    fn test_first_character_rule_wins_over_length() {
        assert_eq!(classify("cat", "car"), ErrorPatternLabel::PhonologicalSimilarity);
    }

    #[test]
    fn test_same_length_without_shared_initial() {
        assert_eq!(classify("dog", "run"), ErrorPatternLabel::MorphologicalSimilarity);
    }

    #[test]
    fn test_no_pattern() {
        assert_eq!(classify("apple", "go"), ErrorPatternLabel::None);
    }

    #[test]
    fn test_case_sensitive() {
        assert_eq!(classify("Cat", "cab"), ErrorPatternLabel::MorphologicalSimilarity);
    }

    #[test]
    fn test_empty_answers() {
        assert_eq!(classify("", ""), ErrorPatternLabel::MorphologicalSimilarity);
        assert_eq!(classify("", "go"), ErrorPatternLabel::None);
        assert_eq!(classify("go", ""), ErrorPatternLabel::None);
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 3 characters each, different byte lengths
        assert_eq!(classify("ねこち", "abc"), ErrorPatternLabel::MorphologicalSimilarity);
        assert_eq!(classify("ねこ", "ねずみ"), ErrorPatternLabel::PhonologicalSimilarity);
    }

    #[test]
    fn test_extract_only_incorrect_rows_in_order() {
        let table = ResponseTable::build(&[
            answered("cat", "cat"),
            answered("cat", "car"),
            answered("dog", "dog"),
            answered("apple", "go"),
        ])
        .unwrap();
        let records = extract_error_patterns(&table).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].order, 2);
        assert_eq!(records[0].pattern, ErrorPatternLabel::PhonologicalSimilarity);
        assert_eq!(records[1].order, 4);
        assert_eq!(records[1].pattern, ErrorPatternLabel::None);
        assert_eq!(records[1].difficulty, 0.5);
        assert_eq!(records[1].discrimination, 1.2);
    }

    #[test]
    fn test_records_trace_to_exactly_one_row() {
        let table = ResponseTable::build(&[
            answered("cat", "car"),
            answered("dog", "run"),
            answered("sun", "sun"),
        ])
        .unwrap();
        for record in extract_error_patterns(&table).unwrap() {
            let matches = table.rows().iter().filter(|row| record.traces_to(row)).count();
            assert_eq!(matches, 1);
        }
    }

    #[test]
    fn test_missing_parameters_on_incorrect_row() {
        let mut bad = entry("b", 1, false, 1000.0);
        bad.item_parameters = Some(ItemParameters {
            difficulty: Some(0.1),
            discrimination: None,
            guessing: None,
        });
        let table = ResponseTable::build(&[entry("a", 1, false, 1000.0), bad]).unwrap();
        let err = extract_error_patterns(&table).unwrap_err();
        assert_eq!(
            err.schema_path(),
            Some("testResults.vocabulary.responses[1].itemParameters.discrimination")
        );
    }

    #[test]
    fn test_missing_parameters_on_correct_row_is_ignored() {
        let mut correct = entry("a", 1, true, 1000.0);
        correct.item_parameters = None;
        let table = ResponseTable::build(&[correct]).unwrap();
        assert!(extract_error_patterns(&table).unwrap().is_empty());
    }

    #[test]
    fn test_dominant_pattern_is_literal_simplification() {
        assert_eq!(dominant_pattern(&[]), ErrorPatternLabel::None);

        let table = ResponseTable::build(&[answered("apple", "go")]).unwrap();
        let records = extract_error_patterns(&table).unwrap();
        assert_eq!(records[0].pattern, ErrorPatternLabel::None);
        assert_eq!(
            dominant_pattern(&records),
            ErrorPatternLabel::PhonologicalSimilarity
        );
    }

    #[test]
    fn test_export_field_names() {
        let table = ResponseTable::build(&[answered("犬", "猫")]).unwrap();
        let records = extract_error_patterns(&table).unwrap();
        let json = serde_json::to_value(&records).unwrap();
        let record = &json[0];
        assert_eq!(record["item"], "犬");
        assert_eq!(record["correctAnswer"], "犬");
        assert_eq!(record["selectedAnswer"], "猫");
        assert_eq!(record["pos"], "noun");
        assert_eq!(record["responseTimeSec"], 1.0);
        assert_eq!(record["pattern"], "morphological similarity");
        assert!(record.get("guessing").is_none());
    }
}
