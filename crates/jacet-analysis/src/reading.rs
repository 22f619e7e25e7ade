//! Reading speed and answer metrics
//!
//! For each text type the reading time is the interval between the text
//! being shown (`textStart`) and the first question being shown
//! (`question1Start`). Reading speed is the passage word count over that
//! interval in minutes.
//!
//! A negative interval means the log is inconsistent. It is reported as a
//! [`TimestampOrderError`] on that text type's record, whose speed then
//! degrades to 0. The other text type is unaffected.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::session::{DetailedResponse, ReadingResults, TextType};

/// Prefix of the phases recorded during the reading test.
pub const READING_PHASE_PREFIX: &str = "reading_";

/// Reading timestamps of one text type are out of order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, derive_more::Display, derive_more::Error)]
#[display(
    "{text_type} reading timestamps out of order: question 1 started {:.1} seconds before the text",
    -elapsed_secs
)]
pub struct TimestampOrderError {
    pub text_type: TextType,
    pub elapsed_secs: f64,
}

/// Character count of one free-text answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerMetric {
    pub answer: String,
    pub char_count: usize,
}

impl AnswerMetric {
    fn new(answer: &str) -> Self {
        Self {
            answer: answer.to_owned(),
            char_count: answer.chars().count(),
        }
    }
}

/// Reading metrics for one text type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadingTimingRecord {
    pub text_type: TextType,
    pub text_start: DateTime<Utc>,
    pub question1_start: DateTime<Utc>,
    /// `question1Start − textStart` in seconds; may be negative on a bad log
    pub elapsed_secs: f64,
    /// Whitespace-delimited tokens in the passage
    pub word_count: usize,
    /// Words per minute, 0 when `elapsed_secs <= 0`
    pub wpm: f64,
    /// Time spent on question 1, when its end was logged
    pub question1_secs: Option<f64>,
    /// Time spent on question 2, when both its stamps were logged
    pub question2_secs: Option<f64>,
    /// Text start to question 2 end, when logged
    pub total_secs: Option<f64>,
    pub answers: [AnswerMetric; 2],
    /// Set when the reading interval is negative
    pub anomaly: Option<TimestampOrderError>,
}

/// Number of whitespace-delimited tokens in `text`.
#[must_use]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Words per minute, guarded against non-positive intervals.
///
/// ```
/// # use jacet_analysis::reading::words_per_minute;
/// assert_eq!(words_per_minute(100, 60.0), 100.0);
/// assert_eq!(words_per_minute(100, 0.0), 0.0);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn words_per_minute(word_count: usize, elapsed_secs: f64) -> f64 {
    if elapsed_secs > 0.0 {
        word_count as f64 / (elapsed_secs / 60.0)
    } else {
        0.0
    }
}

/// Signed interval in seconds, at microsecond resolution.
#[expect(clippy::cast_precision_loss)]
fn seconds_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    let delta = end - start;
    // num_microseconds overflows only past ~292k years
    delta.num_microseconds().map_or_else(
        || delta.num_milliseconds() as f64 / 1000.0,
        |micros| micros as f64 / 1_000_000.0,
    )
}

impl ReadingTimingRecord {
    /// Computes the metrics of one text type.
    #[must_use]
    pub fn compute(reading: &ReadingResults, text_type: TextType) -> Self {
        let timings = reading.timings.get(text_type);
        let text = &reading.texts.get(text_type).text;
        let answers = reading.answers.get(text_type);

        let elapsed_secs = seconds_between(timings.text_start, timings.question1_start);
        let word_count = word_count(text);
        let anomaly = (elapsed_secs < 0.0).then_some(TimestampOrderError {
            text_type,
            elapsed_secs,
        });
        if let Some(anomaly) = &anomaly {
            log::warn!("{anomaly}; reading speed set to 0");
        }

        Self {
            text_type,
            text_start: timings.text_start,
            question1_start: timings.question1_start,
            elapsed_secs,
            word_count,
            wpm: words_per_minute(word_count, elapsed_secs),
            question1_secs: timings
                .question1_end
                .map(|end| seconds_between(timings.question1_start, end)),
            question2_secs: timings
                .question2_start
                .zip(timings.question2_end)
                .map(|(start, end)| seconds_between(start, end)),
            total_secs: timings
                .question2_end
                .map(|end| seconds_between(timings.text_start, end)),
            answers: [
                AnswerMetric::new(&answers.question1),
                AnswerMetric::new(&answers.question2),
            ],
            anomaly,
        }
    }
}

/// Reading metrics of a whole session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadingMetrics {
    /// Assigned reading level (thousands of words)
    pub level: u32,
    /// One record per text type, narrative first
    pub records: Vec<ReadingTimingRecord>,
    /// Detailed responses logged per reading phase
    pub phase_counts: BTreeMap<String, usize>,
}

impl ReadingMetrics {
    #[must_use]
    pub fn compute(reading: &ReadingResults, detailed_responses: &[DetailedResponse]) -> Self {
        Self {
            level: reading.level,
            records: TextType::ALL
                .into_iter()
                .map(|text_type| ReadingTimingRecord::compute(reading, text_type))
                .collect(),
            phase_counts: reading_phase_counts(detailed_responses),
        }
    }

    #[must_use]
    pub fn record(&self, text_type: TextType) -> Option<&ReadingTimingRecord> {
        self.records.iter().find(|r| r.text_type == text_type)
    }

    /// Reading speed of a text type, 0 if it was not computed.
    #[must_use]
    pub fn wpm(&self, text_type: TextType) -> f64 {
        self.record(text_type).map_or(0.0, |r| r.wpm)
    }

    pub fn anomalies(&self) -> impl Iterator<Item = &TimestampOrderError> {
        self.records.iter().filter_map(|r| r.anomaly.as_ref())
    }
}

/// Counts detailed responses per `reading_*` phase.
#[must_use]
pub fn reading_phase_counts(detailed_responses: &[DetailedResponse]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for response in detailed_responses
        .iter()
        .filter(|r| r.phase.starts_with(READING_PHASE_PREFIX))
    {
        *counts.entry(response.phase.clone()).or_default() += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::test_support::assert_close;

    fn reading(narrative_q1: &str, expository_q1: &str) -> ReadingResults {
        serde_json::from_value(json!({
            "level": 4,
            "timings": {
                "narrative": {
                    "textStart": "2025-07-21T10:30:00Z",
                    "question1Start": narrative_q1,
                    "question1End": "2025-07-21T10:31:20.500Z",
                    "question2Start": "2025-07-21T10:31:30Z",
                    "question2End": "2025-07-21T10:32:00Z"
                },
                "expository": {
                    "textStart": "2025-07-21T10:40:00Z",
                    "question1Start": expository_q1
                }
            },
            "texts": {
                "narrative": { "text": "one two  three\nfour\tfive" },
                "expository": { "text": "  " }
            },
            "answers": {
                "narrative": { "question1": "彼は走った", "question2": "" },
                "expository": { "question1": "abc", "question2": "de" }
            }
        }))
        .unwrap()
    }

    fn detailed(phase: &str) -> DetailedResponse {
        DetailedResponse {
            phase: phase.to_owned(),
            fields: BTreeMap::new(),
        }
    }

    #[test]
    fn test_word_count_splits_on_any_whitespace() {
        assert_eq!(word_count("one two  three\nfour\tfive"), 5);
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   "), 0);
    }

    #[test]
    fn test_wpm_guard() {
        assert_close(words_per_minute(100, 60.0), 100.0);
        assert_close(words_per_minute(150, 30.0), 300.0);
        assert_eq!(words_per_minute(100, 0.0), 0.0);
        assert_eq!(words_per_minute(100, -5.0), 0.0);
    }

    #[test]
    fn test_record_metrics() {
        let metrics = ReadingMetrics::compute(
            &reading("2025-07-21T10:31:00Z", "2025-07-21T10:41:30Z"),
            &[],
        );
        assert_eq!(metrics.level, 4);

        let narrative = metrics.record(TextType::Narrative).unwrap();
        assert_close(narrative.elapsed_secs, 60.0);
        assert_eq!(narrative.word_count, 5);
        assert_close(narrative.wpm, 5.0);
        assert_close(narrative.question1_secs.unwrap(), 20.5);
        assert_close(narrative.question2_secs.unwrap(), 30.0);
        assert_close(narrative.total_secs.unwrap(), 120.0);
        assert_eq!(narrative.answers[0].char_count, 5);
        assert_eq!(narrative.answers[1].char_count, 0);
        assert!(narrative.anomaly.is_none());

        let expository = metrics.record(TextType::Expository).unwrap();
        assert_close(expository.elapsed_secs, 90.0);
        assert_eq!(expository.word_count, 0);
        assert_eq!(expository.wpm, 0.0);
        assert!(expository.question1_secs.is_none());
        assert!(expository.total_secs.is_none());
        assert_eq!(expository.answers[0].char_count, 3);
    }

    #[test]
    fn test_negative_interval_is_isolated() {
        let metrics = ReadingMetrics::compute(
            &reading("2025-07-21T10:29:50Z", "2025-07-21T10:41:00Z"),
            &[],
        );

        let narrative = metrics.record(TextType::Narrative).unwrap();
        assert_close(narrative.elapsed_secs, -10.0);
        assert_eq!(narrative.wpm, 0.0);
        let anomaly = narrative.anomaly.unwrap();
        assert_eq!(anomaly.text_type, TextType::Narrative);
        assert!(anomaly.to_string().contains("10.0 seconds"));

        assert_close(metrics.wpm(TextType::Expository), 0.0);
        assert!(metrics.record(TextType::Expository).unwrap().anomaly.is_none());
        assert_eq!(metrics.anomalies().count(), 1);
    }

    #[test]
    fn test_sub_millisecond_intervals_keep_precision() {
        let mut document = serde_json::to_value(reading(
            "2025-07-21T10:30:00.000100Z",
            "2025-07-21T10:41:00.000900Z",
        ))
        .unwrap();
        document["timings"]["narrative"]["textStart"] = "2025-07-21T10:30:00.000900Z".into();
        let reading: ReadingResults = serde_json::from_value(document).unwrap();
        let metrics = ReadingMetrics::compute(&reading, &[]);

        let narrative = metrics.record(TextType::Narrative).unwrap();
        assert_close(narrative.elapsed_secs, -0.0008);
        assert_eq!(narrative.wpm, 0.0);
        assert!(narrative.anomaly.is_some());
        assert_eq!(metrics.anomalies().count(), 1);

        let expository = metrics.record(TextType::Expository).unwrap();
        assert_close(expository.elapsed_secs, 60.0009);
        assert!(expository.anomaly.is_none());
    }

    #[test]
    fn test_zero_interval_is_not_an_anomaly() {
        let metrics = ReadingMetrics::compute(
            &reading("2025-07-21T10:30:00Z", "2025-07-21T10:40:00Z"),
            &[],
        );
        assert_eq!(metrics.wpm(TextType::Narrative), 0.0);
        assert_eq!(metrics.anomalies().count(), 0);
    }

    #[test]
    fn test_phase_counts_only_reading_phases() {
        let responses = [
            detailed("cat"),
            detailed("reading_narrative"),
            detailed("reading_narrative"),
            detailed("reading_expository"),
            detailed("final"),
        ];
        let counts = reading_phase_counts(&responses);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts["reading_narrative"], 2);
        assert_eq!(counts["reading_expository"], 1);
    }
}
