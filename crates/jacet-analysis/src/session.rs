//! Session log data structures and loading
//!
//! This module provides the typed representation of one completed CAT session
//! log, as exported by the vocabulary/reading test application.
//!
//! # Data Structure
//!
//! ```text
//! SessionRecord
//! ├─ session_info
//! │   ├─ session id, start time, total duration (ms)
//! │   ├─ interactions: Vec<Interaction>          (action tag + payload)
//! │   ├─ mouse_movements: Vec<MouseSample>
//! │   └─ detailed_responses: Vec<DetailedResponse> (phase-tagged)
//! └─ test_results
//!     ├─ vocabulary (responses, vocabSize, theta, se)
//!     └─ reading (level, timings, texts, answers per text type)
//! ```
//!
//! # Validation
//!
//! [`SessionRecord::from_slice`] parses the document and checks that the
//! `sessionInfo` and `testResults` sections exist before deserializing them
//! section by section, so a schema violation names the section it came from.
//!
//! Per-item vocabulary fields are kept optional here and validated by the
//! stage that consumes them (see [`response_table`](crate::response_table)),
//! which reports the exact row path of a missing field.
//!
//! # Serialization
//!
//! Keys are camelCase, as written by the test application:
//!
//! ```json
//! {
//!   "sessionInfo": {
//!     "sessionId": "session_1753093575303_edbigwvdp",
//!     "startTime": "2025-07-21T10:26:15.303Z",
//!     "totalDuration": 754000,
//!     "interactions": [
//!       { "action": "vocab_response", "data": { "newTheta": 0.4, "newSE": 0.9, "correct": 1 } }
//!     ],
//!     "mouseMovements": [],
//!     "detailedResponses": []
//!   },
//!   "testResults": { "vocabulary": { ... }, "reading": { ... } }
//! }
//! ```

use std::{collections::BTreeMap, fmt, io::Read};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::error::{AnalysisError, join_path};

/// One completed CAT session log.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    /// Session metadata and raw event streams
    pub session_info: SessionInfo,
    /// Final per-test results
    pub test_results: TestResults,
}

/// Session metadata and the raw event streams recorded during the session.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    /// Unique session identifier
    pub session_id: String,
    /// Session start time, kept as written in the log
    pub start_time: StartTime,
    /// Total session duration in milliseconds
    pub total_duration: f64,
    /// Interaction events in temporal order
    #[serde(default)]
    pub interactions: Vec<Interaction>,
    /// Mouse-movement samples in temporal order
    #[serde(default)]
    pub mouse_movements: Vec<MouseSample>,
    /// Phase-tagged response events
    #[serde(default)]
    pub detailed_responses: Vec<DetailedResponse>,
}

/// Session start time as recorded by the test application.
///
/// Either an ISO-8601 string or a Unix timestamp in milliseconds. It is only
/// displayed, never used in arithmetic, so it is kept verbatim.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum StartTime {
    Text(String),
    EpochMillis(i64),
}

impl fmt::Display for StartTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartTime::Text(text) => fmt::Display::fmt(text, f),
            StartTime::EpochMillis(ms) => fmt::Display::fmt(ms, f),
        }
    }
}

/// An interaction event, tagged by its action label.
///
/// Only events tagged [`ABILITY_UPDATE_ACTION`](crate::trajectory::ABILITY_UPDATE_ACTION)
/// carry an ability-update payload; the payload of other tags is opaque.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Interaction {
    /// Action label, e.g. `vocab_response`
    pub action: String,
    /// Action-specific payload
    #[serde(default)]
    pub data: Option<Value>,
}

/// A single mouse-position sample.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct MouseSample {
    pub x: f64,
    pub y: f64,
    /// Unix timestamp in milliseconds
    pub timestamp: f64,
}

/// A phase-tagged response event.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DetailedResponse {
    /// Session phase, e.g. `cat`, `reading_narrative`
    pub phase: String,
    /// Remaining event fields
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

/// Final results of both tests.
#[derive(Debug, Clone)]
pub struct TestResults {
    pub vocabulary: VocabularyResults,
    pub reading: ReadingResults,
}

/// Vocabulary CAT results.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyResults {
    /// Administered items in administration order
    pub responses: Vec<VocabResponseEntry>,
    /// Estimated vocabulary size
    pub vocab_size: f64,
    /// Final ability estimate
    pub theta: f64,
    /// Standard error of the final ability estimate
    pub se: f64,
}

/// One administered vocabulary item as logged.
///
/// Fields are optional at this level; the response table builder rejects
/// rows that lack a required one.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabResponseEntry {
    pub item: Option<String>,
    pub correct_answer: Option<String>,
    pub selected_answer: Option<String>,
    pub distractor1: Option<String>,
    pub distractor2: Option<String>,
    pub distractor3: Option<String>,
    pub level: Option<u32>,
    pub part_of_speech: Option<String>,
    pub correct: Option<Correctness>,
    /// Response time in milliseconds
    pub response_time: Option<f64>,
    pub item_parameters: Option<ItemParameters>,
}

/// IRT item parameters used by the upstream estimator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct ItemParameters {
    pub difficulty: Option<f64>,
    pub discrimination: Option<f64>,
    pub guessing: Option<f64>,
}

/// Correctness indicator, logged either as a boolean or as `0`/`1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Correctness(pub bool);

impl<'de> Deserialize<'de> for Correctness {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Flag(bool),
            Indicator(i64),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Flag(flag) => Ok(Correctness(flag)),
            Repr::Indicator(0) => Ok(Correctness(false)),
            Repr::Indicator(1) => Ok(Correctness(true)),
            Repr::Indicator(n) => Err(serde::de::Error::custom(format!(
                "correctness indicator must be 0 or 1, got {n}"
            ))),
        }
    }
}

/// The two reading text types, processed independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextType {
    Narrative,
    Expository,
}

impl fmt::Display for TextType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.key(), f)
    }
}

impl TextType {
    /// All text types in reporting order.
    pub const ALL: [TextType; 2] = [TextType::Narrative, TextType::Expository];

    /// Key used for this text type in the log.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            TextType::Narrative => "narrative",
            TextType::Expository => "expository",
        }
    }

    /// Capitalized name used in reports.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            TextType::Narrative => "Narrative",
            TextType::Expository => "Expository",
        }
    }
}

/// A value recorded once per reading text type.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PerTextType<T> {
    pub narrative: T,
    pub expository: T,
}

impl<T> PerTextType<T> {
    #[must_use]
    pub fn get(&self, text_type: TextType) -> &T {
        match text_type {
            TextType::Narrative => &self.narrative,
            TextType::Expository => &self.expository,
        }
    }
}

/// Reading test results.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReadingResults {
    /// Reading level assigned from the vocabulary estimate (in thousands of words)
    pub level: u32,
    pub timings: PerTextType<ReadingTimings>,
    pub texts: PerTextType<ReadingText>,
    pub answers: PerTextType<ReadingAnswers>,
}

/// Phase-transition timestamps of one reading text.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingTimings {
    pub text_start: DateTime<Utc>,
    pub question1_start: DateTime<Utc>,
    #[serde(default)]
    pub question1_end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub question2_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub question2_end: Option<DateTime<Utc>>,
}

/// A reading passage.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReadingText {
    pub text: String,
}

/// Free-text answers to the two comprehension questions.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReadingAnswers {
    pub question1: String,
    pub question2: String,
}

impl SessionRecord {
    /// Parses a session log from raw bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, AnalysisError> {
        let document = serde_json::from_slice(bytes)
            .map_err(|source| AnalysisError::MalformedInput { source })?;
        Self::from_document(document)
    }

    /// Parses a session log from a reader.
    pub fn from_reader<R>(reader: R) -> Result<Self, AnalysisError>
    where
        R: Read,
    {
        let document = serde_json::from_reader(reader)
            .map_err(|source| AnalysisError::MalformedInput { source })?;
        Self::from_document(document)
    }

    /// Validates an already-parsed JSON document and converts it into a typed record.
    pub fn from_document(document: Value) -> Result<Self, AnalysisError> {
        let Value::Object(mut root) = document else {
            return Err(AnalysisError::schema("$", "document root must be an object"));
        };

        // Both top-level sections are checked before either is deserialized.
        for section in ["sessionInfo", "testResults"] {
            if !root.contains_key(section) {
                return Err(AnalysisError::schema(section, "required section is missing"));
            }
        }

        let session_info = take_section(&mut root, "", "sessionInfo")?;

        let mut test_results = take_section::<Map<String, Value>>(&mut root, "", "testResults")?;
        let vocabulary = take_section(&mut test_results, "testResults", "vocabulary")?;
        let reading = take_section(&mut test_results, "testResults", "reading")?;

        Ok(Self {
            session_info,
            test_results: TestResults {
                vocabulary,
                reading,
            },
        })
    }
}

fn take_section<T>(
    parent: &mut Map<String, Value>,
    parent_path: &str,
    key: &str,
) -> Result<T, AnalysisError>
where
    T: DeserializeOwned,
{
    let path = join_path(parent_path, key);
    let value = parent
        .remove(key)
        .ok_or_else(|| AnalysisError::schema(&path, "required section is missing"))?;
    serde_json::from_value(value).map_err(|e| AnalysisError::schema(path, e.to_string()))
}
