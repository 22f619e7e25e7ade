//! Full analysis of one session
//!
//! Runs every stage over a loaded [`SessionRecord`]:
//!
//! ```text
//! SessionRecord ─┬─ ResponseTable ─┬─ StratifiedAggregates (level, part of speech)
//!                │                 └─ ErrorPatternRecord[]
//!                ├─ AbilityTrajectory
//!                ├─ ReadingMetrics
//!                └─ MouseTrack
//!                                     ↓
//!                               SessionAnalysis → Report
//! ```
//!
//! The stages only read the record, so the result is a pure function of the
//! input. Any schema violation aborts the whole analysis.

use crate::{
    error::AnalysisError,
    error_pattern::{self, ErrorPatternRecord},
    mouse::MouseTrack,
    reading::ReadingMetrics,
    report::Report,
    response_table::{ResponseSummary, ResponseTable},
    session::{SessionRecord, StartTime},
    stratify::StratifiedAggregates,
    trajectory::AbilityTrajectory,
};

/// Final vocabulary estimates, copied from the log.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VocabularyEstimate {
    pub vocab_size: f64,
    pub theta: f64,
    pub se: f64,
}

/// Every derived view of one session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionAnalysis {
    pub session_id: String,
    pub start_time: StartTime,
    /// Total session duration in milliseconds
    pub total_duration_ms: f64,
    pub vocabulary: VocabularyEstimate,
    pub responses: ResponseTable,
    pub trajectory: AbilityTrajectory,
    pub levels: StratifiedAggregates<u32>,
    pub parts_of_speech: StratifiedAggregates<String>,
    pub error_patterns: Vec<ErrorPatternRecord>,
    pub reading: ReadingMetrics,
    pub mouse: MouseTrack,
}

impl SessionAnalysis {
    /// Analyzes a loaded session.
    pub fn analyze(record: &SessionRecord) -> Result<Self, AnalysisError> {
        let info = &record.session_info;
        let vocabulary = &record.test_results.vocabulary;

        log::debug!("building response table");
        let responses = ResponseTable::build(&vocabulary.responses)?;
        log::debug!("reconstructing ability trajectory");
        let trajectory = AbilityTrajectory::reconstruct(&info.interactions)?;
        log::debug!("classifying incorrect responses");
        let error_patterns = error_pattern::extract_error_patterns(&responses)?;

        let analysis = Self {
            session_id: info.session_id.clone(),
            start_time: info.start_time.clone(),
            total_duration_ms: info.total_duration,
            vocabulary: VocabularyEstimate {
                vocab_size: vocabulary.vocab_size,
                theta: vocabulary.theta,
                se: vocabulary.se,
            },
            levels: StratifiedAggregates::by_level(&responses),
            parts_of_speech: StratifiedAggregates::by_part_of_speech(&responses),
            reading: ReadingMetrics::compute(
                &record.test_results.reading,
                &info.detailed_responses,
            ),
            mouse: MouseTrack::from_samples(&info.mouse_movements),
            responses,
            trajectory,
            error_patterns,
        };

        if !analysis.lengths_match() {
            log::warn!(
                "ability trajectory has {} points but {} vocabulary responses were logged",
                analysis.trajectory.len(),
                analysis.responses.len()
            );
        }

        Ok(analysis)
    }

    /// Total session duration in minutes.
    #[must_use]
    pub fn total_duration_minutes(&self) -> f64 {
        self.total_duration_ms / 1000.0 / 60.0
    }

    #[must_use]
    pub fn response_summary(&self) -> ResponseSummary {
        self.responses.summary()
    }

    /// Number of incorrect vocabulary responses.
    #[must_use]
    pub fn incorrect_count(&self) -> usize {
        self.responses.incorrect().count()
    }

    /// Whether the trajectory and the response table have the same length.
    #[must_use]
    pub fn lengths_match(&self) -> bool {
        self.trajectory.len() == self.responses.len()
    }

    /// Synthesizes the text report and error-pattern export.
    #[must_use]
    pub fn report(&self) -> Report {
        Report::synthesize(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error_pattern::ErrorPatternLabel, session::TextType, test_support::assert_close};

    const FIVE_ITEM_SESSION: &[u8] = include_bytes!("../testdata/session_5_items.json");

    fn analyze_fixture() -> SessionAnalysis {
        let record = SessionRecord::from_slice(FIVE_ITEM_SESSION).unwrap();
        SessionAnalysis::analyze(&record).unwrap()
    }

    #[test]
    fn test_five_item_session() {
        let analysis = analyze_fixture();

        assert_eq!(analysis.session_id, "session_1753093575303_edbigwvdp");
        assert_eq!(analysis.responses.len(), 5);
        assert_eq!(analysis.incorrect_count(), 2);
        assert_close(analysis.total_duration_minutes(), 12.5);

        let orders = analysis
            .error_patterns
            .iter()
            .map(|r| r.order)
            .collect::<Vec<_>>();
        assert_eq!(orders, vec![2, 4]);
        assert_eq!(
            analysis.error_patterns[0].pattern,
            ErrorPatternLabel::PhonologicalSimilarity
        );
        assert_eq!(
            analysis.error_patterns[1].pattern,
            ErrorPatternLabel::MorphologicalSimilarity
        );

        let summary = analysis.response_summary();
        assert_eq!(summary.accuracy.rate(), Some(0.6));
        assert_close(summary.mean_response_time_sec.unwrap(), 3.0);
    }

    #[test]
    fn test_trajectory_ignores_other_events() {
        let analysis = analyze_fixture();
        let questions = analysis
            .trajectory
            .points()
            .iter()
            .map(|p| p.question)
            .collect::<Vec<_>>();
        assert_eq!(questions, vec![1, 2, 3, 4, 5]);
        assert!(analysis.lengths_match());
        assert_close(analysis.trajectory.last().unwrap().theta, 0.42);
    }

    #[test]
    fn test_levels_partition_table() {
        let analysis = analyze_fixture();
        assert_eq!(analysis.levels.total_items(), analysis.responses.len());
        assert_eq!(
            analysis.levels.map.keys().copied().collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(analysis.parts_of_speech.total_items(), 5);
    }

    #[test]
    fn test_reading_and_mouse() {
        let analysis = analyze_fixture();
        assert_close(analysis.reading.wpm(TextType::Narrative), 100.0);
        assert_close(analysis.reading.wpm(TextType::Expository), 60.0);
        assert_eq!(analysis.reading.phase_counts["reading_narrative"], 2);
        assert_eq!(analysis.mouse.summary().unwrap().sample_count, 3);
    }

    #[test]
    fn test_lossy_interaction_log_is_not_an_error() {
        let mut record = SessionRecord::from_slice(FIVE_ITEM_SESSION).unwrap();
        record
            .session_info
            .interactions
            .retain(|i| i.action != crate::trajectory::ABILITY_UPDATE_ACTION);
        let analysis = SessionAnalysis::analyze(&record).unwrap();
        assert!(analysis.trajectory.is_empty());
        assert!(!analysis.lengths_match());
    }

    #[test]
    fn test_missing_row_field_aborts() {
        let mut record = SessionRecord::from_slice(FIVE_ITEM_SESSION).unwrap();
        record.test_results.vocabulary.responses[2].response_time = None;
        let err = SessionAnalysis::analyze(&record).unwrap_err();
        assert_eq!(
            err.schema_path(),
            Some("testResults.vocabulary.responses[2].responseTime")
        );
    }
}
