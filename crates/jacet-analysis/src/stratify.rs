//! Stratified accuracy and timing breakdowns
//!
//! Groups the response table by a key (proficiency level, part of speech)
//! and summarizes each group:
//!
//! | Column             | Definition                                   |
//! |--------------------|----------------------------------------------|
//! | Item Count         | rows in the group                            |
//! | Correct Count      | rows answered correctly                      |
//! | Accuracy           | correct count / item count (full precision)  |
//! | Avg. Response Time | arithmetic mean of `response_time_sec`       |
//!
//! Groups are ordered by key (`BTreeMap` order), so levels appear in
//! ascending order and the output is stable for a given input. The grouping
//! is a partition: every row lands in exactly one group.

use std::collections::BTreeMap;

use jacet_stats::{descriptive::DescriptiveStats, proportion::Proportion};

use crate::response_table::{ResponseTable, VocabResponseRow};

/// Summary of one group of responses.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupAggregate {
    /// Correct answers out of items in the group
    pub outcomes: Proportion,
    /// Response-time statistics (seconds), `None` only for an empty group
    pub response_time_sec: Option<DescriptiveStats>,
}

impl GroupAggregate {
    fn from_rows(rows: &[&VocabResponseRow]) -> Self {
        Self {
            outcomes: Proportion::from_outcomes(rows.iter().map(|row| row.correct)),
            response_time_sec: DescriptiveStats::new(rows.iter().map(|row| row.response_time_sec)),
        }
    }

    #[must_use]
    pub fn item_count(&self) -> usize {
        self.outcomes.trials
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.outcomes.successes
    }

    /// Accuracy in `[0, 1]`; `None` signals an empty group.
    #[must_use]
    pub fn accuracy(&self) -> Option<f64> {
        self.outcomes.rate()
    }

    #[must_use]
    pub fn mean_response_time_sec(&self) -> Option<f64> {
        self.response_time_sec.as_ref().map(|stats| stats.mean)
    }
}

/// Group aggregates keyed by the grouping key.
#[derive(Debug, Clone, PartialEq)]
pub struct StratifiedAggregates<K> {
    pub map: BTreeMap<K, GroupAggregate>,
}

impl<K> StratifiedAggregates<K> {
    /// Groups the table rows by a custom key.
    ///
    /// # Examples
    ///
    /// ```
    /// use jacet_analysis::{response_table::ResponseTable, stratify::StratifiedAggregates};
    ///
    /// let table = ResponseTable::default();
    /// let by_answer_length = StratifiedAggregates::collect_by_group(&table, |row| {
    ///     row.correct_answer.chars().count()
    /// });
    /// assert!(by_answer_length.map.is_empty());
    /// ```
    pub fn collect_by_group<F>(table: &ResponseTable, mut group: F) -> Self
    where
        F: FnMut(&VocabResponseRow) -> K,
        K: Ord,
    {
        let mut rows_map: BTreeMap<K, Vec<&VocabResponseRow>> = BTreeMap::new();
        for row in table.rows() {
            rows_map.entry(group(row)).or_default().push(row);
        }

        Self {
            map: rows_map
                .into_iter()
                .map(|(key, rows)| (key, GroupAggregate::from_rows(&rows)))
                .collect(),
        }
    }

    /// Total number of rows over all groups.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.map.values().map(GroupAggregate::item_count).sum()
    }
}

impl StratifiedAggregates<u32> {
    /// Aggregates by proficiency level, ascending.
    #[must_use]
    pub fn by_level(table: &ResponseTable) -> Self {
        Self::collect_by_group(table, |row| row.level)
    }
}

impl StratifiedAggregates<String> {
    /// Aggregates by part of speech, in lexical order.
    #[must_use]
    pub fn by_part_of_speech(table: &ResponseTable) -> Self {
        Self::collect_by_group(table, |row| row.part_of_speech.clone())
    }
}
