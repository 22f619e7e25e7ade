//! Offline analysis of JACET computerized adaptive test (CAT) sessions
//!
//! This crate turns one completed session log of the vocabulary/reading CAT
//! into derived analytics: per-item statistics, the ability (θ) trajectory,
//! stratified accuracy and timing breakdowns, classified error cases, reading
//! speed, and a synthesized report.
//!
//! # Overview
//!
//! The pipeline runs these stages over an immutable [`session::SessionRecord`]:
//!
//! 1. **Load** ([`session::SessionRecord`]): Parse and validate the session log
//! 2. **Response Table** ([`response_table::ResponseTable`]): Flatten vocabulary
//!    responses with response time in seconds and presentation order
//! 3. **Trajectory** ([`trajectory::AbilityTrajectory`]): Replay ability-update
//!    events into an ordered θ/SE series
//! 4. **Stratify** ([`stratify::StratifiedAggregates`]): Accuracy and mean
//!    response time per level and per part of speech
//! 5. **Classify Errors** ([`error_pattern`]): Label each incorrect response
//! 6. **Reading Metrics** ([`reading::ReadingMetrics`]): Reading time, words per
//!    minute and answer lengths per text type
//! 7. **Report** ([`report::Report`]): Markdown report and error-pattern export
//!
//! [`pipeline::SessionAnalysis`] runs all of them in order.
//!
//! # Errors
//!
//! Parse failures and missing required fields abort the analysis with an
//! [`error::AnalysisError`] naming the offending JSON path. Out-of-order
//! reading timestamps only degrade the affected reading speed to 0.
//!
//! # Examples
//!
//! ```no_run
//! use jacet_analysis::{pipeline::SessionAnalysis, session::SessionRecord};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//!
//! let bytes = std::fs::read("cat_detailed_data.json")?;
//! let record = SessionRecord::from_slice(&bytes)?;
//! let analysis = SessionAnalysis::analyze(&record)?;
//!
//! for (level, aggregate) in &analysis.levels.map {
//!     println!(
//!         "Level {level}: {}/{} correct",
//!         aggregate.correct_count(),
//!         aggregate.item_count()
//!     );
//! }
//!
//! let report = analysis.report();
//! println!("{}", report.text);
//! println!("{}", report.error_patterns_json()?);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod error_pattern;
pub mod mouse;
pub mod pipeline;
pub mod reading;
pub mod report;
pub mod response_table;
pub mod session;
pub mod stratify;
#[cfg(test)]
mod test_support;
pub mod trajectory;
