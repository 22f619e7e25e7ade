//! Statistical helpers for the JACET CAT analysis tools.
//!
//! This crate provides the small set of numeric building blocks the
//! analysis pipeline needs:
//!
//! - **Descriptive statistics**: mean, median, min/max, variance, standard deviation
//! - **Proportions**: success counts with an explicitly undefined rate for empty groups
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing samples
//! - [`proportion`]: Success/trial counts and presentation rounding
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use jacet_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```
//!
//! ## Computing an accuracy
//!
//! ```
//! use jacet_stats::proportion::Proportion;
//!
//! let accuracy = Proportion::from_outcomes([true, true, false, true]);
//! assert_eq!(accuracy.rate(), Some(0.75));
//! ```

pub mod descriptive;
pub mod proportion;
