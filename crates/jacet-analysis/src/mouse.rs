//! Mouse-movement track
//!
//! Converts the raw mouse samples into a series relative to the first
//! sample, ready for a scatter/heatmap renderer.

use serde::Serialize;

use crate::session::MouseSample;

/// A mouse sample positioned in session-relative time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MouseTrackPoint {
    pub x: f64,
    pub y: f64,
    /// Seconds since the first sample
    pub elapsed_sec: f64,
}

/// Extent of the recorded movement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MouseTrackSummary {
    pub sample_count: usize,
    /// Seconds between the first and last sample
    pub tracked_secs: f64,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MouseTrack {
    pub points: Vec<MouseTrackPoint>,
}

impl MouseTrack {
    #[must_use]
    pub fn from_samples(samples: &[MouseSample]) -> Self {
        let Some(first) = samples.first() else {
            return Self::default();
        };
        let points = samples
            .iter()
            .map(|s| MouseTrackPoint {
                x: s.x,
                y: s.y,
                elapsed_sec: (s.timestamp - first.timestamp) / 1000.0,
            })
            .collect();
        Self { points }
    }

    /// Summary of the track, `None` when no samples were recorded.
    #[must_use]
    pub fn summary(&self) -> Option<MouseTrackSummary> {
        let first = self.points.first()?;
        let last = self.points.last()?;
        let (x_range, y_range) = self.points.iter().fold(
            ((first.x, first.x), (first.y, first.y)),
            |((x_min, x_max), (y_min, y_max)), p| {
                ((x_min.min(p.x), x_max.max(p.x)), (y_min.min(p.y), y_max.max(p.y)))
            },
        );
        Some(MouseTrackSummary {
            sample_count: self.points.len(),
            tracked_secs: last.elapsed_sec - first.elapsed_sec,
            x_range,
            y_range,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(x: f64, y: f64, timestamp: f64) -> MouseSample {
        MouseSample { x, y, timestamp }
    }

    #[test]
    fn test_empty_track() {
        let track = MouseTrack::from_samples(&[]);
        assert!(track.points.is_empty());
        assert!(track.summary().is_none());
    }

    #[test]
    fn test_elapsed_is_relative_to_first_sample() {
        let track = MouseTrack::from_samples(&[
            sample(10.0, 20.0, 1_753_093_575_303.0),
            sample(15.0, 5.0, 1_753_093_576_303.0),
            sample(-2.0, 40.0, 1_753_093_577_803.0),
        ]);
        let elapsed = track.points.iter().map(|p| p.elapsed_sec).collect::<Vec<_>>();
        assert_eq!(elapsed, vec![0.0, 1.0, 2.5]);

        let summary = track.summary().unwrap();
        assert_eq!(summary.sample_count, 3);
        assert_eq!(summary.tracked_secs, 2.5);
        assert_eq!(summary.x_range, (-2.0, 15.0));
        assert_eq!(summary.y_range, (5.0, 40.0));
    }
}
