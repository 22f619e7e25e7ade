//! Ability (θ) trajectory reconstruction
//!
//! The adaptive engine logs an ability-update event after every vocabulary
//! response. Walking the interaction log in order and keeping only those
//! events yields the θ trajectory of the session:
//!
//! ```text
//! interactions:  start  vocab_response  mouse  vocab_response  reading_start ...
//! trajectory:           question 1             question 2
//! ```
//!
//! The number of points is independent of the response table length. A lossy
//! log can make the two differ; that is reported as a cross-check by the
//! pipeline, never treated as an error.

use serde::{Deserialize, Serialize};

use crate::{
    error::{AnalysisError, required},
    session::{Correctness, Interaction},
};

/// Action tag of ability-update events.
pub const ABILITY_UPDATE_ACTION: &str = "vocab_response";

const INTERACTIONS_PATH: &str = "sessionInfo.interactions";

/// Ability estimate after one response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrajectoryPoint {
    /// 1-based question index
    pub question: usize,
    pub theta: f64,
    pub se: f64,
    pub correct: bool,
}

impl TrajectoryPoint {
    /// `θ + SE`, unclamped.
    #[must_use]
    pub fn upper_bound(&self) -> f64 {
        self.theta + self.se
    }

    /// `θ − SE`, unclamped.
    #[must_use]
    pub fn lower_bound(&self) -> f64 {
        self.theta - self.se
    }
}

/// Payload of an ability-update event.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AbilityUpdate {
    new_theta: Option<f64>,
    #[serde(rename = "newSE")]
    new_se: Option<f64>,
    correct: Option<Correctness>,
}

/// Ordered θ trajectory of one session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AbilityTrajectory {
    points: Vec<TrajectoryPoint>,
}

impl AbilityTrajectory {
    /// Reconstructs the trajectory from the interaction log.
    ///
    /// Events with other action tags are skipped. Fails if an ability-update
    /// event lacks `newTheta`, `newSE` or `correct`, or has a negative SE.
    pub fn reconstruct(interactions: &[Interaction]) -> Result<Self, AnalysisError> {
        let mut points = Vec::new();

        for (index, interaction) in interactions.iter().enumerate() {
            if interaction.action != ABILITY_UPDATE_ACTION {
                continue;
            }

            let path = format!("{INTERACTIONS_PATH}[{index}].data");
            let data = interaction
                .data
                .clone()
                .ok_or_else(|| AnalysisError::missing(&path))?;
            let update: AbilityUpdate = serde_json::from_value(data)
                .map_err(|e| AnalysisError::schema(&path, e.to_string()))?;

            let theta = required(update.new_theta.as_ref(), &path, "newTheta")?;
            let se = required(update.new_se.as_ref(), &path, "newSE")?;
            let correct = required(update.correct.as_ref(), &path, "correct")?.0;
            if se < 0.0 {
                return Err(AnalysisError::schema(
                    format!("{path}.newSE"),
                    format!("standard error must be non-negative, got {se}"),
                ));
            }

            points.push(TrajectoryPoint {
                question: points.len() + 1,
                theta,
                se,
                correct,
            });
        }

        Ok(Self { points })
    }

    #[must_use]
    pub fn points(&self) -> &[TrajectoryPoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Last recorded point, if any.
    #[must_use]
    pub fn last(&self) -> Option<&TrajectoryPoint> {
        self.points.last()
    }

    /// Series with confidence bounds, as consumed by chart renderers.
    #[must_use]
    pub fn series(&self) -> Vec<TrajectorySeriesPoint> {
        self.points
            .iter()
            .map(|point| TrajectorySeriesPoint {
                question: point.question,
                theta: point.theta,
                se: point.se,
                upper: point.upper_bound(),
                lower: point.lower_bound(),
                correct: point.correct,
            })
            .collect()
    }
}

/// A trajectory point with its `θ ± SE` band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrajectorySeriesPoint {
    pub question: usize,
    pub theta: f64,
    pub se: f64,
    pub upper: f64,
    pub lower: f64,
    pub correct: bool,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn update(theta: f64, se: f64, correct: u8) -> Interaction {
        Interaction {
            action: ABILITY_UPDATE_ACTION.to_owned(),
            data: Some(json!({ "newTheta": theta, "newSE": se, "correct": correct })),
        }
    }

    fn other(action: &str) -> Interaction {
        Interaction {
            action: action.to_owned(),
            data: Some(json!({ "x": 1 })),
        }
    }

    #[test]
    fn test_question_index_skips_other_events() {
        let interactions = vec![
            other("start"),
            update(0.1, 0.9, 1),
            other("mouse_click"),
            other("focus"),
            update(0.3, 0.7, 0),
            update(0.2, 0.6, 1),
            other("reading_start"),
        ];
        let trajectory = AbilityTrajectory::reconstruct(&interactions).unwrap();
        let questions = trajectory
            .points()
            .iter()
            .map(|p| p.question)
            .collect::<Vec<_>>();
        assert_eq!(questions, vec![1, 2, 3]);
        assert_eq!(trajectory.points()[1].theta, 0.3);
        assert!(!trajectory.points()[1].correct);
        assert_eq!(trajectory.last().unwrap().se, 0.6);
    }

    #[test]
    fn test_no_updates_yields_empty_trajectory() {
        let trajectory = AbilityTrajectory::reconstruct(&[other("start")]).unwrap();
        assert!(trajectory.is_empty());
        assert!(trajectory.last().is_none());
    }

    #[test]
    fn test_bounds_are_unclamped() {
        let trajectory = AbilityTrajectory::reconstruct(&[update(-3.5, 1.0, 0)]).unwrap();
        let series = trajectory.series();
        assert_eq!(series[0].upper, -2.5);
        assert_eq!(series[0].lower, -4.5);
    }

    #[test]
    fn test_missing_payload_field() {
        let interactions = vec![
            update(0.1, 0.9, 1),
            Interaction {
                action: ABILITY_UPDATE_ACTION.to_owned(),
                data: Some(json!({ "newTheta": 0.2, "correct": true })),
            },
        ];
        let err = AbilityTrajectory::reconstruct(&interactions).unwrap_err();
        assert_eq!(err.schema_path(), Some("sessionInfo.interactions[1].data.newSE"));
    }

    #[test]
    fn test_missing_payload() {
        let interactions = vec![Interaction {
            action: ABILITY_UPDATE_ACTION.to_owned(),
            data: None,
        }];
        let err = AbilityTrajectory::reconstruct(&interactions).unwrap_err();
        assert_eq!(err.schema_path(), Some("sessionInfo.interactions[0].data"));
    }

    #[test]
    fn test_negative_se_is_rejected() {
        let err = AbilityTrajectory::reconstruct(&[update(0.0, -0.1, 1)]).unwrap_err();
        assert_eq!(err.schema_path(), Some("sessionInfo.interactions[0].data.newSE"));
    }
}
