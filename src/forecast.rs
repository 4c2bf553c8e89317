use tracing::info;

use crate::config::{Clock, DEFAULT_TARGET_GRADE};
use crate::models::{GradeForecast, GradeForecastRequest};
use crate::normalize::{bounded, round2, safe_text};

/// Projects a final grade from weighted components.
///
/// Missing weights and scores count as zero. With no completed weight the
/// current average is 0; with no remaining weight the required average is 0.
pub fn forecast_grade(request: &GradeForecastRequest, clock: &Clock) -> GradeForecast {
    let target = bounded(request.target_final_grade, 0.0, 100.0, DEFAULT_TARGET_GRADE);

    let mut completed_weight = 0.0;
    let mut earned_points = 0.0;
    for item in request.completed.as_deref().unwrap_or_default() {
        let weight = bounded(item.weight_pct, 0.0, 100.0, 0.0);
        let score = bounded(item.score_pct, 0.0, 100.0, 0.0);
        completed_weight += weight;
        earned_points += weight * score / 100.0;
    }

    let remaining_weight: f64 = request
        .remaining
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|item| bounded(item.weight_pct, 0.0, 100.0, 0.0))
        .sum();

    let current_average = if completed_weight > 0.0 {
        earned_points / completed_weight * 100.0
    } else {
        0.0
    };
    let required_average = if remaining_weight > 0.0 {
        (target - earned_points) / remaining_weight * 100.0
    } else {
        0.0
    };
    let projected_final = earned_points + remaining_weight * current_average / 100.0;
    let required_reported = round2(required_average.max(0.0));
    let achievable = required_average <= 100.0;

    info!(
        target_grade = target,
        required = required_reported,
        achievable,
        "forecast grade"
    );

    GradeForecast {
        learner_id: safe_text(request.learner_id.as_deref(), "unknown"),
        course_id: safe_text(request.course_id.as_deref(), "unknown"),
        current_average: round2(current_average),
        earned_points: round2(earned_points),
        remaining_weight: round2(remaining_weight),
        required_average_on_remaining: required_reported,
        projected_final_at_current_pace: round2(projected_final),
        target_final_grade: round2(target),
        target_achievable: achievable,
        computed_at: clock.now,
    }
}
