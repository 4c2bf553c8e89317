use tracing::{debug, info};

use crate::config::Clock;
use crate::models::{
    AtRiskReport, AtRiskRequest, LearnerSignal, RiskLevel, RiskResult, SignalProfile,
};
use crate::normalize;

pub const CATCH_UP: &str = "Schedule focused catch-up sessions on unfinished modules";
pub const REMEDIAL_QUIZZES: &str = "Assign remedial quizzes before next graded assessment";
pub const OUTREACH: &str = "Trigger outreach and re-engagement reminders this week";
pub const DEADLINE_SUPPORT: &str = "Offer deadline planning support and weekly checkpoints";
pub const STABLE_PACE: &str = "Progress is stable; continue current pace";

/// Weighted risk in `[0, 100]` before rounding.
pub fn raw_score(profile: &SignalProfile) -> f64 {
    (1.0 - profile.completion_rate) * 35.0
        + (1.0 - profile.average_score / 100.0) * 30.0
        + (profile.inactivity_days / 30.0) * 20.0
        + (profile.missed_deadlines / 6.0) * 15.0
}

pub fn risk_level(score: u32) -> RiskLevel {
    match score {
        0..=39 => RiskLevel::Low,
        40..=69 => RiskLevel::Medium,
        _ => RiskLevel::High,
    }
}

pub fn recommendations(profile: &SignalProfile) -> Vec<String> {
    let mut recs = Vec::new();
    if profile.completion_rate < 0.55 {
        recs.push(CATCH_UP.to_string());
    }
    if profile.average_score < 65.0 {
        recs.push(REMEDIAL_QUIZZES.to_string());
    }
    if profile.inactivity_days > 7.0 {
        recs.push(OUTREACH.to_string());
    }
    if profile.missed_deadlines >= 2.0 {
        recs.push(DEADLINE_SUPPORT.to_string());
    }
    if recs.is_empty() {
        recs.push(STABLE_PACE.to_string());
    }
    recs
}

pub fn score_learner(signal: &LearnerSignal) -> RiskResult {
    let profile = normalize::signal_profile(signal);
    let score = normalize::round_half_up(raw_score(&profile)).clamp(0.0, 100.0) as u32;

    RiskResult {
        risk_score: score,
        risk_level: risk_level(score),
        recommendations: recommendations(&profile),
        user_id: profile.user_id,
    }
}

/// Scores every learner, highest risk first. Equal scores keep input order.
pub fn score_signals(signals: &[LearnerSignal]) -> Vec<RiskResult> {
    let mut results: Vec<RiskResult> = signals.iter().map(score_learner).collect();
    results.sort_by(|a, b| b.risk_score.cmp(&a.risk_score));
    debug!(learners = results.len(), "scored learner signals");
    results
}

pub fn score_at_risk(request: &AtRiskRequest, clock: &Clock) -> AtRiskReport {
    let learners = score_signals(request.learners.as_deref().unwrap_or_default());
    let high = learners
        .iter()
        .filter(|r| r.risk_level == RiskLevel::High)
        .count();
    info!(learners = learners.len(), high, "evaluated at-risk learners");

    AtRiskReport {
        course_id: normalize::safe_text(request.course_id.as_deref(), "unknown"),
        evaluated_at: clock.now,
        learners,
    }
}
