//! Defaulting and clamping of request fields.
//!
//! Every engine entry point runs its input through here first, so the
//! algorithms only ever see fully-populated records.

use chrono::{Duration, NaiveDate};
use tracing::warn;

use crate::config::{
    DEFAULT_DIFFICULTY, DEFAULT_HORIZON_DAYS, DEFAULT_MODULE_MINUTES, DEFAULT_WEEKLY_HOURS,
    MAX_WEEKLY_HOURS, MIN_MODULE_MINUTES,
};
use crate::models::{LearnerSignal, PlanModule, SignalProfile, StudyModule};

/// Clamps `value` into `[min, max]`; missing or non-finite values become `fallback`.
pub fn bounded(value: Option<f64>, min: f64, max: f64, fallback: f64) -> f64 {
    match value {
        Some(v) if v.is_finite() => v.clamp(min, max),
        _ => fallback,
    }
}

/// Trimmed text, or `fallback` when missing or blank.
pub fn safe_text(value: Option<&str>, fallback: &str) -> String {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => fallback.to_string(),
    }
}

/// Rounds half-up (toward positive infinity on a tie).
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

pub fn round2(value: f64) -> f64 {
    round_half_up(value * 100.0) / 100.0
}

pub fn weekly_hours(value: Option<i64>) -> u32 {
    value
        .unwrap_or(DEFAULT_WEEKLY_HOURS)
        .clamp(1, MAX_WEEKLY_HOURS) as u32
}

/// At least one day. The only upper bound is the last date chrono can
/// represent, counted from `start`.
pub fn horizon_days(value: Option<i64>, start: NaiveDate) -> u32 {
    let representable = (NaiveDate::MAX - start).num_days() + 1;
    let max = representable.min(i64::from(u32::MAX));
    value.unwrap_or(DEFAULT_HORIZON_DAYS).clamp(1, max) as u32
}

pub fn horizon_end(start: NaiveDate, horizon_days: u32) -> NaiveDate {
    start + Duration::days(i64::from(horizon_days) - 1)
}

/// Parses an ISO `YYYY-MM-DD` due date.
///
/// Missing, unparseable, or past dates resolve to `horizon_end` so nothing
/// is ever scheduled before `start`.
pub fn due_date(text: Option<&str>, start: NaiveDate, horizon_end: NaiveDate) -> NaiveDate {
    let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
        return horizon_end;
    };
    match text.parse::<NaiveDate>() {
        Ok(date) if date < start => {
            warn!(due_date = %date, %start, "due date is in the past, using horizon end");
            horizon_end
        }
        Ok(date) => date,
        Err(err) => {
            warn!(due_date = text, error = %err, "unparseable due date, using horizon end");
            horizon_end
        }
    }
}

pub fn plan_module(module: &StudyModule, start: NaiveDate, horizon_end: NaiveDate) -> PlanModule {
    let effort = module
        .estimated_minutes
        .unwrap_or(DEFAULT_MODULE_MINUTES)
        .clamp(MIN_MODULE_MINUTES, i64::from(u32::MAX));
    let difficulty = module.difficulty.unwrap_or(DEFAULT_DIFFICULTY).clamp(1, 5);

    PlanModule {
        module_id: safe_text(module.module_id.as_deref(), "module"),
        title: safe_text(module.title.as_deref(), "Module"),
        effort_minutes: effort as u32,
        difficulty: difficulty as u32,
        due_date: due_date(module.due_date.as_deref(), start, horizon_end),
    }
}

pub fn signal_profile(signal: &LearnerSignal) -> SignalProfile {
    SignalProfile {
        user_id: safe_text(signal.user_id.as_deref(), "unknown"),
        completion_rate: bounded(signal.completion_rate, 0.0, 1.0, 0.5),
        average_score: bounded(signal.average_score, 0.0, 100.0, 65.0),
        inactivity_days: bounded(signal.inactivity_days, 0.0, 30.0, 7.0),
        missed_deadlines: bounded(signal.missed_deadlines, 0.0, 6.0, 1.0),
    }
}
