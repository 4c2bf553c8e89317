use chrono::NaiveDate;
use tracing::debug;

use crate::models::{StudyModule, WeightedModule};
use crate::normalize;

/// Due-date pressure in `(0, 1]`; 1.0 for work due on the start day.
pub fn urgency(days_until_due: i64, horizon_days: u32) -> f64 {
    let horizon = i64::from(horizon_days);
    let days = days_until_due.max(0).min(horizon);
    (horizon - days + 1) as f64 / (horizon + 1) as f64
}

/// Ranks modules by `effort × difficulty × (1 + urgency)`, highest first.
///
/// Ties keep their input order.
pub fn rank_modules(
    modules: &[StudyModule],
    start: NaiveDate,
    horizon_days: u32,
) -> Vec<WeightedModule> {
    let end = normalize::horizon_end(start, horizon_days);

    let mut weighted: Vec<WeightedModule> = modules
        .iter()
        .map(|module| {
            let module = normalize::plan_module(module, start, end);
            let days_until_due = (module.due_date - start).num_days();
            let workload = f64::from(module.effort_minutes) * f64::from(module.difficulty);
            let priority = workload * (1.0 + urgency(days_until_due, horizon_days));
            WeightedModule { module, priority }
        })
        .collect();

    weighted.sort_by(|a, b| b.priority.total_cmp(&a.priority));
    debug!(modules = weighted.len(), horizon_days, "ranked study modules");
    weighted
}
