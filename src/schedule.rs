use chrono::{Duration, NaiveDate};
use tracing::{debug, info};

use crate::config::{Clock, MIN_DAILY_CAPACITY_MINUTES};
use crate::models::{
    BacklogEntry, ScheduleDay, ScheduledTask, StudyPlan, StudyPlanRequest, WeightedModule,
};
use crate::normalize;
use crate::priority;

pub fn daily_capacity_minutes(weekly_hours: u32) -> u32 {
    (weekly_hours * 60 / 7).max(MIN_DAILY_CAPACITY_MINUTES)
}

/// Greedily places ranked modules into days from `start`.
///
/// Each module, in the order given, fills whatever room is left on each day
/// up to the earlier of its due date and the horizon end. Placements are
/// never revisited; anything that does not fit becomes backlog.
pub fn schedule_modules(
    ranked: &[WeightedModule],
    start: NaiveDate,
    horizon_days: u32,
    daily_capacity: u32,
) -> (Vec<ScheduleDay>, Vec<BacklogEntry>) {
    let end = normalize::horizon_end(start, horizon_days);
    let mut days: Vec<ScheduleDay> = (0..horizon_days)
        .map(|offset| ScheduleDay {
            date: start + Duration::days(i64::from(offset)),
            total_minutes: 0,
            tasks: Vec::new(),
        })
        .collect();
    let mut backlog = Vec::new();

    for weighted in ranked {
        let module = &weighted.module;
        let latest = module.due_date.min(end);
        let last_offset = (latest - start).num_days();
        let mut remaining = module.effort_minutes;

        for day in days.iter_mut().take((last_offset + 1).max(0) as usize) {
            if remaining == 0 {
                break;
            }
            let room = daily_capacity.saturating_sub(day.total_minutes);
            if room == 0 {
                continue;
            }
            let assigned = room.min(remaining);
            day.tasks.push(ScheduledTask {
                module_id: module.module_id.clone(),
                title: module.title.clone(),
                minutes: assigned,
                due_date: module.due_date,
            });
            day.total_minutes += assigned;
            remaining -= assigned;
        }

        if remaining > 0 {
            debug!(
                module_id = %module.module_id,
                unplanned_minutes = remaining,
                "module did not fit before its due date"
            );
            backlog.push(BacklogEntry {
                module_id: module.module_id.clone(),
                unplanned_minutes: remaining,
            });
        }
    }

    (days, backlog)
}

pub fn build_study_plan(request: &StudyPlanRequest, clock: &Clock) -> StudyPlan {
    let weekly_hours = normalize::weekly_hours(request.weekly_hours);
    let horizon_days = normalize::horizon_days(request.horizon_days, clock.today);
    let daily_capacity = daily_capacity_minutes(weekly_hours);
    let modules = request.modules.as_deref().unwrap_or_default();

    let ranked = priority::rank_modules(modules, clock.today, horizon_days);
    let (schedule, backlog) = schedule_modules(&ranked, clock.today, horizon_days, daily_capacity);

    info!(
        start = %clock.today,
        horizon_days,
        daily_capacity,
        modules = modules.len(),
        backlog = backlog.len(),
        "built study plan"
    );

    StudyPlan {
        learner_id: normalize::safe_text(request.learner_id.as_deref(), "anonymous"),
        generated_at: clock.now,
        daily_capacity_minutes: daily_capacity,
        schedule,
        backlog,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StudyModule;
    use chrono::{TimeZone, Utc};

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 1, 1).unwrap()
    }

    fn clock() -> Clock {
        Clock::fixed(Utc.with_ymd_and_hms(2030, 1, 1, 9, 0, 0).unwrap(), start())
    }

    fn module(id: &str, minutes: i64, difficulty: i64, due: Option<&str>) -> StudyModule {
        StudyModule {
            module_id: Some(id.to_string()),
            title: Some(format!("{id} title")),
            estimated_minutes: Some(minutes),
            difficulty: Some(difficulty),
            due_date: due.map(str::to_string),
        }
    }

    fn request(weekly_hours: i64, horizon_days: i64, modules: Vec<StudyModule>) -> StudyPlanRequest {
        StudyPlanRequest {
            learner_id: Some("u-1".to_string()),
            weekly_hours: Some(weekly_hours),
            horizon_days: Some(horizon_days),
            modules: Some(modules),
        }
    }

    fn minutes_for(plan: &StudyPlan, module_id: &str) -> u32 {
        plan.schedule
            .iter()
            .flat_map(|day| day.tasks.iter())
            .filter(|task| task.module_id == module_id)
            .map(|task| task.minutes)
            .sum()
    }

    fn backlog_for(plan: &StudyPlan, module_id: &str) -> u32 {
        plan.backlog
            .iter()
            .filter(|entry| entry.module_id == module_id)
            .map(|entry| entry.unplanned_minutes)
            .sum()
    }

    #[test]
    fn capacity_has_a_floor() {
        assert_eq!(daily_capacity_minutes(7), 60);
        assert_eq!(daily_capacity_minutes(8), 68);
        assert_eq!(daily_capacity_minutes(1), 30);
        assert_eq!(daily_capacity_minutes(3), 30);
    }

    #[test]
    fn long_horizons_and_heavy_weeks_are_honored() {
        let plan = build_study_plan(&request(200, 400, vec![module("a", 90, 2, None)]), &clock());

        assert_eq!(plan.daily_capacity_minutes, 1714);
        assert_eq!(plan.schedule.len(), 400);
        assert_eq!(plan.schedule[399].date, start() + Duration::days(399));
        assert_eq!(plan.schedule[0].total_minutes, 90);
        assert!(plan.backlog.is_empty());
    }

    #[test]
    fn two_module_plan_fills_days_in_priority_order() {
        let plan = build_study_plan(
            &request(
                7,
                5,
                vec![
                    module("m1", 120, 4, Some("2030-01-03")),
                    module("m2", 90, 5, Some("2030-01-05")),
                ],
            ),
            &clock(),
        );

        assert_eq!(plan.learner_id, "u-1");
        assert_eq!(plan.daily_capacity_minutes, 60);
        assert_eq!(plan.schedule.len(), 5);
        let loads: Vec<u32> = plan.schedule.iter().map(|d| d.total_minutes).collect();
        assert_eq!(loads, [60, 60, 60, 30, 0]);
        assert_eq!(plan.schedule[0].tasks[0].module_id, "m1");
        assert_eq!(plan.schedule[2].tasks[0].module_id, "m2");
        assert!(plan.backlog.is_empty());
    }

    #[test]
    fn overflow_before_due_dates_becomes_backlog() {
        let plan = build_study_plan(
            &request(
                3,
                5,
                vec![
                    module("m1", 120, 4, Some("2030-01-03")),
                    module("m2", 90, 5, Some("2030-01-05")),
                ],
            ),
            &clock(),
        );

        assert_eq!(plan.daily_capacity_minutes, 30);
        assert_eq!(minutes_for(&plan, "m1"), 90);
        assert_eq!(backlog_for(&plan, "m1"), 30);
        assert_eq!(minutes_for(&plan, "m2"), 60);
        assert_eq!(backlog_for(&plan, "m2"), 30);
        assert!(plan.schedule.iter().all(|d| d.total_minutes <= 30));
    }

    #[test]
    fn earlier_placements_are_not_reclaimed() {
        // "big" outranks "quick" and takes every day, including the day "quick" is due.
        let plan = build_study_plan(
            &request(
                1,
                3,
                vec![
                    module("quick", 30, 1, Some("2030-01-01")),
                    module("big", 90, 5, None),
                ],
            ),
            &clock(),
        );

        assert_eq!(minutes_for(&plan, "big"), 90);
        assert_eq!(plan.backlog.len(), 1);
        assert_eq!(plan.backlog[0].module_id, "quick");
        assert_eq!(plan.backlog[0].unplanned_minutes, 30);
    }

    #[test]
    fn effort_is_conserved_and_capacity_respected() {
        let modules = vec![
            module("a", 240, 2, Some("2030-01-04")),
            module("b", 45, 5, Some("2030-01-02")),
            module("c", 15, 1, None),
            module("d", 500, 3, Some("2030-01-07")),
            module("e", 70, 4, Some("2030-01-01")),
        ];
        let plan = build_study_plan(&request(6, 7, modules.clone()), &clock());

        for module in &modules {
            let id = module.module_id.as_deref().unwrap();
            let effort = module.estimated_minutes.unwrap().max(15) as u32;
            assert_eq!(minutes_for(&plan, id) + backlog_for(&plan, id), effort, "{id}");
        }
        for day in &plan.schedule {
            assert!(day.total_minutes <= plan.daily_capacity_minutes);
            let sum: u32 = day.tasks.iter().map(|t| t.minutes).sum();
            assert_eq!(sum, day.total_minutes);
        }
    }

    #[test]
    fn tasks_never_land_after_due_date() {
        let plan = build_study_plan(
            &request(
                2,
                10,
                vec![
                    module("x", 200, 3, Some("2030-01-03")),
                    module("y", 200, 2, Some("2030-01-20")),
                ],
            ),
            &clock(),
        );
        for day in &plan.schedule {
            for task in &day.tasks {
                assert!(day.date <= task.due_date);
            }
        }
        assert_eq!(plan.schedule.last().unwrap().date, start() + Duration::days(9));
    }

    #[test]
    fn past_and_invalid_due_dates_schedule_within_horizon() {
        let plan = build_study_plan(
            &request(
                14,
                4,
                vec![
                    module("late", 60, 2, Some("2029-12-01")),
                    module("fuzzy", 60, 2, Some("whenever")),
                ],
            ),
            &clock(),
        );
        let end = start() + Duration::days(3);
        assert!(plan.backlog.is_empty());
        for day in &plan.schedule {
            for task in &day.tasks {
                assert_eq!(task.due_date, end);
            }
        }
    }

    #[test]
    fn empty_request_yields_empty_days() {
        let plan = build_study_plan(&StudyPlanRequest::default(), &clock());
        assert_eq!(plan.learner_id, "anonymous");
        assert_eq!(plan.daily_capacity_minutes, 68);
        assert_eq!(plan.schedule.len(), 14);
        assert!(plan.schedule.iter().all(|d| d.tasks.is_empty() && d.total_minutes == 0));
        assert!(plan.backlog.is_empty());
    }

    #[test]
    fn identical_input_gives_identical_plan() {
        let req = request(
            5,
            6,
            vec![module("a", 100, 3, None), module("b", 100, 3, Some("2030-01-02"))],
        );
        assert_eq!(build_study_plan(&req, &clock()), build_study_plan(&req, &clock()));
    }
}
