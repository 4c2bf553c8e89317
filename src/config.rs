use chrono::{DateTime, NaiveDate, Utc};

/// Environment variable that pins the plan start date, e.g. `2030-01-01`.
pub const TODAY_ENV: &str = "LEARNPATH_TODAY";

pub const DEFAULT_WEEKLY_HOURS: i64 = 8;
/// Keeps `weekly_hours * 60` within `u32`.
pub const MAX_WEEKLY_HOURS: i64 = u32::MAX as i64 / 60;
pub const DEFAULT_HORIZON_DAYS: i64 = 14;
pub const MIN_DAILY_CAPACITY_MINUTES: u32 = 30;

pub const MIN_MODULE_MINUTES: i64 = 15;
pub const DEFAULT_MODULE_MINUTES: i64 = 45;
pub const DEFAULT_DIFFICULTY: i64 = 3;

pub const DEFAULT_TARGET_GRADE: f64 = 85.0;

/// The instant an evaluation runs at and the calendar day plans start on.
///
/// Engine operations never read the system clock themselves, so two calls
/// with the same `Clock` and input produce the same output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    pub now: DateTime<Utc>,
    pub today: NaiveDate,
}

impl Clock {
    pub fn system() -> Self {
        let now = Utc::now();
        Self {
            now,
            today: now.date_naive(),
        }
    }

    pub fn fixed(now: DateTime<Utc>, today: NaiveDate) -> Self {
        Self { now, today }
    }

    /// System time, with the plan start day overridden when one is given.
    pub fn with_today(today: Option<NaiveDate>) -> Self {
        let clock = Self::system();
        match today {
            Some(today) => Self { today, ..clock },
            None => clock,
        }
    }
}
