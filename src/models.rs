use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyPlanRequest {
    pub learner_id: Option<String>,
    pub weekly_hours: Option<i64>,
    pub horizon_days: Option<i64>,
    pub modules: Option<Vec<StudyModule>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyModule {
    pub module_id: Option<String>,
    pub title: Option<String>,
    pub estimated_minutes: Option<i64>,
    pub difficulty: Option<i64>,
    pub due_date: Option<String>,
}

/// A study module with every optional field resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanModule {
    pub module_id: String,
    pub title: String,
    pub effort_minutes: u32,
    pub difficulty: u32,
    pub due_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeightedModule {
    pub module: PlanModule,
    pub priority: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledTask {
    pub module_id: String,
    pub title: String,
    pub minutes: u32,
    pub due_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDay {
    pub date: NaiveDate,
    pub total_minutes: u32,
    pub tasks: Vec<ScheduledTask>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BacklogEntry {
    pub module_id: String,
    pub unplanned_minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyPlan {
    pub learner_id: String,
    pub generated_at: DateTime<Utc>,
    pub daily_capacity_minutes: u32,
    pub schedule: Vec<ScheduleDay>,
    pub backlog: Vec<BacklogEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtRiskRequest {
    pub course_id: Option<String>,
    pub learners: Option<Vec<LearnerSignal>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearnerSignal {
    pub user_id: Option<String>,
    pub completion_rate: Option<f64>,
    pub average_score: Option<f64>,
    #[serde(alias = "lastActiveDaysAgo")]
    pub inactivity_days: Option<f64>,
    pub missed_deadlines: Option<f64>,
}

/// A learner signal after defaulting and clamping.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalProfile {
    pub user_id: String,
    pub completion_rate: f64,
    pub average_score: f64,
    pub inactivity_days: f64,
    pub missed_deadlines: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskResult {
    pub user_id: String,
    pub risk_score: u32,
    pub risk_level: RiskLevel,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AtRiskReport {
    pub course_id: String,
    pub evaluated_at: DateTime<Utc>,
    pub learners: Vec<RiskResult>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeForecastRequest {
    pub learner_id: Option<String>,
    pub course_id: Option<String>,
    pub completed: Option<Vec<CompletedComponent>>,
    pub remaining: Option<Vec<RemainingComponent>>,
    pub target_final_grade: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedComponent {
    pub name: Option<String>,
    pub weight_pct: Option<f64>,
    pub score_pct: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemainingComponent {
    pub name: Option<String>,
    pub weight_pct: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeForecast {
    pub learner_id: String,
    pub course_id: String,
    pub current_average: f64,
    pub earned_points: f64,
    pub remaining_weight: f64,
    pub required_average_on_remaining: f64,
    pub projected_final_at_current_pace: f64,
    pub target_final_grade: f64,
    pub target_achievable: bool,
    pub computed_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct RiskLevelSummary {
    pub level: RiskLevel,
    pub count: usize,
    pub avg_score: f64,
}
