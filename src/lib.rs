//! Learning-analytics engine: study plans, at-risk scoring and grade forecasts.
//!
//! Every operation is a pure function of its request and a [`Clock`].

pub mod config;
pub mod forecast;
pub mod input;
pub mod logging;
pub mod models;
pub mod normalize;
pub mod priority;
pub mod report;
pub mod risk;
pub mod schedule;

pub use config::Clock;
pub use forecast::forecast_grade;
pub use risk::score_at_risk;
pub use schedule::build_study_plan;
