use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgGroup, Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use learnpath_analytics::config::TODAY_ENV;
use learnpath_analytics::models::{AtRiskRequest, GradeForecastRequest, StudyPlanRequest};
use learnpath_analytics::{input, logging, report, Clock};

#[derive(Parser)]
#[command(name = "learnpath")]
#[command(about = "Study plans, at-risk scoring and grade forecasts for learners", long_about = None)]
struct Cli {
    /// Plan start date as YYYY-MM-DD (defaults to today, UTC)
    #[arg(long, global = true, env = TODAY_ENV)]
    today: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a day-by-day study plan from a JSON request
    Plan {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Score learners for risk of falling behind
    #[command(group(
        ArgGroup::new("source")
            .args(["input", "csv"])
            .required(true)
            .multiple(false)
    ))]
    AtRisk {
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long)]
        csv: Option<PathBuf>,
        #[arg(long)]
        course: Option<String>,
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Forecast whether a target final grade is still reachable
    Forecast {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Generate a markdown at-risk report
    #[command(group(
        ArgGroup::new("source")
            .args(["input", "csv"])
            .required(true)
            .multiple(false)
    ))]
    Report {
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long)]
        csv: Option<PathBuf>,
        #[arg(long)]
        course: Option<String>,
        #[arg(long, default_value_t = 10)]
        limit: usize,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    logging::init();
    let cli = Cli::parse();

    let today = cli
        .today
        .as_deref()
        .map(input::parse_date)
        .transpose()
        .with_context(|| format!("--today / {TODAY_ENV} must be a date"))?;
    let clock = Clock::with_today(today);

    match cli.command {
        Commands::Plan { input: path, out } => {
            let request: StudyPlanRequest =
                input::read_json(&path).context("failed to load study plan request")?;
            let plan = learnpath_analytics::build_study_plan(&request, &clock);
            write_json(&plan, out.as_deref(), "Study plan")?;
        }
        Commands::AtRisk {
            input: json,
            csv,
            course,
            limit,
            out,
        } => {
            let request = load_at_risk(json.as_deref(), csv.as_deref(), course)?;
            let mut scored = learnpath_analytics::score_at_risk(&request, &clock);
            if let Some(limit) = limit {
                scored.learners.truncate(limit);
            }
            write_json(&scored, out.as_deref(), "At-risk scores")?;
        }
        Commands::Forecast { input: path, out } => {
            let request: GradeForecastRequest =
                input::read_json(&path).context("failed to load grade forecast request")?;
            let forecast = learnpath_analytics::forecast_grade(&request, &clock);
            write_json(&forecast, out.as_deref(), "Grade forecast")?;
        }
        Commands::Report {
            input: json,
            csv,
            course,
            limit,
            out,
        } => {
            let request = load_at_risk(json.as_deref(), csv.as_deref(), course)?;
            let scored = learnpath_analytics::score_at_risk(&request, &clock);
            let markdown = report::build_report(&scored, limit);
            std::fs::write(&out, markdown)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}

fn load_at_risk(
    json: Option<&Path>,
    csv: Option<&Path>,
    course: Option<String>,
) -> anyhow::Result<AtRiskRequest> {
    let mut request: AtRiskRequest = match (json, csv) {
        (Some(path), _) => input::read_json(path).context("failed to load at-risk request")?,
        (None, Some(path)) => AtRiskRequest {
            course_id: None,
            learners: Some(
                input::import_signals_csv(path).context("failed to import learner signals")?,
            ),
        },
        (None, None) => anyhow::bail!("either --input or --csv is required"),
    };

    if course.is_some() {
        request.course_id = course;
    }
    Ok(request)
}

fn write_json<T: Serialize>(value: &T, out: Option<&Path>, label: &str) -> anyhow::Result<()> {
    let body = serde_json::to_string_pretty(value)?;
    match out {
        Some(path) => {
            std::fs::write(path, body + "\n")
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "wrote output");
            println!("{label} written to {}.", path.display());
        }
        None => println!("{body}"),
    }
    Ok(())
}
