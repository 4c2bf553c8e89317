//! Loading request payloads from disk.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::models::LearnerSignal;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid CSV in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("invalid date {0:?}, expected YYYY-MM-DD")]
    Date(String),
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, InputError> {
    let raw = std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| InputError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads learner signals from a CSV with a
/// `user_id,completion_rate,average_score,inactivity_days,missed_deadlines` header.
/// Blank numeric cells are left for the scorer to default.
pub fn import_signals_csv(path: &Path) -> Result<Vec<LearnerSignal>, InputError> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        user_id: Option<String>,
        completion_rate: Option<f64>,
        average_score: Option<f64>,
        inactivity_days: Option<f64>,
        missed_deadlines: Option<f64>,
    }

    let csv_error = |source: csv::Error| InputError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_error)?;
    let mut signals = Vec::new();

    for result in reader.deserialize::<CsvRow>() {
        let row = result.map_err(csv_error)?;
        signals.push(LearnerSignal {
            user_id: row.user_id,
            completion_rate: row.completion_rate,
            average_score: row.average_score,
            inactivity_days: row.inactivity_days,
            missed_deadlines: row.missed_deadlines,
        });
    }

    debug!(path = %path.display(), rows = signals.len(), "imported learner signals");
    Ok(signals)
}

pub fn parse_date(text: &str) -> Result<NaiveDate, InputError> {
    text.trim()
        .parse::<NaiveDate>()
        .map_err(|_| InputError::Date(text.to_string()))
}
