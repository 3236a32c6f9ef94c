//! Error types for the fallible edges of the crate (loading and persistence)
//!
//! The eligibility engine and scenario simulator are infallible: every input
//! is defaulted before computation. Only reading tables, profiles and the
//! profile store can fail.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EligibilityError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid row {line} in {table}: {message}")]
    InvalidTable {
        table: String,
        line: u64,
        message: String,
    },

    #[error("table {0} has no rows")]
    EmptyTable(String),
}

impl EligibilityError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, EligibilityError>;
