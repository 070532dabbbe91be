// src/error.rs

use thiserror::Error;

/// Failure of a single GET.
///
/// Only `Timeout` and `Connect` are considered transient; the status
/// fetcher retries those and lets everything else propagate.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("GET {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("GET {url} timed out: {message}")]
    Timeout { url: String, message: String },

    #[error("could not connect to {url}: {message}")]
    Connect { url: String, message: String },

    #[error("GET {url} failed: {message}")]
    Request { url: String, message: String },
}

impl FetchError {
    pub fn is_transient(&self) -> bool {
        matches!(self, FetchError::Timeout { .. } | FetchError::Connect { .. })
    }

    pub fn url(&self) -> &str {
        match self {
            FetchError::Status { url, .. }
            | FetchError::Timeout { url, .. }
            | FetchError::Connect { url, .. }
            | FetchError::Request { url, .. } => url,
        }
    }
}

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The header row carries none of the names the filter column is known by.
    #[error("table header has none of the columns {expected:?} (found {found:?})")]
    MissingColumn {
        expected: Vec<String>,
        found: Vec<String>,
    },
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{path}: no `{column}` column")]
    MissingColumn { path: String, column: String },
}
