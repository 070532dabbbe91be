// src/status/mod.rs

//! Visit-status lookup for a single proposal.

use std::thread;
use std::time::Duration;
use tracing::{error, warn};

use crate::error::ScrapeError;
use crate::fetch::{urls, Fetch};
use crate::tables;

mod page;

pub use page::{extract, StatusRecord, MOS_TEMPLATE, TEMPLATE_COLUMN};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, not retries after the first.
    pub retries: u32,
    pub timeout: Duration,
    /// Fixed pause after each transient failure.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 3,
            timeout: Duration::from_secs(60),
            backoff: Duration::from_secs(5),
        }
    }
}

/// How the lookup ended. An exhausted lookup still returns an (empty)
/// report, so this is the only way to tell it apart from a proposal that
/// simply has no MOS visits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Fetched { attempts: u32 },
    Exhausted { attempts: u32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusReport {
    pub records: Vec<StatusRecord>,
    pub headers: Vec<String>,
    pub outcome: Outcome,
}

impl StatusReport {
    pub fn is_exhausted(&self) -> bool {
        matches!(self.outcome, Outcome::Exhausted { .. })
    }
}

/// Fetch and filter the visit-status page for `proposal_id`.
///
/// Timeouts and connection failures are retried up to `policy.retries`
/// attempts in total; when every attempt fails the report is empty and
/// marked [`Outcome::Exhausted`]. Any other fetch error, including a bad
/// HTTP status, is returned straight away.
pub fn fetch_status<F: Fetch>(
    fetcher: &F,
    endpoint: &str,
    proposal_id: &str,
    policy: &RetryPolicy,
) -> Result<StatusReport, ScrapeError> {
    let url = urls::status_url(endpoint, proposal_id)?;
    let mut attempt = 0;

    while attempt < policy.retries {
        attempt += 1;
        match fetcher.fetch(url.as_str(), policy.timeout) {
            Ok(body) => {
                let (records, headers) = extract(&tables::parse(&body));
                return Ok(StatusReport {
                    records,
                    headers,
                    outcome: Outcome::Fetched { attempts: attempt },
                });
            }
            Err(e) if e.is_transient() => {
                warn!(%proposal_id, attempt, error = %e, "status fetch failed, retrying");
                if attempt < policy.retries {
                    thread::sleep(policy.backoff);
                }
            }
            Err(e) => return Err(e.into()),
        }
    }

    error!(%proposal_id, attempts = attempt, "giving up on status fetch");
    Ok(StatusReport {
        records: Vec::new(),
        headers: Vec::new(),
        outcome: Outcome::Exhausted { attempts: attempt },
    })
}
