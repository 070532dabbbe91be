// src/pipeline.rs

//! The batch run: listing pages → basic-info table → per-proposal status
//! table → coverage check.

use anyhow::{bail, Result};
use tracing::{error, info, instrument, warn};

use crate::config::Config;
use crate::dataset::{Dataset, Record};
use crate::error::ScrapeError;
use crate::extract::{ddt, go, gto, Extraction, Flavor};
use crate::fetch::Fetch;
use crate::reconcile::ID_COLUMN;
use crate::status::{self, Outcome};

/// Scrape every configured listing page into one table.
///
/// A page that cannot be fetched or does not have the expected columns
/// is logged and left out; the others are still collected.
#[instrument(level = "info", skip_all)]
pub fn collect_programs<F: Fetch>(fetcher: &F, config: &Config) -> Dataset {
    let timeout = config.page_timeout();
    let mut dataset = Dataset::new();

    for page in &config.go_pages {
        let result = go::scrape(fetcher, &page.url, &page.cycle, timeout);
        absorb(&mut dataset, Flavor::GeneralObserver, &page.url, result);
    }
    for url in &config.gto_pages {
        absorb(&mut dataset, Flavor::GuaranteedTime, url, gto::scrape(fetcher, url, timeout));
    }
    for url in &config.ddt_pages {
        absorb(&mut dataset, Flavor::Discretionary, url, ddt::scrape(fetcher, url, timeout));
    }

    info!(rows = dataset.len(), columns = dataset.headers().len(), "programs collected");
    dataset
}

fn absorb(
    dataset: &mut Dataset,
    flavor: Flavor,
    url: &str,
    result: Result<Extraction, ScrapeError>,
) {
    match result {
        Ok(extraction) => {
            info!(flavor = flavor.label(), %url, rows = extraction.rows.len(), "page extracted");
            dataset.push_extraction(&extraction, flavor);
        }
        Err(e) => error!(flavor = flavor.label(), %url, error = %e, "skipping page"),
    }
}

/// Distinct proposal IDs in a basic-info table, sorted.
pub fn proposal_ids(programs: &Dataset) -> Result<Vec<String>> {
    if programs.is_empty() {
        return Ok(Vec::new());
    }
    match programs.column_values(ID_COLUMN) {
        Some(ids) => Ok(ids.into_iter().filter(|id| !id.is_empty()).collect()),
        None => bail!("program table has no `{}` column", ID_COLUMN),
    }
}

#[derive(Debug, Default)]
pub struct StatusRun {
    pub dataset: Dataset,
    /// Proposals whose lookups ran out of attempts.
    pub exhausted: Vec<String>,
    /// Proposals whose lookups failed outright.
    pub failed: Vec<String>,
}

/// Look up every proposal's visit status. Each kept record is prefixed
/// with an `ID` column holding the proposal it belongs to.
#[instrument(level = "info", skip_all, fields(proposals = ids.len()))]
pub fn collect_status<F: Fetch>(fetcher: &F, config: &Config, ids: &[String]) -> StatusRun {
    let policy = config.status.policy();
    let mut run = StatusRun::default();
    run.dataset.add_column(ID_COLUMN);

    for id in ids {
        let report = match status::fetch_status(fetcher, &config.status_url, id, &policy) {
            Ok(report) => report,
            Err(e) => {
                error!(proposal_id = %id, error = %e, "status lookup failed");
                run.failed.push(id.clone());
                continue;
            }
        };
        match report.outcome {
            Outcome::Fetched { attempts } => {
                info!(proposal_id = %id, attempts, visits = report.records.len(), "status fetched")
            }
            Outcome::Exhausted { attempts } => {
                warn!(proposal_id = %id, attempts, "status unavailable");
                run.exhausted.push(id.clone());
            }
        }

        for name in &report.headers {
            run.dataset.add_column(name);
        }
        for visit in report.records {
            let mut record = Record::with_capacity(visit.len() + 1);
            record.insert(ID_COLUMN.to_string(), id.clone());
            record.extend(visit);
            run.dataset.push_record(record);
        }
    }

    run
}
