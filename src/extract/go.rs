// src/extract/go.rs

//! General-observer cycle pages. Tables sit in accordion sections, one
//! science topic per section; kept rows get the topic and the cycle label
//! appended.

use scraper::Html;
use std::time::Duration;

use super::{scan, Extraction, ModeFilter};
use crate::error::ScrapeError;
use crate::fetch::Fetch;
use crate::tables::{self, TopicTable};

pub const TOPIC_COLUMN: &str = "Topic";
pub const CYCLE_COLUMN: &str = "Cycle";

pub const FILTER: ModeFilter = ModeFilter {
    columns: &["Instrument/Mode", "Instrument/ Mode"],
    needle: "NIRSpec/MOS",
    normalize: true,
};

/// Extract NIRSpec/MOS rows from a parsed GO page.
///
/// Tables with no section title above them are not program tables and
/// are skipped.
pub fn extract(doc: &Html, cycle: &str) -> Result<Extraction, ScrapeError> {
    let sections = tables::topic_tables(doc)
        .into_iter()
        .filter_map(|TopicTable { topic, table }| topic.map(|t| (t, table)));

    scan(sections, &FILTER, |topic, _, _, row| {
        row.push(topic.clone());
        row.push(cycle.to_string());
    })
}

pub fn scrape<F: Fetch>(
    fetcher: &F,
    url: &str,
    cycle: &str,
    timeout: Duration,
) -> Result<Extraction, ScrapeError> {
    let body = fetcher.fetch(url, timeout)?;
    extract(&tables::parse(&body), cycle)
}
