// src/extract/ddt.rs

//! Director's discretionary time pages. The column is "Instruments" and
//! any NIRSpec mode counts, not only MOS.

use scraper::Html;
use std::time::Duration;

use super::{scan, Extraction, ModeFilter};
use crate::error::ScrapeError;
use crate::fetch::Fetch;
use crate::tables;

pub const FILTER: ModeFilter = ModeFilter {
    columns: &["Instruments"],
    needle: "NIRSpec",
    normalize: false,
};

pub fn extract(doc: &Html) -> Result<Extraction, ScrapeError> {
    let all = tables::tables(doc).into_iter().map(|t| ((), t));
    scan(all, &FILTER, |_, _, _, _| {})
}

pub fn scrape<F: Fetch>(fetcher: &F, url: &str, timeout: Duration) -> Result<Extraction, ScrapeError> {
    let body = fetcher.fetch(url, timeout)?;
    extract(&tables::parse(&body))
}
