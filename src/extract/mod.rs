// src/extract/mod.rs

//! Row filters for the program-listing pages.
//!
//! The three listing layouts share one walk over their tables (see
//! [`scan`]) and differ only in which tables they look at, which column
//! they filter on, and what they append to a kept row.

use scraper::ElementRef;

use crate::error::ScrapeError;
use crate::tables::{self, cell_text, row_texts, CellKind};

pub mod ddt;
pub mod go;
pub mod gto;

/// Rows kept from one page, plus the header row they line up with.
///
/// `headers` comes from the first non-empty table only. Derived fields a
/// flavor appends to each row are not named in it; see
/// [`Flavor::derived_columns`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub rows: Vec<Vec<String>>,
    pub headers: Vec<String>,
}

impl Extraction {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    GeneralObserver,
    GuaranteedTime,
    Discretionary,
}

impl Flavor {
    /// Column names for the fields appended after the page's own cells.
    pub fn derived_columns(self) -> &'static [&'static str] {
        match self {
            Flavor::GeneralObserver => &[go::TOPIC_COLUMN, go::CYCLE_COLUMN],
            Flavor::GuaranteedTime | Flavor::Discretionary => &[],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Flavor::GeneralObserver => "GO",
            Flavor::GuaranteedTime => "GTO",
            Flavor::Discretionary => "DDT",
        }
    }
}

/// The column a flavor filters on and the text it looks for.
#[derive(Debug, Clone, Copy)]
pub struct ModeFilter {
    /// Accepted spellings of the column name, most preferred first.
    pub columns: &'static [&'static str],
    pub needle: &'static str,
    /// Strip layout whitespace from the cell before looking for `needle`.
    pub normalize: bool,
}

impl ModeFilter {
    pub fn column(&self, headers: &[String]) -> Result<usize, ScrapeError> {
        self.columns
            .iter()
            .find_map(|name| headers.iter().position(|h| h == name))
            .ok_or_else(|| ScrapeError::MissingColumn {
                expected: self.columns.iter().map(|c| c.to_string()).collect(),
                found: headers.to_vec(),
            })
    }

    pub fn matches(&self, cell: &str) -> bool {
        if self.normalize {
            normalize_mode(cell).contains(self.needle)
        } else {
            cell.contains(self.needle)
        }
    }
}

/// Drop newlines, carriage returns and spaces so that wrapped or padded
/// mode strings ("NIRSpec/ MOS") still match.
pub fn normalize_mode(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '\n' | '\r' | ' '))
        .collect()
}

/// Shared table walk.
///
/// The header row of the first table that has any rows becomes the
/// header set for the whole page. Body rows whose `td` count differs from
/// it are dropped. For every row whose filter cell matches, the stripped
/// cell texts are handed to `annotate` along with the table's context
/// value before being kept.
///
/// The filter column is resolved on the first row that needs it, so a page
/// with no comparable rows never fails on a missing column.
pub(crate) fn scan<'a, C>(
    sources: impl IntoIterator<Item = (C, ElementRef<'a>)>,
    filter: &ModeFilter,
    mut annotate: impl FnMut(&C, &[String], &[ElementRef<'a>], &mut Vec<String>),
) -> Result<Extraction, ScrapeError> {
    let mut headers: Option<Vec<String>> = None;
    let mut column: Option<usize> = None;
    let mut rows = Vec::new();

    for (ctx, table) in sources {
        let table_rows = tables::rows(table);
        let Some((head, body)) = table_rows.split_first() else {
            continue;
        };
        let effective = headers.get_or_insert_with(|| row_texts(*head, CellKind::Heading));

        for row in body {
            let cells = tables::cells(*row, CellKind::Data);
            if cells.is_empty() || cells.len() != effective.len() {
                continue;
            }
            let idx = match column {
                Some(idx) => idx,
                None => *column.insert(filter.column(effective)?),
            };
            if !filter.matches(&cell_text(cells[idx])) {
                continue;
            }
            let mut texts: Vec<String> = cells.iter().copied().map(cell_text).collect();
            annotate(&ctx, effective, &cells, &mut texts);
            rows.push(texts);
        }
    }

    Ok(Extraction {
        rows,
        headers: headers.unwrap_or_default(),
    })
}
