// src/status/page.rs

use indexmap::IndexMap;
use scraper::Html;

use crate::tables::{self, row_texts, CellKind};

pub const TEMPLATE_COLUMN: &str = "Template";
pub const MOS_TEMPLATE: &str = "NIRSpec MultiObject Spectroscopy";

/// One visit row, keyed by its table's header names in column order.
pub type StatusRecord = IndexMap<String, String>;

/// MOS visits from every table on a status page, plus the union of all
/// header names seen, in order of first appearance.
///
/// Status tables use `td` for their header row as well. Tables whose first
/// row has no cells are skipped; tables without a "Template" column still
/// contribute their headers but never any records.
pub fn extract(doc: &Html) -> (Vec<StatusRecord>, Vec<String>) {
    let mut records = Vec::new();
    let mut vocabulary: Vec<String> = Vec::new();

    for table in tables::tables(doc) {
        let rows = tables::rows(table);
        let Some((head, body)) = rows.split_first() else {
            continue;
        };
        let headers = row_texts(*head, CellKind::Data);
        if headers.is_empty() {
            continue;
        }
        for h in &headers {
            if !vocabulary.contains(h) {
                vocabulary.push(h.clone());
            }
        }

        let Some(template) = headers.iter().position(|h| h == TEMPLATE_COLUMN) else {
            continue;
        };
        for row in body {
            let cells = row_texts(*row, CellKind::Data);
            if cells.len() != headers.len() || !cells[template].contains(MOS_TEMPLATE) {
                continue;
            }
            records.push(headers.iter().cloned().zip(cells).collect());
        }
    }

    (records, vocabulary)
}
