// src/extract/gto.rs

//! Guaranteed-time pages. Same table layout as the GO pages but without
//! topic sections, and with an "AR?" column that flags archival-research
//! eligibility by an icon rather than text.

use scraper::Html;
use std::time::Duration;

use super::{go, scan, Extraction, ModeFilter};
use crate::error::ScrapeError;
use crate::fetch::Fetch;
use crate::tables::{self, has_image};

pub const AR_COLUMN: &str = "AR?";
/// Written in place of the icon: the program has no exclusive access
/// period and can back an archival-research proposal.
pub const AR_MARKER: &str = "AR";

/// Same column and needle as the GO pages, matched on the stripped cell
/// text as it stands.
pub const FILTER: ModeFilter = ModeFilter {
    normalize: false,
    ..go::FILTER
};

pub fn extract(doc: &Html) -> Result<Extraction, ScrapeError> {
    let all = tables::tables(doc).into_iter().map(|t| ((), t));
    scan(all, &FILTER, |_, headers, cells, row| {
        if let Some(ar) = headers.iter().position(|h| h == AR_COLUMN) {
            if has_image(cells[ar]) {
                row[ar] = AR_MARKER.to_string();
            }
        }
    })
}

pub fn scrape<F: Fetch>(fetcher: &F, url: &str, timeout: Duration) -> Result<Extraction, ScrapeError> {
    let body = fetcher.fetch(url, timeout)?;
    extract(&tables::parse(&body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::stub::StubFetcher;

    const PAGE: &str = r#"
        <html><body>
          <table>
            <tr><th>ID</th><th>Instrument/ Mode</th><th>AR?</th></tr>
            <tr><td>1201</td><td>NIRSpec/MOS</td><td><img src="/files/ar-icon.png" alt="AR"></td></tr>
            <tr><td>1202</td><td>NIRSpec/MOS</td><td>no</td></tr>
            <tr><td>1203</td><td>NIRSpec/IFU</td><td><img src="/files/ar-icon.png"></td></tr>
          </table>
          <table>
            <tr><th>ID</th><th>Instrument/ Mode</th><th>AR?</th></tr>
            <tr><td>1204</td><td>NIRCam/Imaging, NIRSpec/MOS</td><td></td></tr>
          </table>
        </body></html>"#;

    #[test]
    fn icon_cells_become_ar_marker() {
        let out = extract(&Html::parse_document(PAGE)).unwrap();
        assert_eq!(out.headers, vec!["ID", "Instrument/ Mode", "AR?"]);
        assert_eq!(
            out.rows,
            vec![
                vec!["1201", "NIRSpec/MOS", "AR"],
                vec!["1202", "NIRSpec/MOS", "no"],
                vec!["1204", "NIRCam/Imaging, NIRSpec/MOS", ""],
            ]
        );
    }

    #[test]
    fn spaced_mode_text_is_not_a_match() {
        let doc = Html::parse_document(
            r#"<table>
                 <tr><th>ID</th><th>Instrument/ Mode</th></tr>
                 <tr><td>1</td><td>NIRSpec/ MOS</td></tr>
                 <tr><td>2</td><td>NIR Spec/MOS</td></tr>
                 <tr><td>3</td><td>NIRSpec/MOS</td></tr>
               </table>"#,
        );
        let out = extract(&doc).unwrap();
        assert_eq!(out.rows, vec![vec!["3", "NIRSpec/MOS"]]);
    }

    #[test]
    fn no_annotation_columns_are_appended() {
        let out = extract(&Html::parse_document(PAGE)).unwrap();
        assert!(out.rows.iter().all(|r| r.len() == out.headers.len()));
    }

    #[test]
    fn pages_without_ar_column_are_left_alone() {
        let doc = Html::parse_document(
            r#"<table>
                 <tr><th>Instrument/Mode</th><th>Notes</th></tr>
                 <tr><td>NIRSpec/MOS</td><td><img src="x.png"></td></tr>
               </table>"#,
        );
        let out = extract(&doc).unwrap();
        assert_eq!(out.rows, vec![vec!["NIRSpec/MOS", ""]]);
    }

    #[test]
    fn scrape_goes_through_the_fetcher() {
        let fetcher = StubFetcher::default().page("https://example.test/gto", PAGE);
        let out = scrape(&fetcher, "https://example.test/gto", Duration::from_secs(5)).unwrap();
        assert_eq!(out.rows.len(), 3);
        assert_eq!(fetcher.calls()[0].1, Duration::from_secs(5));
    }
}
