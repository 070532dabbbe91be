// src/fetch/urls.rs

use url::Url;

pub static STATUS_ENDPOINT: &str = "https://www.stsci.edu/cgi-bin/get-visit-status";

static APPROVED_PROGRAMS: &str = "https://www.stsci.edu/jwst/science-execution/approved-programs";

/// General-observer cycle pages, as `(cycle label, url)`.
pub fn default_go_pages() -> Vec<(String, String)> {
    (1..=3)
        .map(|n| {
            (
                format!("Cycle {}", n),
                format!("{}/general-observers/cycle-{}-go", APPROVED_PROGRAMS, n),
            )
        })
        .collect()
}

pub fn default_gto_pages() -> Vec<String> {
    vec![format!("{}/guaranteed-time-observations", APPROVED_PROGRAMS)]
}

pub fn default_ddt_pages() -> Vec<String> {
    vec![format!("{}/dd-cycle-1", APPROVED_PROGRAMS)]
}

/// Visit-status lookup for one proposal.
pub fn status_url(endpoint: &str, proposal_id: &str) -> Result<Url, url::ParseError> {
    Url::parse_with_params(
        endpoint,
        &[
            ("id", proposal_id),
            ("markupFormat", "html"),
            ("observatory", "JWST"),
            ("pi", "1"),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_url_matches_endpoint_query() {
        let url = status_url(STATUS_ENDPOINT, "1234").unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.stsci.edu/cgi-bin/get-visit-status?id=1234&markupFormat=html&observatory=JWST&pi=1"
        );
    }

    #[test]
    fn default_go_pages_are_labelled_by_cycle() {
        let pages = default_go_pages();
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].0, "Cycle 1");
        assert!(pages[0].1.ends_with("/general-observers/cycle-1-go"));
    }
}
