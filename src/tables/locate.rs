// src/tables/locate.rs

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use super::cell_text;

static TABLE: Lazy<Selector> = Lazy::new(|| Selector::parse("table").expect("table selector"));

/// Section titles and tables in one selector, so a single pass sees them
/// interleaved in document order.
static TOPIC_OR_TABLE: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("span.accordion__title-text, table").expect("topic/table selector")
});

/// A table together with the section title it sits under.
#[derive(Debug, Clone)]
pub struct TopicTable<'a> {
    pub topic: Option<String>,
    pub table: ElementRef<'a>,
}

/// Every `table` element, in document order.
pub fn tables(doc: &Html) -> Vec<ElementRef<'_>> {
    doc.select(&TABLE).collect()
}

/// Every table paired with the closest section title before it.
///
/// Tables that appear before any title get `None`. Several tables under
/// one title all carry that title.
pub fn topic_tables(doc: &Html) -> Vec<TopicTable<'_>> {
    let mut current: Option<String> = None;
    let mut out = Vec::new();
    for el in doc.select(&TOPIC_OR_TABLE) {
        if el.value().name() == "table" {
            out.push(TopicTable {
                topic: current.clone(),
                table: el,
            });
        } else {
            current = Some(cell_text(el));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <table id="nav"><tr><td>menu</td></tr></table>
          <div class="accordion">
            <span class="accordion__title-text"> Galaxies </span>
            <div><table id="a"></table></div>
            <span class="accordion__title-text">Stellar Physics</span>
            <div><table id="b"></table><table id="c"></table></div>
            <span class="accordion__title-text">Empty Section</span>
          </div>
        </body></html>"#;

    fn ids<'a>(pairs: &'a [TopicTable<'a>]) -> Vec<(Option<&'a str>, Option<&'a str>)> {
        pairs
            .iter()
            .map(|p| (p.topic.as_deref(), p.table.value().attr("id")))
            .collect()
    }

    #[test]
    fn tables_in_document_order() {
        let doc = Html::parse_document(PAGE);
        let found: Vec<_> = tables(&doc)
            .into_iter()
            .filter_map(|t| t.value().attr("id"))
            .collect();
        assert_eq!(found, vec!["nav", "a", "b", "c"]);
    }

    #[test]
    fn tables_take_the_preceding_title() {
        let doc = Html::parse_document(PAGE);
        assert_eq!(
            ids(&topic_tables(&doc)),
            vec![
                (None, Some("nav")),
                (Some("Galaxies"), Some("a")),
                (Some("Stellar Physics"), Some("b")),
                (Some("Stellar Physics"), Some("c")),
            ]
        );
    }

    #[test]
    fn titles_on_other_elements_are_ignored() {
        let doc = Html::parse_document(
            r#"<div class="accordion__title-text">Not a span</div><table id="x"></table>"#,
        );
        assert_eq!(ids(&topic_tables(&doc)), vec![(None, Some("x"))]);
    }
}
