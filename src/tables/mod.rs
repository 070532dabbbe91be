// src/tables/mod.rs

//! Row and cell access over a parsed page. Everything here borrows from
//! the `Html` tree; nothing is copied until text is pulled out of a cell.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

mod locate;

pub use locate::{tables, topic_tables, TopicTable};

static TR: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("tr selector"));
static TH: Lazy<Selector> = Lazy::new(|| Selector::parse("th").expect("th selector"));
static TD: Lazy<Selector> = Lazy::new(|| Selector::parse("td").expect("td selector"));
static IMG: Lazy<Selector> = Lazy::new(|| Selector::parse("img").expect("img selector"));

/// Which element type a row's cells are read from. Listing pages head
/// their tables with `th`; the status page uses `td` throughout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Heading,
    Data,
}

impl CellKind {
    fn selector(self) -> &'static Selector {
        match self {
            CellKind::Heading => &TH,
            CellKind::Data => &TD,
        }
    }
}

/// Parse a response body. Invalid UTF-8 is replaced rather than rejected.
pub fn parse(body: &[u8]) -> Html {
    Html::parse_document(&String::from_utf8_lossy(body))
}

pub fn rows<'a>(table: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    table.select(&TR).collect()
}

pub fn cells<'a>(row: ElementRef<'a>, kind: CellKind) -> Vec<ElementRef<'a>> {
    row.select(kind.selector()).collect()
}

/// Text of every `kind` cell in `row`, each stripped.
pub fn row_texts(row: ElementRef<'_>, kind: CellKind) -> Vec<String> {
    row.select(kind.selector()).map(cell_text).collect()
}

/// Concatenation of the element's text nodes, each trimmed. Whitespace
/// between nodes is dropped, whitespace inside a node is kept.
pub fn cell_text(el: ElementRef<'_>) -> String {
    el.text().map(str::trim).collect()
}

pub fn has_image(el: ElementRef<'_>) -> bool {
    el.select(&IMG).next().is_some()
}
