//! Helpers for querying rendered HTML.

use std::sync::LazyLock;

use scraper::{ElementRef, Selector};
use unicode_normalization::UnicodeNormalization;

/// Parse a selector known at compile time.
///
/// Only for static selector strings: an invalid selector is a programming
/// error, not a runtime condition.
#[allow(clippy::expect_used)]
pub(crate) fn static_selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("valid selector")
}

static TABLE_HEAD: LazyLock<Selector> = LazyLock::new(|| static_selector("thead"));
static TABLE_BODY: LazyLock<Selector> = LazyLock::new(|| static_selector("tbody"));
static HEADER_CELLS: LazyLock<Selector> = LazyLock::new(|| static_selector("th"));
static BODY_ROWS: LazyLock<Selector> = LazyLock::new(|| static_selector("tr"));
static DATA_CELLS: LazyLock<Selector> = LazyLock::new(|| static_selector("td"));

/// Visible text of an element.
///
/// Whitespace runs collapse to a single space, the result is trimmed and
/// NFC-normalized.
///
/// # Examples
/// ```
/// use scraper::{Html, Selector};
/// use iso3166_harvester::dom::element_text;
///
/// let html = Html::parse_fragment("<p>\n  Noord-<b>Holland</b>  </p>");
/// let p = html.select(&Selector::parse("p").unwrap()).next().unwrap();
/// assert_eq!(element_text(p), "Noord-Holland");
/// ```
pub fn element_text(element: ElementRef<'_>) -> String {
    let raw: String = element.text().collect();
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .nfc()
        .collect()
}

/// Text of the first descendant matching `selector`, if any.
pub fn first_text(element: ElementRef<'_>, selector: &Selector) -> Option<String> {
    element.select(selector).next().map(element_text)
}

/// Header and body cell texts of a table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableContents {
    /// Texts of the `th` cells of the first `thead`, in document order.
    pub headers: Vec<String>,
    /// One entry per `tr` of the first `tbody`, holding the texts of its `td` cells.
    pub rows: Vec<Vec<String>>,
}

/// Read a table (or an element wrapping one) into header and row texts.
///
/// Only the first `thead` and the first `tbody` are read; later tables in
/// the same element are ignored.
pub fn read_table(element: ElementRef<'_>) -> TableContents {
    let headers = element
        .select(&TABLE_HEAD)
        .next()
        .map(|head| head.select(&HEADER_CELLS).map(element_text).collect())
        .unwrap_or_default();
    let rows = element
        .select(&TABLE_BODY)
        .next()
        .map(|body| {
            body.select(&BODY_ROWS)
                .map(|row| row.select(&DATA_CELLS).map(element_text).collect())
                .collect()
        })
        .unwrap_or_default();

    TableContents { headers, rows }
}
