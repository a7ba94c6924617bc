//! Change history of a country code.
//!
//! The history table has no id. It lives in the first `div` of the
//! `code-view-container` whose heading reads "Change history of country code".

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::dom::{first_text, read_table, static_selector};
use crate::mapping::{FieldMap, FieldRole};
use crate::types::ChangeHistoryEntry;

/// Heading that introduces the change history section.
pub const CHANGE_HISTORY_HEADING: &str = "Change history of country code";

static CONTAINER: LazyLock<Selector> = LazyLock::new(|| static_selector(".code-view-container"));
static SECTIONS: LazyLock<Selector> = LazyLock::new(|| static_selector("div"));
static HEADING: LazyLock<Selector> = LazyLock::new(|| static_selector("h3"));

/// Columns of the change history table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeHistoryColumn {
    Date,
    DescriptionEn,
    DescriptionFr,
}

impl FieldRole for ChangeHistoryColumn {
    const LABELS: &'static [(&'static str, Self)] = &[
        ("Effective date of change", Self::Date),
        ("Short description of change (en)", Self::DescriptionEn),
        ("Short description of change (fr)", Self::DescriptionFr),
    ];
}

/// Find the section holding the change history table.
fn find_section(document: &Html) -> Option<ElementRef<'_>> {
    let container = document.select(&CONTAINER).next()?;
    container
        .select(&SECTIONS)
        .find(|div| first_text(*div, &HEADING).as_deref() == Some(CHANGE_HISTORY_HEADING))
}

/// Extract the change history entries of a page.
///
/// Returns an empty list when the section is absent.
pub fn extract_change_history(document: &Html) -> Vec<ChangeHistoryEntry> {
    let Some(section) = find_section(document) else {
        tracing::debug!("No change history section");
        return Vec::new();
    };

    let table = read_table(section);
    let map = FieldMap::<ChangeHistoryColumn>::from_headers(&table.headers);

    table
        .rows
        .iter()
        .map(|row| ChangeHistoryEntry {
            date: map.text(row, ChangeHistoryColumn::Date),
            short_description_en: map.text(row, ChangeHistoryColumn::DescriptionEn),
            short_description_fr: map.text(row, ChangeHistoryColumn::DescriptionFr),
        })
        .collect()
}
