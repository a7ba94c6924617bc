//! Subdivision category counts.
//!
//! Categories are not in a table: each one is a paragraph holding a
//! `category-count` element and one `category-locales` element per language.

use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::dom::{element_text, first_text, static_selector};
use crate::error::{HarvesterError, Result};
use crate::types::SubdivisionCategory;

static PARAGRAPHS: LazyLock<Selector> = LazyLock::new(|| static_selector("p"));
static CATEGORY_COUNT: LazyLock<Selector> = LazyLock::new(|| static_selector(".category-count"));
static CATEGORY_LOCALES: LazyLock<Selector> =
    LazyLock::new(|| static_selector(".category-locales"));

/// Extract every subdivision category paragraph of a page.
///
/// Empty locale labels are dropped. A count that is not a number is an error.
pub fn extract_subdivision_categories(document: &Html) -> Result<Vec<SubdivisionCategory>> {
    let mut categories = Vec::new();

    for paragraph in document.select(&PARAGRAPHS) {
        let Some(count) = first_text(paragraph, &CATEGORY_COUNT) else {
            continue;
        };
        let category_count = count.parse().map_err(|_| HarvesterError::InvalidNumber {
            field: "category-count".to_string(),
            value: count.clone(),
        })?;

        let category_locales = paragraph
            .select(&CATEGORY_LOCALES)
            .map(element_text)
            .filter(|label| !label.is_empty())
            .collect();

        categories.push(SubdivisionCategory {
            category_count,
            category_locales,
        });
    }

    Ok(categories)
}
