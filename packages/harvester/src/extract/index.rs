//! Country links on the catalog index page.

use std::collections::HashSet;
use std::sync::LazyLock;

use scraper::{Html, Selector};
use url::Url;

use crate::dom::static_selector;
use crate::error::{HarvesterError, Result};

static GRID_LINKS: LazyLock<Selector> = LazyLock::new(|| static_selector(".grs-grid a"));

/// Collect the country page URLs linked from the index grid.
///
/// Links are resolved against `base_url` and returned in page order without
/// repeats. Anchors without an `href` are skipped.
pub fn extract_country_links(document: &Html, base_url: &str) -> Result<Vec<String>> {
    let base = Url::parse(base_url)?;
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for anchor in document.select(&GRID_LINKS) {
        let Some(href) = anchor.value().attr("href") else {
            tracing::warn!("Skipping index link without href");
            continue;
        };

        let url = base
            .join(href)
            .map_err(|source| HarvesterError::InvalidLink {
                href: href.to_string(),
                source,
            })?
            .to_string();

        if seen.insert(url.clone()) {
            links.push(url);
        }
    }

    Ok(links)
}
