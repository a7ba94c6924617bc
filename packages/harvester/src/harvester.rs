//! Main harvester service that ties all components together.

use std::path::Path;

use scraper::Html;

use crate::browser::PageSource;
use crate::config::{
    country_url, CATALOG_INDEX_URL, COUNTRY_MARKER, COUNTRY_WAIT, INDEX_MARKER, INDEX_WAIT,
};
use crate::error::Result;
use crate::extract::{extract_country, extract_country_links};
use crate::json::JsonOutput;
use crate::types::Country;

/// Which country pages to visit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Targets {
    /// Every country linked from an index page.
    Index {
        /// URL of the index page.
        url: String,
    },
    /// The given alpha-2 codes, in order.
    Codes(Vec<String>),
}

impl Default for Targets {
    fn default() -> Self {
        Self::Index {
            url: CATALOG_INDEX_URL.to_string(),
        }
    }
}

/// Progress notifications emitted during a run.
#[derive(Debug)]
pub enum HarvestEvent<'a> {
    /// The list of country pages is known.
    Discovered { total: usize },
    /// A country was extracted and written to `path`.
    Saved {
        position: usize,
        total: usize,
        country: &'a Country,
        path: &'a Path,
    },
}

/// Collect country page URLs from an index page.
pub fn collect_country_urls<P: PageSource>(source: &mut P, index_url: &str) -> Result<Vec<String>> {
    let html = source.render(index_url, INDEX_MARKER, INDEX_WAIT)?;
    let document = Html::parse_document(&html);
    let urls = extract_country_links(&document, index_url)?;
    tracing::info!(count = urls.len(), "Found country pages");
    Ok(urls)
}

/// Load and extract a single country page.
pub fn harvest_country<P: PageSource>(source: &mut P, url: &str) -> Result<Country> {
    let html = source.render(url, COUNTRY_MARKER, COUNTRY_WAIT)?;
    let document = Html::parse_document(&html);
    extract_country(&document, url)
}

/// Harvest every target country.
///
/// Each country is written to its own file as soon as it is extracted; the
/// aggregate file is written once all countries succeeded. An error aborts
/// the run, leaving files of earlier countries in place.
///
/// # Returns
/// The harvested countries, in visiting order
pub fn harvest_countries<P: PageSource>(
    source: &mut P,
    targets: &Targets,
    output: &JsonOutput,
    mut on_event: impl FnMut(HarvestEvent<'_>),
) -> Result<Vec<Country>> {
    output.prepare()?;

    let urls = match targets {
        Targets::Index { url } => collect_country_urls(source, url)?,
        Targets::Codes(codes) => codes.iter().map(|code| country_url(code)).collect(),
    };

    let total = urls.len();
    on_event(HarvestEvent::Discovered { total });

    let mut countries = Vec::with_capacity(total);

    for (index, url) in urls.iter().enumerate() {
        tracing::debug!(url = %url, "Harvesting country page");

        let country = harvest_country(source, url)?;
        let path = output.save_country(&country)?;

        tracing::info!(
            code = %country.alpha2_code,
            subdivisions = country.subdivisions.len(),
            "Saved country"
        );
        on_event(HarvestEvent::Saved {
            position: index + 1,
            total,
            country: &country,
            path: &path,
        });

        countries.push(country);
    }

    let path = output.save_all(&countries)?;
    tracing::info!(count = countries.len(), path = %path.display(), "Saved all countries");

    Ok(countries)
}
