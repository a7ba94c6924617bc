//! Extraction of country records from rendered catalog pages.
//!
//! Each submodule handles one section of a country page. Optional sections
//! that are absent yield empty lists; only malformed numbers and a missing
//! alpha-2 code are errors.

mod additional;
mod categories;
mod change_history;
mod index;
mod subdivisions;
mod summary;

use scraper::Html;

use crate::error::{HarvesterError, Result};
use crate::mapping::FieldRole;
use crate::types::Country;

pub use additional::{extract_additional_information, AdditionalInfoColumn};
pub use categories::extract_subdivision_categories;
pub use change_history::{extract_change_history, ChangeHistoryColumn, CHANGE_HISTORY_HEADING};
pub use index::extract_country_links;
pub use subdivisions::{extract_subdivisions, subdivisions_from_rows, SubdivisionColumn};
pub use summary::{extract_core_fields, CoreField, CoreFields};

/// Assemble a country from its rendered page.
///
/// `url` is only used for error context.
pub fn extract_country(document: &Html, url: &str) -> Result<Country> {
    let core = extract_core_fields(document)?;

    let alpha2_code = core.alpha2_code.ok_or_else(|| HarvesterError::MissingField {
        field: CoreField::Alpha2Code.label().to_string(),
        context: url.to_string(),
    })?;

    Ok(Country {
        alpha2_code,
        short_name: core.short_name,
        short_name_lower_case: core.short_name_lower_case,
        full_name: core.full_name,
        alpha3_code: core.alpha3_code,
        numeric_code: core.numeric_code,
        remarks: core.remarks,
        independent: core.independent,
        territory_name: core.territory_name,
        status: core.status,
        subdivision_categories: extract_subdivision_categories(document)?,
        subdivisions: extract_subdivisions(document),
        additional_information: extract_additional_information(document),
        change_history: extract_change_history(document),
    })
}
