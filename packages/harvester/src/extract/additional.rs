//! Administrative languages and local short name.

use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::dom::{read_table, static_selector};
use crate::mapping::{FieldMap, FieldRole};
use crate::types::AdditionalInformation;

static ADDITIONAL_INFO_TABLE: LazyLock<Selector> =
    LazyLock::new(|| static_selector("#country-additional-info"));

/// Columns of the additional-information table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdditionalInfoColumn {
    LanguageAlpha2,
    LanguageAlpha3,
    LocalShortName,
}

impl FieldRole for AdditionalInfoColumn {
    const LABELS: &'static [(&'static str, Self)] = &[
        ("Administrative language(s) alpha-2", Self::LanguageAlpha2),
        ("Administrative language(s) alpha-3", Self::LanguageAlpha3),
        ("Local short name", Self::LocalShortName),
    ];
}

/// Extract the rows of the additional-information table.
///
/// Returns an empty list when the table is absent.
pub fn extract_additional_information(document: &Html) -> Vec<AdditionalInformation> {
    let Some(section) = document.select(&ADDITIONAL_INFO_TABLE).next() else {
        tracing::debug!("No additional information table");
        return Vec::new();
    };

    let table = read_table(section);
    let map = FieldMap::<AdditionalInfoColumn>::from_headers(&table.headers);

    table
        .rows
        .iter()
        .map(|row| AdditionalInformation {
            administrative_language_alpha2: map.text(row, AdditionalInfoColumn::LanguageAlpha2),
            administrative_language_alpha3: map.text(row, AdditionalInfoColumn::LanguageAlpha3),
            local_short_name: map.text(row, AdditionalInfoColumn::LocalShortName),
        })
        .collect()
}
