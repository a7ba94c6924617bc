//! Core data types for the harvester.
//!
//! These types represent ISO 3166 countries as published on the catalog.
//! Text fields are `Option<String>`: `None` means the page did not carry the
//! field. Empty strings and `None` are both written as `null`.

use serde::{Deserialize, Serialize, Serializer};

/// Serialize empty or absent text as `null`.
fn empty_as_null<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    match value.as_deref() {
        Some(text) if !text.is_empty() => serializer.serialize_some(text),
        _ => serializer.serialize_none(),
    }
}

/// An ISO 3166-1 country (or territory).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    /// Two-letter code, unique per country (e.g., "NL").
    pub alpha2_code: String,
    #[serde(serialize_with = "empty_as_null")]
    pub short_name: Option<String>,
    #[serde(serialize_with = "empty_as_null")]
    pub short_name_lower_case: Option<String>,
    #[serde(serialize_with = "empty_as_null")]
    pub full_name: Option<String>,
    #[serde(serialize_with = "empty_as_null")]
    pub alpha3_code: Option<String>,
    pub numeric_code: Option<u16>,
    #[serde(serialize_with = "empty_as_null")]
    pub remarks: Option<String>,
    /// Free text as published ("Yes", "No").
    #[serde(serialize_with = "empty_as_null")]
    pub independent: Option<String>,
    #[serde(serialize_with = "empty_as_null")]
    pub territory_name: Option<String>,
    #[serde(serialize_with = "empty_as_null")]
    pub status: Option<String>,
    pub subdivision_categories: Vec<SubdivisionCategory>,
    pub subdivisions: Vec<Subdivision>,
    pub additional_information: Vec<AdditionalInformation>,
    pub change_history: Vec<ChangeHistoryEntry>,
}

impl Country {
    /// Create a country with only its code set.
    #[must_use]
    pub fn new(alpha2_code: impl Into<String>) -> Self {
        Self {
            alpha2_code: alpha2_code.into(),
            short_name: None,
            short_name_lower_case: None,
            full_name: None,
            alpha3_code: None,
            numeric_code: None,
            remarks: None,
            independent: None,
            territory_name: None,
            status: None,
            subdivision_categories: Vec::new(),
            subdivisions: Vec::new(),
            additional_information: Vec::new(),
            change_history: Vec::new(),
        }
    }

    /// Find a subdivision by its code.
    ///
    /// Resolves [`Subdivision::parent_subdivision`] references.
    #[must_use]
    pub fn subdivision(&self, code: &str) -> Option<&Subdivision> {
        self.subdivisions
            .iter()
            .find(|s| s.code3166_2.as_deref() == Some(code))
    }
}

/// Administrative languages and local name of a country.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalInformation {
    #[serde(serialize_with = "empty_as_null")]
    pub administrative_language_alpha2: Option<String>,
    #[serde(serialize_with = "empty_as_null")]
    pub administrative_language_alpha3: Option<String>,
    #[serde(serialize_with = "empty_as_null")]
    pub local_short_name: Option<String>,
}

/// Number of subdivisions in one category, with the category's labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubdivisionCategory {
    pub category_count: u32,
    /// Category name per locale (e.g., "12 provinces (en) / provinces (fr)").
    pub category_locales: Vec<String>,
}

/// One ISO 3166-2 subdivision.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subdivision {
    #[serde(serialize_with = "empty_as_null")]
    pub category: Option<String>,
    /// Subdivision code with the catalog's wildcard marker removed.
    #[serde(rename = "3166-2_code", serialize_with = "empty_as_null")]
    pub code3166_2: Option<String>,
    #[serde(serialize_with = "empty_as_null")]
    pub name: Option<String>,
    #[serde(serialize_with = "empty_as_null")]
    pub local_variant: Option<String>,
    #[serde(serialize_with = "empty_as_null")]
    pub language_code: Option<String>,
    #[serde(serialize_with = "empty_as_null")]
    pub romanization_system: Option<String>,
    /// Code of the parent subdivision. Resolve with [`Country::subdivision`].
    #[serde(serialize_with = "empty_as_null")]
    pub parent_subdivision: Option<String>,
}

/// One entry of a country's code change history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeHistoryEntry {
    /// Effective date as published (e.g., "2016-11-15").
    #[serde(serialize_with = "empty_as_null")]
    pub date: Option<String>,
    #[serde(serialize_with = "empty_as_null")]
    pub short_description_en: Option<String>,
    #[serde(serialize_with = "empty_as_null")]
    pub short_description_fr: Option<String>,
}
