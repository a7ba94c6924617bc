//! Scalar country fields from the summary block.
//!
//! The summary is a list of `core-view-line` elements, each holding a label
//! (`core-view-field-name`) and optionally a value (`core-view-field-value`).

use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::config::strip_wildcard;
use crate::dom::{first_text, static_selector};
use crate::error::{HarvesterError, Result};
use crate::mapping::FieldRole;

static SUMMARY: LazyLock<Selector> = LazyLock::new(|| static_selector(".core-view-summary"));
static SUMMARY_LINES: LazyLock<Selector> = LazyLock::new(|| static_selector(".core-view-line"));
static FIELD_NAME: LazyLock<Selector> = LazyLock::new(|| static_selector(".core-view-field-name"));
static FIELD_VALUE: LazyLock<Selector> =
    LazyLock::new(|| static_selector(".core-view-field-value"));

/// Labelled summary lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoreField {
    Alpha2Code,
    ShortName,
    ShortNameLowerCase,
    FullName,
    Alpha3Code,
    NumericCode,
    Remarks,
    Independent,
    TerritoryName,
    Status,
}

impl FieldRole for CoreField {
    const LABELS: &'static [(&'static str, Self)] = &[
        ("Alpha-2 code", Self::Alpha2Code),
        ("Short name", Self::ShortName),
        ("Short name lower case", Self::ShortNameLowerCase),
        ("Full name", Self::FullName),
        ("Alpha-3 code", Self::Alpha3Code),
        ("Numeric code", Self::NumericCode),
        ("Remarks", Self::Remarks),
        ("Independent", Self::Independent),
        ("Territory name", Self::TerritoryName),
        ("Status", Self::Status),
    ];
}

impl CoreField {
    /// Whether values of this field are codes that may carry the wildcard marker.
    fn is_code(self) -> bool {
        matches!(self, Self::Alpha2Code | Self::Alpha3Code | Self::NumericCode)
    }
}

/// Scalar fields of a country page. Unset fields were absent or empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoreFields {
    pub alpha2_code: Option<String>,
    pub short_name: Option<String>,
    pub short_name_lower_case: Option<String>,
    pub full_name: Option<String>,
    pub alpha3_code: Option<String>,
    pub numeric_code: Option<u16>,
    pub remarks: Option<String>,
    pub independent: Option<String>,
    pub territory_name: Option<String>,
    pub status: Option<String>,
}

impl CoreFields {
    fn set(&mut self, field: CoreField, value: String) -> Result<()> {
        let slot = match field {
            CoreField::Alpha2Code => &mut self.alpha2_code,
            CoreField::ShortName => &mut self.short_name,
            CoreField::ShortNameLowerCase => &mut self.short_name_lower_case,
            CoreField::FullName => &mut self.full_name,
            CoreField::Alpha3Code => &mut self.alpha3_code,
            CoreField::Remarks => &mut self.remarks,
            CoreField::Independent => &mut self.independent,
            CoreField::TerritoryName => &mut self.territory_name,
            CoreField::Status => &mut self.status,
            CoreField::NumericCode => {
                let number = value.parse().map_err(|_| HarvesterError::InvalidNumber {
                    field: field.label().to_string(),
                    value: value.clone(),
                })?;
                self.numeric_code = Some(number);
                return Ok(());
            }
        };
        *slot = Some(value);
        Ok(())
    }
}

/// Extract the scalar fields of a country page.
///
/// Only the first summary block is read. Lines with an unknown label, without
/// a value element, or with an empty value are skipped.
pub fn extract_core_fields(document: &Html) -> Result<CoreFields> {
    let mut fields = CoreFields::default();

    let Some(summary) = document.select(&SUMMARY).next() else {
        tracing::debug!("No summary block");
        return Ok(fields);
    };

    for line in summary.select(&SUMMARY_LINES) {
        let Some(label) = first_text(line, &FIELD_NAME) else {
            continue;
        };
        let Some(field) = CoreField::from_label(&label) else {
            tracing::trace!(label = %label, "Ignoring unknown summary field");
            continue;
        };
        let Some(value) = first_text(line, &FIELD_VALUE) else {
            continue;
        };

        let value = if field.is_code() {
            strip_wildcard(&value)
        } else {
            value
        };
        if value.is_empty() {
            continue;
        }

        fields.set(field, value)?;
    }

    Ok(fields)
}
