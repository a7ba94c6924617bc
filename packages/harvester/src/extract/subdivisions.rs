//! ISO 3166-2 subdivisions table.

use std::collections::HashSet;
use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::config::strip_wildcard;
use crate::dom::{read_table, static_selector};
use crate::mapping::{FieldMap, FieldRole};
use crate::types::Subdivision;

static SUBDIVISION_TABLE: LazyLock<Selector> = LazyLock::new(|| static_selector("#subdivision"));

/// Columns of the subdivisions table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubdivisionColumn {
    Category,
    Code,
    Name,
    LocalVariant,
    LanguageCode,
    RomanizationSystem,
    ParentSubdivision,
}

impl FieldRole for SubdivisionColumn {
    const LABELS: &'static [(&'static str, Self)] = &[
        ("Subdivision category", Self::Category),
        ("3166-2 code", Self::Code),
        ("Subdivision name", Self::Name),
        ("Local variant", Self::LocalVariant),
        ("Language code", Self::LanguageCode),
        ("Romanization system", Self::RomanizationSystem),
        ("Parent subdivision", Self::ParentSubdivision),
    ];
}

/// Map table rows to subdivisions.
///
/// The table lists a subdivision once per language; only the first row of
/// each code is kept. Rows without a code, or with an empty one, are always
/// kept.
pub fn subdivisions_from_rows<S: AsRef<str>>(
    map: &FieldMap<SubdivisionColumn>,
    rows: &[Vec<S>],
) -> Vec<Subdivision> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut subdivisions = Vec::new();

    for row in rows {
        let code = map
            .cell(row, SubdivisionColumn::Code)
            .map(strip_wildcard);

        if let Some(code) = code.as_ref().filter(|c| !c.is_empty()) {
            if !seen.insert(code.clone()) {
                tracing::trace!(code = %code, "Skipping repeated subdivision");
                continue;
            }
        }

        subdivisions.push(Subdivision {
            category: map.text(row, SubdivisionColumn::Category),
            code3166_2: code,
            name: map.text(row, SubdivisionColumn::Name),
            local_variant: map.text(row, SubdivisionColumn::LocalVariant),
            language_code: map.text(row, SubdivisionColumn::LanguageCode),
            romanization_system: map.text(row, SubdivisionColumn::RomanizationSystem),
            parent_subdivision: map
                .cell(row, SubdivisionColumn::ParentSubdivision)
                .map(strip_wildcard),
        });
    }

    subdivisions
}

/// Extract the subdivisions of a country page.
///
/// Returns an empty list when the table is absent.
pub fn extract_subdivisions(document: &Html) -> Vec<Subdivision> {
    let Some(section) = document.select(&SUBDIVISION_TABLE).next() else {
        tracing::debug!("No subdivision table");
        return Vec::new();
    };

    let table = read_table(section);
    let map = FieldMap::<SubdivisionColumn>::from_headers(&table.headers);

    let missing = map.missing_labels();
    if !missing.is_empty() {
        tracing::debug!(?missing, "Subdivision table lacks columns");
    }

    subdivisions_from_rows(&map, &table.rows)
}
