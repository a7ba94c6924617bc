//! End-to-end integration tests for the harvester pipeline.
//!
//! Pages are served from fixture HTML instead of a browser, so the full
//! path from rendered markup to JSON files runs offline.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use pretty_assertions::assert_eq;
use scraper::Html;
use tempfile::tempdir;

use iso3166_harvester::browser::{Marker, PageSource};
use iso3166_harvester::config::{country_url, CATALOG_INDEX_URL};
use iso3166_harvester::extract::extract_country;
use iso3166_harvester::json::{generate_json, FileNaming, JsonOutput};
use iso3166_harvester::{harvest_countries, Country, HarvesterError, Result, Targets};

/// Load fixture file content.
fn load_fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e))
}

/// Serves fixed HTML per URL.
#[derive(Default)]
struct FixturePages {
    pages: HashMap<String, String>,
}

impl FixturePages {
    fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(url.into(), html.into());
        self
    }
}

impl PageSource for FixturePages {
    fn render(&mut self, url: &str, marker: Marker, timeout: Duration) -> Result<String> {
        match self.pages.get(url) {
            Some(html) if marker.is_present_in(html) => Ok(html.clone()),
            _ => Err(HarvesterError::RenderTimeout {
                url: url.to_string(),
                marker: marker.to_string(),
                timeout,
            }),
        }
    }
}

/// A country page with the summary and a one-row subdivision table only.
fn minimal_country_page(code: &str, short_name: &str) -> String {
    format!(
        r#"<html><body>
        <div class="core-view-summary">
            <div class="core-view-line">
                <div class="core-view-field-name">Alpha-2 code</div>
                <div class="core-view-field-value">{code}</div>
            </div>
            <div class="core-view-line">
                <div class="core-view-field-name">Short name</div>
                <div class="core-view-field-value">{short_name}</div>
            </div>
        </div>
        <table id="subdivision">
            <thead><tr>
                <th>Subdivision category</th>
                <th>3166-2 code</th>
                <th>Subdivision name</th>
            </tr></thead>
            <tbody><tr><td>canton</td><td>{code}-01</td><td>First</td></tr></tbody>
        </table>
        </body></html>"#
    )
}

/// Read a JSON file written by the pipeline.
fn read_json(path: &Path) -> serde_json::Value {
    let text = fs::read_to_string(path).unwrap();
    serde_json::from_str(&text).unwrap()
}

#[test]
fn test_pipeline_writes_country_and_aggregate_files() {
    let mut source = FixturePages::default()
        .with_page(CATALOG_INDEX_URL, load_fixture("index.html"))
        .with_page(country_url("BE"), minimal_country_page("BE", "BELGIUM"))
        .with_page(country_url("LU"), minimal_country_page("LU", "LUXEMBOURG"));
    let temp_dir = tempdir().unwrap();
    let output = JsonOutput::new(temp_dir.path(), FileNaming::Alpha2);

    let countries = harvest_countries(&mut source, &Targets::default(), &output, |_| {}).unwrap();
    assert_eq!(countries.len(), 2);

    let mut files: Vec<_> = fs::read_dir(temp_dir.path().join("countries"))
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    files.sort();
    assert_eq!(files, vec!["BE.json", "LU.json"]);

    let all = read_json(&temp_dir.path().join("all_countries.json"));
    let entries = all.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    for entry in entries {
        assert_eq!(entry["subdivisions"].as_array().unwrap().len(), 1);
        assert_eq!(entry["subdivision_categories"], serde_json::json!([]));
        assert_eq!(entry["change_history"], serde_json::json!([]));
        assert_eq!(entry["additional_information"], serde_json::json!([]));
    }
    assert_eq!(entries[0]["alpha2_code"], "BE");
    assert_eq!(entries[1]["alpha2_code"], "LU");
    assert_eq!(entries[1]["subdivisions"][0]["3166-2_code"], "LU-01");

    let belgium = read_json(&temp_dir.path().join("countries/BE.json"));
    assert_eq!(belgium, entries[0]);
}

#[test]
fn test_short_name_naming_requires_lower_case_name() {
    let mut source = FixturePages::default()
        .with_page(country_url("BE"), minimal_country_page("BE", "Belgium"));
    let temp_dir = tempdir().unwrap();
    let output = JsonOutput::new(temp_dir.path(), FileNaming::ShortNameLowerCase);

    // The minimal page has no lower-case short name
    let err = harvest_countries(
        &mut source,
        &Targets::Codes(vec!["BE".to_string()]),
        &output,
        |_| {},
    )
    .unwrap_err();

    assert!(matches!(err, HarvesterError::MissingField { .. }));
}

#[test]
fn test_missing_marker_is_render_timeout() {
    let mut source =
        FixturePages::default().with_page(CATALOG_INDEX_URL, "<html><body>Loading</body></html>");
    let temp_dir = tempdir().unwrap();
    let output = JsonOutput::new(temp_dir.path(), FileNaming::Alpha2);

    let err = harvest_countries(&mut source, &Targets::default(), &output, |_| {}).unwrap_err();

    assert!(matches!(err, HarvesterError::RenderTimeout { .. }));
    assert!(err.to_string().contains("grs-grid"));
}

#[test]
fn test_full_country_page_extraction() {
    let document = Html::parse_document(&load_fixture("country_be.html"));
    let country = extract_country(&document, &country_url("BE")).unwrap();

    assert_eq!(country.alpha2_code, "BE");
    assert_eq!(country.short_name.as_deref(), Some("BELGIUM"));
    assert_eq!(country.short_name_lower_case.as_deref(), Some("Belgium"));
    assert_eq!(country.full_name.as_deref(), Some("the Kingdom of Belgium"));
    assert_eq!(country.alpha3_code.as_deref(), Some("BEL"));
    assert_eq!(country.numeric_code, Some(56));
    assert_eq!(country.remarks, None);
    assert_eq!(country.independent.as_deref(), Some("Yes"));
    assert_eq!(country.status.as_deref(), Some("Officially assigned"));

    assert_eq!(country.additional_information.len(), 3);
    assert_eq!(
        country.additional_information[2].local_short_name.as_deref(),
        Some("België")
    );

    assert_eq!(country.subdivision_categories.len(), 2);
    assert_eq!(country.subdivision_categories[0].category_count, 3);
    assert_eq!(
        country.subdivision_categories[1].category_locales,
        vec!["province (en)"]
    );

    // BE-VAN is listed once per language; the wildcard marks the first row
    let codes: Vec<_> = country
        .subdivisions
        .iter()
        .map(|s| s.code3166_2.as_deref().unwrap_or_default())
        .collect();
    assert_eq!(codes, vec!["BE-VLG", "BE-VAN", "BE-WAL"]);
    let antwerpen = country.subdivision("BE-VAN").unwrap();
    assert_eq!(antwerpen.name.as_deref(), Some("Antwerpen"));
    assert_eq!(antwerpen.parent_subdivision.as_deref(), Some("BE-VLG"));

    assert_eq!(country.change_history.len(), 1);
    assert_eq!(country.change_history[0].date.as_deref(), Some("2014-11-03"));
}

#[test]
fn test_written_json_reads_back_with_nulls() {
    let document = Html::parse_document(&load_fixture("country_be.html"));
    let country = extract_country(&document, &country_url("BE")).unwrap();

    let json = generate_json(&country).unwrap();
    assert!(json.contains("\"3166-2_code\": \"BE-VLG\""));
    assert!(json.contains("\"remarks\": null"));
    assert!(!json.contains("\"\""));

    let parsed: Country = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.alpha2_code, country.alpha2_code);
    assert_eq!(parsed.subdivisions.len(), country.subdivisions.len());
    // Empty cells come back as absent values
    assert_eq!(parsed.subdivisions[0].local_variant, None);
    assert_eq!(parsed.subdivisions[0].code3166_2.as_deref(), Some("BE-VLG"));
}
