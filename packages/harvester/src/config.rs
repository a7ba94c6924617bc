//! Configuration constants and validation functions for the harvester.

use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;

use crate::browser::Marker;
use crate::error::{HarvesterError, Result};

/// Catalog index page listing every ISO 3166-1 country.
pub const CATALOG_INDEX_URL: &str = "https://www.iso.org/obp/ui/#iso:pub:PUB500001:en";

/// Prefix of a country page; the alpha-2 code is appended.
pub const COUNTRY_URL_PREFIX: &str = "https://www.iso.org/obp/ui/#iso:code:3166:";

/// Element that signals the index grid has rendered.
pub const INDEX_MARKER: Marker = Marker::Class("grs-grid");

/// Element that signals a country page has rendered.
pub const COUNTRY_MARKER: Marker = Marker::Id("subdivision");

/// Bounded wait for the index grid.
pub const INDEX_WAIT: Duration = Duration::from_secs(10);

/// Bounded wait for a country page.
pub const COUNTRY_WAIT: Duration = Duration::from_secs(20);

/// Upper bound on navigation plus reload, independent of the marker wait.
pub const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(60);

/// Interval between marker presence checks.
pub const MARKER_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Fixed Chromium arguments for the headless session.
pub const CHROME_ARGS: &[&str] = &["--disable-gpu", "--no-sandbox", "--disable-dev-shm-usage"];

/// Default output directory.
pub const DEFAULT_OUTPUT_DIR: &str = "json";

/// Subdirectory of the output directory holding one file per country.
pub const COUNTRIES_DIR: &str = "countries";

/// Aggregate file holding every harvested country.
pub const ALL_COUNTRIES_FILE: &str = "all_countries.json";

/// Marker character the catalog appends to some codes.
pub const WILDCARD: char = '*';

/// Alpha-2 pattern: exactly two uppercase ASCII letters.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ALPHA2_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2}$").expect("valid regex"));

/// Check whether a string is a well-formed ISO 3166-1 alpha-2 code.
///
/// # Examples
/// ```
/// use iso3166_harvester::config::is_alpha2_code;
///
/// assert!(is_alpha2_code("NL"));
/// assert!(!is_alpha2_code("nl"));
/// assert!(!is_alpha2_code("NLD"));
/// ```
pub fn is_alpha2_code(code: &str) -> bool {
    ALPHA2_PATTERN.is_match(code)
}

/// Build the catalog URL of a country page.
///
/// # Panics
/// Debug builds panic if `alpha2_code` is not a valid alpha-2 code.
pub fn country_url(alpha2_code: &str) -> String {
    debug_assert!(
        is_alpha2_code(alpha2_code),
        "alpha2_code should be validated before calling country_url"
    );
    format!("{COUNTRY_URL_PREFIX}{alpha2_code}")
}

/// Remove the catalog's wildcard marker from a code-like value.
///
/// # Examples
/// ```
/// use iso3166_harvester::config::strip_wildcard;
///
/// assert_eq!(strip_wildcard("AA-01*"), "AA-01");
/// assert_eq!(strip_wildcard("NL-DR"), "NL-DR");
/// ```
pub fn strip_wildcard(value: &str) -> String {
    value.replace(WILDCARD, "").trim().to_string()
}

/// Turn a value into a file stem that stays inside its directory.
///
/// Path separators and characters that are invalid in file names on common
/// platforms are replaced with `_`.
///
/// # Examples
/// ```
/// use iso3166_harvester::config::sanitize_file_stem;
///
/// assert_eq!(sanitize_file_stem("NL"), "NL");
/// assert_eq!(sanitize_file_stem("../etc"), "_etc");
/// assert_eq!(sanitize_file_stem("bolivia (plurinational state of)"), "bolivia (plurinational state of)");
/// ```
pub fn sanitize_file_stem(value: &str) -> String {
    let replaced: String = value
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '<' | '>' | '"' | '|' | '?' | '*' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    // No hidden files or parent references
    let trimmed = replaced.trim_start_matches('.');
    if trimmed.is_empty() {
        "_".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Validate a country code read from line `line` of `path`.
pub(crate) fn validate_alpha2_code(code: &str, path: &std::path::Path, line: usize) -> Result<()> {
    if is_alpha2_code(code) {
        Ok(())
    } else {
        Err(HarvesterError::InvalidCountryCode {
            code: code.to_string(),
            path: path.to_path_buf(),
            line,
        })
    }
}
