//! Error types for the harvester.
//!
//! Every fatal condition surfaces as a `HarvesterError`. Recoverable
//! conditions (an absent optional section, a header label that is not on the
//! page) never reach this type: extractors return empty results or unset
//! fields for those.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Main error type for the harvester library.
#[derive(Debug, Error)]
pub enum HarvesterError {
    /// A required marker element did not appear within the bounded wait.
    #[error("Timed out after {}s waiting for {marker} on {url}", .timeout.as_secs())]
    RenderTimeout {
        url: String,
        marker: String,
        timeout: Duration,
    },

    /// Browser configuration could not be built.
    #[error("Invalid browser configuration: {0}")]
    BrowserConfig(String),

    /// The browser could not be launched or a DevTools command failed.
    #[error("Browser error: {0}")]
    Browser(#[from] chromiumoxide::error::CdpError),

    /// A field that must hold an integer held something else.
    #[error("Invalid number for {field}: '{value}'")]
    InvalidNumber { field: String, value: String },

    /// A record lacks a field needed to identify or name it.
    #[error("Missing required field: {field} for {context}")]
    MissingField { field: String, context: String },

    /// Invalid ISO 3166-1 alpha-2 code.
    #[error("Invalid country code '{code}' at {}:{line}. Expected two uppercase letters (e.g., NL)", .path.display())]
    InvalidCountryCode {
        code: String,
        path: PathBuf,
        line: usize,
    },

    /// A link on the index page could not be resolved to an absolute URL.
    #[error("Invalid link '{href}': {source}")]
    InvalidLink {
        href: String,
        #[source]
        source: url::ParseError,
    },

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A country code list could not be read as delimited text.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for harvester operations.
pub type Result<T> = std::result::Result<T, HarvesterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_timeout_display() {
        let err = HarvesterError::RenderTimeout {
            url: "https://www.iso.org/obp/ui/#iso:code:3166:NL".to_string(),
            marker: "#subdivision".to_string(),
            timeout: Duration::from_secs(20),
        };
        assert_eq!(
            err.to_string(),
            "Timed out after 20s waiting for #subdivision on https://www.iso.org/obp/ui/#iso:code:3166:NL"
        );
    }

    #[test]
    fn test_invalid_country_code_display() {
        let err = HarvesterError::InvalidCountryCode {
            code: "nl".to_string(),
            path: PathBuf::from("codes.csv"),
            line: 3,
        };
        let message = err.to_string();
        assert!(message.contains("'nl'"));
        assert!(message.contains("codes.csv:3"));
    }

    #[test]
    fn test_invalid_number_display() {
        let err = HarvesterError::InvalidNumber {
            field: "Numeric code".to_string(),
            value: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid number for Numeric code: 'abc'");
    }
}
