//! ISO 3166 Harvester - Extract country and subdivision data from the ISO
//! Online Browsing Platform.
//!
//! The catalog renders its pages client-side. This crate drives a headless
//! browser through the index page and every country page, extracts the
//! country summary and its tables, and writes one JSON file per country plus
//! an aggregate file.
//!
//! # Example
//!
//! ```
//! use iso3166_harvester::config;
//!
//! assert!(config::is_alpha2_code("NL"));
//! assert_eq!(config::strip_wildcard("NL-DR*"), "NL-DR");
//! ```
//!
//! # Architecture
//!
//! The harvester is organized into several modules:
//!
//! - [`config`]: Catalog URLs, markers, timeouts and validation
//! - [`types`]: Core data types (Country, Subdivision, etc.)
//! - [`error`]: Error types and Result alias
//! - [`browser`]: Page rendering behind the [`browser::PageSource`] seam
//! - [`dom`]: HTML query helpers
//! - [`mapping`]: Header-label to column resolution
//! - [`extract`]: Per-section record extractors
//! - [`codes`]: Country code list input
//! - [`json`]: JSON output generation
//! - [`cli`]: Command-line interface
//! - [`harvester`]: Main harvester service

pub mod browser;
pub mod cli;
pub mod codes;
pub mod config;
pub mod dom;
pub mod error;
pub mod extract;
pub mod harvester;
pub mod json;
pub mod mapping;
pub mod types;

// Re-export main functions
pub use harvester::{harvest_countries, harvest_country, HarvestEvent, Targets};

// Re-export commonly used items
pub use error::{HarvesterError, Result};
pub use types::{
    AdditionalInformation, ChangeHistoryEntry, Country, Subdivision, SubdivisionCategory,
};
