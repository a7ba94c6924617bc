//! JSON writer for country files.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Serializer;

use crate::config::{sanitize_file_stem, ALL_COUNTRIES_FILE, COUNTRIES_DIR};
use crate::error::{HarvesterError, Result};
use crate::types::Country;

/// How per-country files are named.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum FileNaming {
    /// `NL.json`
    #[default]
    Alpha2,
    /// `Netherlands (the).json`
    ShortNameLowerCase,
}

/// Serialize a value as JSON indented by four spaces.
pub fn generate_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;

    // serde_json only ever emits valid UTF-8
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Write `content` to `path` atomically.
///
/// Writes to a temp file next to `path`, syncs it to disk, then renames it
/// over `path`, so a crash never leaves a half-written file behind.
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_file = path.with_file_name(format!(".{file_name}.tmp"));

    {
        let mut file = File::create(&temp_file)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&temp_file, path)?;
    Ok(())
}

/// Output directory layout.
///
/// ```text
/// <root>/
///   all_countries.json
///   countries/
///     AD.json
///     AE.json
/// ```
#[derive(Debug, Clone)]
pub struct JsonOutput {
    root: PathBuf,
    naming: FileNaming,
}

impl JsonOutput {
    /// Create a layout rooted at `root`.
    pub fn new(root: impl Into<PathBuf>, naming: FileNaming) -> Self {
        Self {
            root: root.into(),
            naming,
        }
    }

    /// Root output directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the output directories if they do not exist.
    pub fn prepare(&self) -> Result<()> {
        fs::create_dir_all(self.root.join(COUNTRIES_DIR))?;
        Ok(())
    }

    /// Path of the file for `country`.
    pub fn country_path(&self, country: &Country) -> Result<PathBuf> {
        let stem = match self.naming {
            FileNaming::Alpha2 => country.alpha2_code.as_str(),
            FileNaming::ShortNameLowerCase => country
                .short_name_lower_case
                .as_deref()
                .filter(|name| !name.is_empty())
                .ok_or_else(|| HarvesterError::MissingField {
                    field: "Short name lower case".to_string(),
                    context: country.alpha2_code.clone(),
                })?,
        };

        Ok(self
            .root
            .join(COUNTRIES_DIR)
            .join(format!("{}.json", sanitize_file_stem(stem))))
    }

    /// Path of the aggregate file.
    pub fn all_countries_path(&self) -> PathBuf {
        self.root.join(ALL_COUNTRIES_FILE)
    }

    /// Save one country to its own file.
    ///
    /// # Returns
    /// Path to the saved file
    pub fn save_country(&self, country: &Country) -> Result<PathBuf> {
        let path = self.country_path(country)?;
        write_atomic(&path, &generate_json(country)?)?;
        Ok(path)
    }

    /// Save every country to the aggregate file.
    ///
    /// # Returns
    /// Path to the saved file
    pub fn save_all(&self, countries: &[Country]) -> Result<PathBuf> {
        let path = self.all_countries_path();
        write_atomic(&path, &generate_json(countries)?)?;
        Ok(path)
    }
}
