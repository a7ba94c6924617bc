//! Command-line interface for the harvester.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::browser::{with_chromium, BrowserOptions};
use crate::codes::read_country_codes;
use crate::config::{CATALOG_INDEX_URL, DEFAULT_OUTPUT_DIR};
use crate::error::Result;
use crate::harvester::{harvest_countries, HarvestEvent, Targets};
use crate::json::{FileNaming, JsonOutput};

/// ISO 3166 Harvester - Extract country and subdivision data from the ISO catalog.
#[derive(Parser)]
#[command(name = "iso3166-harvester")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Harvest every country and write JSON files.
    Harvest {
        /// Output directory (default: json/)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// File listing alpha-2 codes to harvest, first column only
        /// (default: every country on the catalog index)
        #[arg(short, long)]
        codes: Option<PathBuf>,

        /// How to name per-country files
        #[arg(short, long, value_enum, default_value_t = FileNaming::Alpha2)]
        naming: FileNaming,

        /// Chrome/Chromium executable (default: auto-detect)
        #[arg(long)]
        chrome: Option<PathBuf>,

        /// Show the browser window
        #[arg(long)]
        headed: bool,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Harvest {
            output,
            codes,
            naming,
            chrome,
            headed,
        } => {
            let options = BrowserOptions {
                chrome_executable: chrome,
                headed,
            };
            harvest_command(output.as_deref(), codes.as_deref(), naming, &options)
        }
    }
}

/// Execute the harvest command.
fn harvest_command(
    output: Option<&Path>,
    codes: Option<&Path>,
    naming: FileNaming,
    options: &BrowserOptions,
) -> Result<()> {
    // Read the code list before launching a browser
    let targets = match codes {
        Some(path) => Targets::Codes(read_country_codes(path)?),
        None => Targets::Index {
            url: CATALOG_INDEX_URL.to_string(),
        },
    };

    let output = JsonOutput::new(output.unwrap_or(Path::new(DEFAULT_OUTPUT_DIR)), naming);

    println!(
        "{} ISO 3166 countries into {}",
        style("Harvesting").bold(),
        style(output.root().display()).cyan()
    );
    println!();

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message("Loading country list...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = with_chromium(options, |session| {
        harvest_countries(session, &targets, &output, |event| match event {
            HarvestEvent::Discovered { total } => {
                pb.set_length(total as u64);
                #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
                pb.set_style(
                    ProgressStyle::default_bar()
                        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                        .expect("valid template")
                        .progress_chars("=> "),
                );
            }
            HarvestEvent::Saved {
                position, country, ..
            } => {
                pb.set_position(position as u64);
                pb.set_message(country.alpha2_code.clone());
            }
        })
    });

    let countries = match result {
        Ok(countries) => countries,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.finish_and_clear();

    let subdivisions: usize = countries.iter().map(|c| c.subdivisions.len()).sum();
    println!("  Countries: {}", style(countries.len()).green());
    println!("  Subdivisions: {}", style(subdivisions).green());
    println!();
    println!(
        "{} {}",
        style("Saved to:").green().bold(),
        output.all_countries_path().display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_harvest_defaults() {
        let cli = Cli::parse_from(["iso3166-harvester", "harvest"]);

        let Commands::Harvest {
            output,
            codes,
            naming,
            chrome,
            headed,
        } = cli.command;
        assert!(output.is_none());
        assert!(codes.is_none());
        assert_eq!(naming, FileNaming::Alpha2);
        assert!(chrome.is_none());
        assert!(!headed);
    }

    #[test]
    fn test_cli_parse_harvest_with_options() {
        let cli = Cli::parse_from([
            "iso3166-harvester",
            "harvest",
            "--output",
            "/tmp/out",
            "--codes",
            "codes.csv",
            "--naming",
            "short-name-lower-case",
            "--headed",
        ]);

        let Commands::Harvest {
            output,
            codes,
            naming,
            headed,
            ..
        } = cli.command;
        assert_eq!(output, Some(PathBuf::from("/tmp/out")));
        assert_eq!(codes, Some(PathBuf::from("codes.csv")));
        assert_eq!(naming, FileNaming::ShortNameLowerCase);
        assert!(headed);
    }

    #[test]
    fn test_cli_rejects_unknown_naming() {
        let result = Cli::try_parse_from(["iso3166-harvester", "harvest", "--naming", "numeric"]);
        assert!(result.is_err());
    }
}
