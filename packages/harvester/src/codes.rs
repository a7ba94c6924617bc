//! Country code lists.
//!
//! A code list is a delimited text file with one country per row; only the
//! first column is read. It replaces harvesting links from the index page.

use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, Trim};

use crate::config::validate_alpha2_code;
use crate::error::Result;

/// Column separators recognised in code lists.
const DELIMITERS: &[u8] = b",;\t";

/// Pick the delimiter of a code list from its first non-blank line.
///
/// The first recognised separator outside double quotes wins. Defaults to a
/// comma for single-column lists.
fn sniff_delimiter(text: &str) -> u8 {
    let Some(line) = text.lines().find(|line| !line.trim().is_empty()) else {
        return b',';
    };

    let mut quoted = false;
    for byte in line.bytes() {
        match byte {
            b'"' => quoted = !quoted,
            b if !quoted && DELIMITERS.contains(&b) => return b,
            _ => {}
        }
    }
    b','
}

/// Parse a code list. `path` is only used for error context.
///
/// Blank lines are skipped. Every other first cell must be an alpha-2 code.
pub fn parse_country_codes(text: &str, path: &Path) -> Result<Vec<String>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .delimiter(sniff_delimiter(text))
        .from_reader(text.as_bytes());

    let mut codes = Vec::new();

    for record in reader.records() {
        let record = record?;
        let code = record.get(0).unwrap_or_default();
        if code.is_empty() {
            continue;
        }

        let line = record.position().map_or(0, |position| position.line());
        validate_alpha2_code(code, path, usize::try_from(line).unwrap_or(usize::MAX))?;
        codes.push(code.to_string());
    }

    Ok(codes)
}

/// Read a code list from disk.
pub fn read_country_codes(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)?;
    let codes = parse_country_codes(&text, path)?;
    tracing::debug!(count = codes.len(), path = %path.display(), "Read country codes");
    Ok(codes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HarvesterError;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_reads_first_column() {
        let codes = parse_country_codes(
            "NL,Netherlands (the)\n\"DE\",Germany\r\n\nLU\n",
            Path::new("codes.csv"),
        )
        .unwrap();

        assert_eq!(codes, vec!["NL", "DE", "LU"]);
    }

    #[test]
    fn test_detects_semicolon_and_tab_delimiters() {
        let path = Path::new("codes.csv");

        let codes = parse_country_codes("BE;Belgium\nFR;France\n", path).unwrap();
        assert_eq!(codes, vec!["BE", "FR"]);

        let codes = parse_country_codes("FR\tFrance\nIT\tItaly\n", path).unwrap();
        assert_eq!(codes, vec!["FR", "IT"]);
    }

    #[test]
    fn test_quoted_cells_keep_delimiters_and_escapes() {
        let codes = parse_country_codes(
            "\"NL\";\"Netherlands; Kingdom of the\"\n\"BQ\";\"Bonaire, \"\"Sint\"\" Eustatius\"\n",
            Path::new("codes.csv"),
        )
        .unwrap();

        assert_eq!(codes, vec!["NL", "BQ"]);
    }

    #[test]
    fn test_quoted_comma_does_not_decide_delimiter() {
        assert_eq!(sniff_delimiter("\"NL,x\";Netherlands\n"), b';');
        assert_eq!(sniff_delimiter("NL\n"), b',');
        assert_eq!(sniff_delimiter(""), b',');
    }

    #[test]
    fn test_skips_byte_order_mark() {
        let codes = parse_country_codes("\u{feff}AD\n", Path::new("codes.csv")).unwrap();
        assert_eq!(codes, vec!["AD"]);
    }

    #[test]
    fn test_rejects_invalid_code_with_line_number() {
        let err = parse_country_codes("NL\nBE\nnetherlands\n", Path::new("codes.csv")).unwrap_err();

        match err {
            HarvesterError::InvalidCountryCode { code, line, .. } => {
                assert_eq!(code, "netherlands");
                assert_eq!(line, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_read_country_codes_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "AE,United Arab Emirates").unwrap();
        writeln!(file, "AF,Afghanistan").unwrap();

        let codes = read_country_codes(file.path()).unwrap();
        assert_eq!(codes, vec!["AE", "AF"]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read_country_codes(Path::new("/nonexistent/codes.csv")).unwrap_err();
        assert!(matches!(err, HarvesterError::Io(_)));
    }
}
