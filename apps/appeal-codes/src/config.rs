//! Notice table loading and argument parsing helpers

use std::fs;
use std::path::Path;

use anyhow::Context;
use appeal_cipher::NoticeTypeTable;
use chrono::NaiveDate;
use tracing::info;

/// Environment variable naming a TOML notice table
pub const NOTICE_TABLE_ENV: &str = "APPEAL_CODES_NOTICE_TABLE";

/// Load the notice table from `path`, or fall back to the built-in table
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid table.
pub fn load_notice_table(path: Option<&Path>) -> anyhow::Result<NoticeTypeTable> {
    let Some(path) = path else {
        return Ok(NoticeTypeTable::default());
    };

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read notice table: {}", path.display()))?;
    let table = NoticeTypeTable::from_toml_str(&content)
        .with_context(|| format!("Failed to parse notice table: {}", path.display()))?;

    info!(path = %path.display(), types = table.len(), "Loaded notice table");
    Ok(table)
}

/// Parse a `YYYY-MM-DD` date argument
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| format!("expected a date as YYYY-MM-DD: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_table_without_path() {
        let table = load_notice_table(None).unwrap();
        assert_eq!(table.len(), 10);
    }

    #[test]
    fn test_loads_table_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[notice_types]\n1 = \"Parking\"\n2 = \"Bus lane\"").unwrap();

        let table = load_notice_table(Some(file.path())).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.label(table.get(2).unwrap()), Some("Bus lane"));
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = load_notice_table(Some(Path::new("/nonexistent/table.toml"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/table.toml"));
    }

    #[test]
    fn test_invalid_table_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[notice_types]\nx = \"Nope\"").unwrap();

        let err = load_notice_table(Some(file.path())).unwrap_err();
        assert!(format!("{:#}", err).contains("single digit"));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-07-15"),
            Ok(NaiveDate::from_ymd_opt(2024, 7, 15).unwrap())
        );
        assert!(parse_date("15/07/2024").is_err());
        assert!(parse_date("2024-02-30").is_err());
    }
}
