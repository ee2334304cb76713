//! Subcommand implementations, kept free of argument parsing

use std::io::Write;

use anyhow::{anyhow, Context};
use appeal_cipher::{AppealCode, AppealCodeCipher, ValidationReport};
use chrono::NaiveDate;
use tracing::info;

use crate::output::{write_rows, OutputFormat};

/// Encode one notice
pub fn encode(
    cipher: &AppealCodeCipher,
    date: NaiveDate,
    digit: u8,
) -> anyhow::Result<AppealCode> {
    let notice_type = cipher
        .table()
        .get(digit)
        .ok_or_else(|| anyhow!("Unknown notice type: {}", digit))?;

    let code = cipher.encode(date, notice_type);
    info!(%date, notice_type = digit, %code, "Encoded appeal code");
    Ok(code)
}

/// Validate a code as typed by a caller
///
/// Surrounding whitespace is ignored and ASCII letters are upper-cased first.
pub fn decode(cipher: &AppealCodeCipher, input: &str, reference_year: i32) -> ValidationReport {
    let code = normalize_code(input);
    let report = cipher.validate(&code, reference_year);
    info!(code = %code, valid = report.is_valid(), "Validated appeal code");
    report
}

/// Write every code for `from..=to` to `writer`, returning the row count
pub fn export<W: Write>(
    cipher: &AppealCodeCipher,
    from: NaiveDate,
    to: NaiveDate,
    format: OutputFormat,
    writer: &mut W,
) -> anyhow::Result<usize> {
    let rows = cipher
        .codes_for_range(from, to)
        .context("Cannot export appeal codes")?;
    info!(%from, %to, rows = rows.len(), ?format, "Exporting appeal codes");

    write_rows(writer, rows, format).context("Failed to write appeal codes")
}

/// Print the notice table, one `digit<TAB>label` line per type
pub fn list_types<W: Write>(cipher: &AppealCodeCipher, writer: &mut W) -> anyhow::Result<()> {
    for (notice_type, label) in cipher.table().iter() {
        writeln!(writer, "{}\t{}", notice_type, label)?;
    }
    Ok(())
}

fn normalize_code(input: &str) -> String {
    input.trim().to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_encode_known_type() {
        let cipher = AppealCodeCipher::default();
        let code = encode(&cipher, date(2024, 7, 15), 6).unwrap();
        assert_eq!(code, "85G467");
    }

    #[test]
    fn test_encode_unknown_type() {
        let cipher = AppealCodeCipher::default();
        let err = encode(&cipher, date(2024, 7, 15), 12).unwrap_err();
        assert_eq!(err.to_string(), "Unknown notice type: 12");
    }

    #[test]
    fn test_decode_normalizes_input() {
        let cipher = AppealCodeCipher::default();
        assert!(decode(&cipher, "  85g467\n", 2026).is_valid());
        assert!(!decode(&cipher, "85g 467", 2026).is_valid());
    }

    #[test]
    fn test_decode_keeps_non_ascii_length() {
        let cipher = AppealCodeCipher::default();
        let report = decode(&cipher, "85G46ß", 2026);
        assert_eq!(
            report,
            ValidationReport::Invalid {
                reason: "ChecksumMismatch",
                message: "Checksum mismatch: expected 7, found ß".to_string(),
            }
        );
    }

    #[test]
    fn test_export_counts_rows() {
        let cipher = AppealCodeCipher::default();
        let mut out = Vec::new();
        let rows = export(
            &cipher,
            date(2024, 1, 1),
            date(2024, 1, 7),
            OutputFormat::Csv,
            &mut out,
        )
        .unwrap();

        assert_eq!(rows, 70);
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 71);
    }

    #[test]
    fn test_export_rejects_inverted_range() {
        let cipher = AppealCodeCipher::default();
        let mut out = Vec::new();
        let err = export(
            &cipher,
            date(2024, 2, 1),
            date(2024, 1, 1),
            OutputFormat::Json,
            &mut out,
        )
        .unwrap_err();

        assert!(format!("{:#}", err).contains("Invalid date range"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_list_types() {
        let cipher = AppealCodeCipher::default();
        let mut out = Vec::new();
        list_types(&cipher, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 10);
        assert_eq!(text.lines().nth(3), Some("3\tRUCA (Road User Charging)"));
    }
}
