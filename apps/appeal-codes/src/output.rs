//! Writers for exported code rows
//!
//! - **CSV**: `Date,Notice Type,Appeal Code` with dates as `DD/MM/YYYY`
//! - **JSON**: an array of row objects with ISO dates

use std::io::Write;

use appeal_cipher::ExportRow;
use clap::ValueEnum;

pub const CSV_HEADER: [&str; 3] = ["Date", "Notice Type", "Appeal Code"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

/// Write all rows in the given format, returning the number written
pub fn write_rows<W, I>(writer: &mut W, rows: I, format: OutputFormat) -> anyhow::Result<usize>
where
    W: Write,
    I: IntoIterator<Item = ExportRow>,
{
    match format {
        OutputFormat::Csv => write_csv(writer, rows),
        OutputFormat::Json => write_json(writer, rows),
    }
}

fn write_csv<W: Write>(
    writer: &mut W,
    rows: impl IntoIterator<Item = ExportRow>,
) -> anyhow::Result<usize> {
    write_csv_record(writer, &CSV_HEADER)?;

    let mut count = 0;
    for row in rows {
        let date = row.date.format("%d/%m/%Y").to_string();
        write_csv_record(writer, &[date.as_str(), row.label.as_str(), row.code.as_str()])?;
        count += 1;
    }

    writer.flush()?;
    Ok(count)
}

fn write_csv_record<W: Write>(writer: &mut W, fields: &[&str]) -> std::io::Result<()> {
    let line = fields
        .iter()
        .map(|field| escape_csv_field(field))
        .collect::<Vec<_>>()
        .join(",");
    writeln!(writer, "{}", line)
}

/// Quote a field if it contains a separator, quote or line break
fn escape_csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn write_json<W: Write>(
    writer: &mut W,
    rows: impl IntoIterator<Item = ExportRow>,
) -> anyhow::Result<usize> {
    writer.write_all(b"[")?;

    let mut count = 0;
    for row in rows {
        if count > 0 {
            writer.write_all(b",")?;
        }
        writer.write_all(b"\n  ")?;
        serde_json::to_writer(&mut *writer, &row)?;
        count += 1;
    }

    if count > 0 {
        writer.write_all(b"\n")?;
    }
    writer.write_all(b"]\n")?;
    writer.flush()?;
    Ok(count)
}
