//! Appeal code CLI binary
//!
//! Codes and exports go to stdout; logs go to stderr.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use appeal_cipher::AppealCodeCipher;
use appeal_codes::{commands, load_notice_table, parse_date, OutputFormat, NOTICE_TABLE_ENV};
use chrono::{Datelike, Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "appeal-codes")]
#[command(version, about = "Generate and validate notice appeal codes")]
struct Args {
    /// TOML file with a [notice_types] table (defaults to the built-in table)
    #[arg(long, global = true, env = NOTICE_TABLE_ENV)]
    notice_table: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode a notice date and type
    Encode {
        /// Notice date as YYYY-MM-DD
        #[arg(long, value_parser = parse_date)]
        date: NaiveDate,

        /// Notice type digit
        #[arg(short = 't', long)]
        notice_type: u8,
    },

    /// Validate a code and show its date and notice type
    Decode {
        code: String,

        /// Year used to resolve the year digit (defaults to the current year)
        #[arg(long)]
        reference_year: Option<i32>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export every code for a range of dates
    Export {
        /// First day, YYYY-MM-DD
        #[arg(long, value_parser = parse_date)]
        from: NaiveDate,

        /// Last day (inclusive), YYYY-MM-DD
        #[arg(long, value_parser = parse_date)]
        to: NaiveDate,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the notice types
    Types,
}

fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("appeal_codes=info,appeal_cipher=info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let table = load_notice_table(args.notice_table.as_deref())?;
    let cipher = AppealCodeCipher::new(table);

    match args.command {
        Command::Encode { date, notice_type } => {
            let code = commands::encode(&cipher, date, notice_type)?;
            println!("{}", code);
        }
        Command::Decode {
            code,
            reference_year,
            json,
        } => {
            let reference_year = reference_year.unwrap_or_else(|| Local::now().year());
            let report = commands::decode(&cipher, &code, reference_year);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report);
            }
            if !report.is_valid() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Export {
            from,
            to,
            format,
            output,
        } => {
            let rows = match output {
                Some(path) => {
                    let file = File::create(&path)
                        .with_context(|| format!("Failed to create {}", path.display()))?;
                    let mut writer = BufWriter::new(file);
                    commands::export(&cipher, from, to, format, &mut writer)?
                }
                None => {
                    let stdout = io::stdout();
                    let mut writer = BufWriter::new(stdout.lock());
                    let rows = commands::export(&cipher, from, to, format, &mut writer)?;
                    writer.flush()?;
                    rows
                }
            };
            tracing::info!("Wrote {} appeal codes", rows);
        }
        Command::Types => {
            let stdout = io::stdout();
            commands::list_types(&cipher, &mut stdout.lock())?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
