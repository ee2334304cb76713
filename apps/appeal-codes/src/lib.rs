//! Appeal code command-line tool
//!
//! Wraps `appeal-cipher` for service desk staff: encode a single notice,
//! check a code read out over the phone, or export every code for a
//! range of dates as CSV or JSON.

pub mod commands;
pub mod config;
pub mod output;

pub use config::{load_notice_table, parse_date, NOTICE_TABLE_ENV};
pub use output::OutputFormat;
