//! Notice appeal codes
//!
//! This crate encodes a notice date and notice type into a six-character
//! appeal code with an embedded check character, and validates codes typed
//! back in by the public.
//!
//! - [`AppealCodeCipher::encode`] / [`AppealCodeCipher::decode`]: single codes
//! - [`AppealCodeCipher::codes_for_range`]: every code for a range of days
//! - [`NoticeTypeTable`]: digit → label configuration, default or from TOML

pub mod cipher;
pub mod error;
pub mod export;
pub mod notice;
pub mod report;

pub use cipher::{checksum, resolve_year, AppealCode, AppealCodeCipher, DecodedCode, CODE_LENGTH};
pub use error::{CipherError, CodeField};
pub use export::{ExportRow, RangeCodes};
pub use notice::{NoticeType, NoticeTypeTable, DEFAULT_NOTICE_TYPES};
pub use report::ValidationReport;
