//! Serialisable outcome of validating a code
//!
//! A report is either valid (with date, notice type and label) or invalid
//! (with a reason); it never carries both.

use chrono::NaiveDate;
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::cipher::{AppealCodeCipher, DecodedCode};
use crate::error::CipherError;
use crate::notice::{NoticeType, NoticeTypeTable};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationReport {
    Valid {
        date: NaiveDate,
        notice_type: NoticeType,
        label: String,
    },
    Invalid {
        reason: &'static str,
        message: String,
    },
}

impl ValidationReport {
    /// Build a report from a decode result, looking up the label in `table`
    pub fn from_result(
        result: Result<DecodedCode, CipherError>,
        table: &NoticeTypeTable,
    ) -> Self {
        match result {
            Ok(decoded) => match table.label(decoded.notice_type) {
                Some(label) => ValidationReport::Valid {
                    date: decoded.date,
                    notice_type: decoded.notice_type,
                    label: label.to_string(),
                },
                None => {
                    Self::from(CipherError::UnknownNoticeType(decoded.notice_type.digit()))
                }
            },
            Err(err) => Self::from(err),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationReport::Valid { .. })
    }
}

impl AppealCodeCipher {
    /// Decode a code against `reference_year` and wrap the outcome in a report
    pub fn validate(&self, code: &str, reference_year: i32) -> ValidationReport {
        ValidationReport::from_result(
            self.decode_with_reference_year(code, reference_year),
            self.table(),
        )
    }
}

impl From<CipherError> for ValidationReport {
    fn from(err: CipherError) -> Self {
        ValidationReport::Invalid {
            reason: err.reason(),
            message: err.to_string(),
        }
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationReport::Valid {
                date,
                notice_type,
                label,
            } => write!(
                f,
                "valid: {} notice type {} ({})",
                date.format("%d/%m/%Y"),
                notice_type,
                label
            ),
            ValidationReport::Invalid { reason, message } => {
                write!(f, "invalid ({}): {}", reason, message)
            }
        }
    }
}

impl Serialize for ValidationReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ValidationReport::Valid {
                date,
                notice_type,
                label,
            } => {
                let mut state = serializer.serialize_struct("ValidationReport", 4)?;
                state.serialize_field("valid", &true)?;
                state.serialize_field("date", date)?;
                state.serialize_field("notice_type", notice_type)?;
                state.serialize_field("label", label)?;
                state.end()
            }
            ValidationReport::Invalid { reason, message } => {
                let mut state = serializer.serialize_struct("ValidationReport", 3)?;
                state.serialize_field("valid", &false)?;
                state.serialize_field("reason", reason)?;
                state.serialize_field("message", message)?;
                state.end()
            }
        }
    }
}
