use chrono::NaiveDate;
use thiserror::Error;

/// Field of an appeal code that failed to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeField {
    Complement,
    Month,
    Year,
    NoticeType,
    Date,
}

impl std::fmt::Display for CodeField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CodeField::Complement => "day complement",
            CodeField::Month => "month letter",
            CodeField::Year => "year digit",
            CodeField::NoticeType => "notice type digit",
            CodeField::Date => "date",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CipherError {
    #[error("Appeal code must be 6 characters, got {0}")]
    MalformedLength(usize),

    #[error("Invalid {field} in appeal code: {value:?}")]
    MalformedField { field: CodeField, value: String },

    #[error("Unknown notice type: {0}")]
    UnknownNoticeType(u8),

    #[error("Checksum mismatch: expected {expected}, found {found}")]
    ChecksumMismatch { expected: char, found: char },

    #[error("Invalid date range: {start} is after {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid notice type table: {0}")]
    InvalidNoticeTable(String),
}

impl CipherError {
    /// Stable name of the failure kind, as shown in validation reports
    pub fn reason(&self) -> &'static str {
        match self {
            CipherError::MalformedLength(_) => "MalformedLength",
            CipherError::MalformedField { .. } => "MalformedField",
            CipherError::UnknownNoticeType(_) => "UnknownNoticeType",
            CipherError::ChecksumMismatch { .. } => "ChecksumMismatch",
            CipherError::InvalidRange { .. } => "InvalidRange",
            CipherError::InvalidNoticeTable(_) => "InvalidNoticeTable",
        }
    }

    pub(crate) fn malformed(field: CodeField, value: impl Into<String>) -> Self {
        CipherError::MalformedField {
            field,
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_names_are_stable() {
        assert_eq!(CipherError::MalformedLength(3).reason(), "MalformedLength");
        assert_eq!(
            CipherError::malformed(CodeField::Month, "!").reason(),
            "MalformedField"
        );
        assert_eq!(
            CipherError::ChecksumMismatch {
                expected: '7',
                found: '8'
            }
            .reason(),
            "ChecksumMismatch"
        );
    }

    #[test]
    fn test_error_messages_name_the_field() {
        let err = CipherError::malformed(CodeField::Year, "x");
        assert_eq!(err.to_string(), "Invalid year digit in appeal code: \"x\"");
    }
}
