//! Encoding and validation of notice appeal codes
//!
//! Layout of a code, e.g. `85G467` for a Clean Air Zones notice of 15 July 2024:
//!
//! | chars | field | example |
//! |-------|-------|---------|
//! | 0-1 | 100 minus day of month | `85` |
//! | 2 | month letter, A = January .. L = December | `G` |
//! | 3 | last digit of the year | `4` |
//! | 4 | notice type digit | `6` |
//! | 5 | weighted mod-11 check character (`0`-`9` or `A`) | `7` |

use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;
use tracing::debug;

use crate::error::{CipherError, CodeField};
use crate::notice::{NoticeType, NoticeTypeTable};

/// Number of characters in an appeal code
pub const CODE_LENGTH: usize = 6;

/// Position weights applied to the five checked digits
const CHECK_WEIGHTS: [u32; 5] = [5, 4, 3, 2, 1];

/// A six-character appeal code
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AppealCode(String);

impl AppealCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AppealCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AppealCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for AppealCode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Date and notice type recovered from a valid code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DecodedCode {
    pub date: NaiveDate,
    pub notice_type: NoticeType,
}

/// Encoder/validator for appeal codes over a notice type table
#[derive(Debug, Clone, Default)]
pub struct AppealCodeCipher {
    table: NoticeTypeTable,
}

impl AppealCodeCipher {
    pub fn new(table: NoticeTypeTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &NoticeTypeTable {
        &self.table
    }

    /// Encode a notice date and type into a code
    ///
    /// ```
    /// use appeal_cipher::AppealCodeCipher;
    /// use chrono::NaiveDate;
    ///
    /// let cipher = AppealCodeCipher::default();
    /// let clean_air = cipher.table().get(6).unwrap();
    /// let date = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();
    /// assert_eq!(cipher.encode(date, clean_air).as_str(), "85G467");
    /// ```
    pub fn encode(&self, date: NaiveDate, notice_type: NoticeType) -> AppealCode {
        // day is 1..=31, so the complement is always two digits (69..=99)
        let complement = 100 - date.day();
        let month_char = char::from(b'A' + date.month0() as u8);
        let year_digit = date.year().rem_euclid(10) as u32;
        let notice_digit = u32::from(notice_type.digit());

        let check = check_character([
            complement / 10,
            complement % 10,
            fold_alphabet_position(date.month()),
            year_digit,
            notice_digit,
        ]);

        AppealCode(format!(
            "{:02}{}{}{}{}",
            complement, month_char, year_digit, notice_digit, check
        ))
    }

    /// Validate a code, resolving the year digit against the current year
    pub fn decode(&self, code: &str) -> Result<DecodedCode, CipherError> {
        self.decode_with_reference_year(code, Local::now().year())
    }

    /// Validate a code, resolving the year digit against `reference_year`
    ///
    /// The year is taken to be the latest year not after `reference_year`
    /// that ends in the code's year digit.
    pub fn decode_with_reference_year(
        &self,
        code: &str,
        reference_year: i32,
    ) -> Result<DecodedCode, CipherError> {
        self.parse(code, reference_year).map_err(|err| {
            debug!(code, reason = err.reason(), "Rejected appeal code: {}", err);
            err
        })
    }

    fn parse(&self, code: &str, reference_year: i32) -> Result<DecodedCode, CipherError> {
        let chars: Vec<char> = code.chars().collect();
        if chars.len() != CODE_LENGTH {
            return Err(CipherError::MalformedLength(chars.len()));
        }

        let complement = match (chars[0].to_digit(10), chars[1].to_digit(10)) {
            (Some(tens), Some(units)) => tens * 10 + units,
            _ => {
                return Err(CipherError::malformed(
                    CodeField::Complement,
                    chars[..2].iter().collect::<String>(),
                ))
            }
        };

        let month_char = chars[2];
        let month = alphabet_position(month_char)
            .ok_or_else(|| CipherError::malformed(CodeField::Month, month_char))?;

        let year_digit = chars[3]
            .to_digit(10)
            .ok_or_else(|| CipherError::malformed(CodeField::Year, chars[3]))?;

        let notice_digit = chars[4]
            .to_digit(10)
            .ok_or_else(|| CipherError::malformed(CodeField::NoticeType, chars[4]))?;
        let notice_type = self
            .table
            .get(notice_digit as u8)
            .ok_or(CipherError::UnknownNoticeType(notice_digit as u8))?;

        let expected = check_character([
            complement / 10,
            complement % 10,
            fold_alphabet_position(month),
            year_digit,
            notice_digit,
        ]);
        if chars[5] != expected {
            return Err(CipherError::ChecksumMismatch {
                expected,
                found: chars[5],
            });
        }

        // Only A-L are ever issued; a later letter with a consistent
        // checksum is a forged or corrupted code.
        if month > 12 {
            return Err(CipherError::malformed(CodeField::Month, month_char));
        }

        let day = 100 - complement;
        let year = resolve_year(year_digit, reference_year).ok_or_else(|| {
            CipherError::malformed(
                CodeField::Date,
                format!("year ending {} before {}", year_digit, reference_year),
            )
        })?;
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            CipherError::malformed(
                CodeField::Date,
                format!("{:04}-{:02}-{:02}", year, month, day),
            )
        })?;

        Ok(DecodedCode { date, notice_type })
    }
}

/// Check character for the given fields
///
/// Returns `None` when `month_char` is not an uppercase ASCII letter, when
/// `complement` is above 99, or when either digit is above 9.
pub fn checksum(
    complement: u8,
    month_char: char,
    year_digit: u8,
    notice_digit: u8,
) -> Option<char> {
    if complement > 99 || year_digit > 9 || notice_digit > 9 {
        return None;
    }

    let alpha = fold_alphabet_position(alphabet_position(month_char)?);
    let complement = u32::from(complement);

    Some(check_character([
        complement / 10,
        complement % 10,
        alpha,
        u32::from(year_digit),
        u32::from(notice_digit),
    ]))
}

/// Latest year not after `reference_year` ending in `year_digit`
///
/// Returns `None` if `year_digit` is above 9 or the year does not fit in `i32`.
pub fn resolve_year(year_digit: u32, reference_year: i32) -> Option<i32> {
    if year_digit > 9 {
        return None;
    }
    let decade = reference_year.div_euclid(10).checked_mul(10)?;
    let digit = year_digit as i32;
    if digit > reference_year - decade {
        decade.checked_sub(10)?.checked_add(digit)
    } else {
        decade.checked_add(digit)
    }
}

/// 1-based position of an uppercase ASCII letter (A = 1 .. Z = 26)
fn alphabet_position(c: char) -> Option<u32> {
    c.is_ascii_uppercase().then(|| c as u32 - 'A' as u32 + 1)
}

/// Fold an alphabet position onto a single digit: A..J → 1..9,0; K..T → 1..9,0; U..Z → 1..6
fn fold_alphabet_position(position: u32) -> u32 {
    if position <= 10 {
        position % 10
    } else if position <= 20 {
        (position - 10) % 10
    } else {
        position - 20
    }
}

fn check_character(digits: [u32; 5]) -> char {
    let sum: u32 = digits
        .iter()
        .zip(CHECK_WEIGHTS.iter())
        .map(|(digit, weight)| digit * weight)
        .sum();

    match sum % 11 {
        10 => 'A',
        remainder => char::from(b'0' + remainder as u8),
    }
}
