//! Bulk generation of codes over a date range

use std::iter::FusedIterator;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::cipher::{AppealCode, AppealCodeCipher};
use crate::error::CipherError;
use crate::notice::NoticeType;

/// One generated code with its date and notice type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    pub date: NaiveDate,
    pub notice_type: NoticeType,
    pub label: String,
    pub code: AppealCode,
}

/// Lazy iterator over every (day, notice type) pair of an inclusive range
///
/// Days ascend; within a day notice types follow the table's digit order.
#[derive(Debug, Clone)]
pub struct RangeCodes<'a> {
    cipher: &'a AppealCodeCipher,
    types: Vec<(NoticeType, &'a str)>,
    day: Option<NaiveDate>,
    end: NaiveDate,
    type_index: usize,
    remaining: usize,
}

impl AppealCodeCipher {
    /// Codes for every day in `start..=end` and every notice type in the table
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::InvalidRange`] if `start` is after `end`.
    pub fn codes_for_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<RangeCodes<'_>, CipherError> {
        if start > end {
            return Err(CipherError::InvalidRange { start, end });
        }

        let types: Vec<_> = self.table().iter().collect();
        let days = (end - start).num_days() as usize + 1;
        debug!(%start, %end, days, "Generating appeal codes for range");

        Ok(RangeCodes {
            cipher: self,
            remaining: days * types.len(),
            types,
            day: Some(start),
            end,
            type_index: 0,
        })
    }
}

impl Iterator for RangeCodes<'_> {
    type Item = ExportRow;

    fn next(&mut self) -> Option<Self::Item> {
        let day = self.day?;
        let (notice_type, label) = self.types[self.type_index];

        self.type_index += 1;
        if self.type_index == self.types.len() {
            self.type_index = 0;
            self.day = if day < self.end { day.succ_opt() } else { None };
        }
        self.remaining = self.remaining.saturating_sub(1);

        Some(ExportRow {
            date: day,
            notice_type,
            label: label.to_string(),
            code: self.cipher.encode(day, notice_type),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for RangeCodes<'_> {}

impl FusedIterator for RangeCodes<'_> {}
