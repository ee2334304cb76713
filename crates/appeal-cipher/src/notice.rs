//! Notice types and the digit → label table
//!
//! The table is configuration data owned by the cipher. A [`NoticeType`] can
//! only be obtained from a table, so every value handed to the encoder is a
//! digit the table actually defines.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CipherError;

/// Built-in notice types issued by the service desk
pub const DEFAULT_NOTICE_TYPES: [(u8, &str); 10] = [
    (0, "Spare"),
    (1, "Parking"),
    (2, "Being in a bus lane"),
    (3, "RUCA (Road User Charging)"),
    (4, "Moving Traffic"),
    (5, "Spare"),
    (6, "Clean Air Zones"),
    (7, "Littering from Vehicles"),
    (8, "Clamp"),
    (9, "Remove"),
];

/// A notice type digit (0-9) defined by some [`NoticeTypeTable`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NoticeType(u8);

impl NoticeType {
    pub fn digit(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for NoticeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mapping of notice type digits to human-readable labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeTypeTable {
    labels: BTreeMap<u8, String>,
}

/// On-disk layout of a notice table
#[derive(Debug, Deserialize)]
struct TableFile {
    notice_types: BTreeMap<String, String>,
}

impl NoticeTypeTable {
    /// Build a table from `(digit, label)` pairs
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::InvalidNoticeTable`] if a digit is above 9,
    /// appears twice, has a blank label, or if no entries are given.
    pub fn new<I, S>(entries: I) -> Result<Self, CipherError>
    where
        I: IntoIterator<Item = (u8, S)>,
        S: Into<String>,
    {
        let mut labels = BTreeMap::new();

        for (digit, label) in entries {
            let label = label.into();
            if digit > 9 {
                return Err(CipherError::InvalidNoticeTable(format!(
                    "notice type {} is not a single digit",
                    digit
                )));
            }
            if label.trim().is_empty() {
                return Err(CipherError::InvalidNoticeTable(format!(
                    "notice type {} has an empty label",
                    digit
                )));
            }
            if labels.insert(digit, label).is_some() {
                return Err(CipherError::InvalidNoticeTable(format!(
                    "notice type {} is defined twice",
                    digit
                )));
            }
        }

        if labels.is_empty() {
            return Err(CipherError::InvalidNoticeTable(
                "at least one notice type is required".to_string(),
            ));
        }

        Ok(Self { labels })
    }

    /// Parse a table from TOML with a `[notice_types]` section
    ///
    /// ```
    /// use appeal_cipher::NoticeTypeTable;
    ///
    /// let table = NoticeTypeTable::from_toml_str(r#"
    ///     [notice_types]
    ///     1 = "Parking"
    ///     6 = "Clean Air Zones"
    /// "#).unwrap();
    /// assert_eq!(table.len(), 2);
    /// ```
    pub fn from_toml_str(s: &str) -> Result<Self, CipherError> {
        let file: TableFile =
            toml::from_str(s).map_err(|e| CipherError::InvalidNoticeTable(e.to_string()))?;

        let mut entries = Vec::with_capacity(file.notice_types.len());
        for (key, label) in file.notice_types {
            let digit = match key.trim().as_bytes() {
                [d] if d.is_ascii_digit() => d - b'0',
                _ => {
                    return Err(CipherError::InvalidNoticeTable(format!(
                        "key {:?} is not a single digit",
                        key
                    )))
                }
            };
            entries.push((digit, label));
        }

        Self::new(entries)
    }

    /// Look up a notice type by digit
    pub fn get(&self, digit: u8) -> Option<NoticeType> {
        self.labels.contains_key(&digit).then_some(NoticeType(digit))
    }

    /// Label for a notice type, if this table defines it
    pub fn label(&self, notice_type: NoticeType) -> Option<&str> {
        self.labels.get(&notice_type.0).map(String::as_str)
    }

    /// All notice types in digit order
    pub fn iter(&self) -> impl Iterator<Item = (NoticeType, &str)> + '_ {
        self.labels
            .iter()
            .map(|(digit, label)| (NoticeType(*digit), label.as_str()))
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always false: construction rejects empty tables
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl Default for NoticeTypeTable {
    fn default() -> Self {
        Self {
            labels: DEFAULT_NOTICE_TYPES
                .iter()
                .map(|(digit, label)| (*digit, label.to_string()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_table_has_all_digits() {
        let table = NoticeTypeTable::default();
        assert_eq!(table.len(), 10);
        for digit in 0..=9 {
            assert!(table.get(digit).is_some(), "digit {} missing", digit);
        }
        assert_eq!(table.get(10), None);
    }

    #[test]
    fn test_default_labels() {
        let table = NoticeTypeTable::default();
        let parking = table.get(1).unwrap();
        assert_eq!(table.label(parking), Some("Parking"));
        assert_eq!(table.label(table.get(6).unwrap()), Some("Clean Air Zones"));
        assert_eq!(table.label(table.get(5).unwrap()), Some("Spare"));
    }

    #[test]
    fn test_iter_is_in_digit_order() {
        let table = NoticeTypeTable::new([(7, "Littering"), (2, "Bus lane")]).unwrap();
        let digits: Vec<u8> = table.iter().map(|(t, _)| t.digit()).collect();
        assert_eq!(digits, vec![2, 7]);
    }

    #[test]
    fn test_rejects_out_of_range_digit() {
        let err = NoticeTypeTable::new([(10, "Ten")]).unwrap_err();
        assert_eq!(err.reason(), "InvalidNoticeTable");
    }

    #[test]
    fn test_rejects_duplicate_and_blank() {
        assert!(NoticeTypeTable::new([(1, "A"), (1, "B")]).is_err());
        assert!(NoticeTypeTable::new([(1, "  ")]).is_err());
        assert!(NoticeTypeTable::new(Vec::<(u8, String)>::new()).is_err());
    }

    #[test]
    fn test_label_from_foreign_table() {
        let small = NoticeTypeTable::new([(3, "RUCA")]).unwrap();
        let remove = NoticeTypeTable::default().get(9).unwrap();
        assert_eq!(small.label(remove), None);
    }

    #[test]
    fn test_from_toml() {
        let table = NoticeTypeTable::from_toml_str(
            r#"
            [notice_types]
            1 = "Parking"
            8 = "Clamp"
            "#,
        )
        .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.label(table.get(8).unwrap()), Some("Clamp"));
        assert_eq!(table.get(0), None);
    }

    #[test]
    fn test_from_toml_rejects_bad_keys() {
        let err = NoticeTypeTable::from_toml_str(
            r#"
            [notice_types]
            12 = "Twelve"
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("single digit"));

        assert!(NoticeTypeTable::from_toml_str("not = [valid").is_err());
        assert!(NoticeTypeTable::from_toml_str("[other]\n1 = \"x\"").is_err());
    }
}
