//! A single row of the uploaded activity export.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Column names the aggregation understands.
pub mod columns {
    pub const ROOM_ID: &str = "room_id";
    pub const URL: &str = "url";
    pub const CONTENT: &str = "content";
    pub const CREATE_TIME: &str = "create_time";
    pub const USER_ID: &str = "user_id";
    /// Legacy spelling of [`USER_ID`]
    pub const UID: &str = "uid";
    pub const RISK_LABEL_NAME: &str = "risk_label_name";
}

/// One parsed row: column name to raw cell value.
///
/// Columns the row did not supply are simply absent. Unknown columns are
/// kept so nothing from the file is lost.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from `(column, value)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Raw value of a column, empty strings included.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.fields.contains_key(column)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Value of a column, treating `""` like a missing cell.
    fn non_empty(&self, column: &str) -> Option<&str> {
        self.get(column).filter(|value| !value.is_empty())
    }

    pub fn room_id(&self) -> Option<&str> {
        self.get(columns::ROOM_ID)
    }

    pub fn url(&self) -> Option<&str> {
        self.non_empty(columns::URL)
    }

    pub fn content(&self) -> Option<&str> {
        self.non_empty(columns::CONTENT)
    }

    /// `create_time` with a missing cell read as `""`.
    pub fn create_time(&self) -> &str {
        self.get(columns::CREATE_TIME).unwrap_or("")
    }

    /// `user_id`, falling back to the legacy `uid` column when empty.
    pub fn user_id(&self) -> Option<&str> {
        self.non_empty(columns::USER_ID)
            .or_else(|| self.non_empty(columns::UID))
    }

    pub fn risk_label_name(&self) -> Option<&str> {
        self.non_empty(columns::RISK_LABEL_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_falls_back_to_uid() {
        let record = Record::from_pairs([("room_id", "r1"), ("uid", "legacy")]);
        assert_eq!(record.user_id(), Some("legacy"));

        let record = Record::from_pairs([("user_id", ""), ("uid", "legacy")]);
        assert_eq!(record.user_id(), Some("legacy"));

        let record = Record::from_pairs([("user_id", "u1"), ("uid", "legacy")]);
        assert_eq!(record.user_id(), Some("u1"));
    }

    #[test]
    fn test_empty_cells_read_as_missing() {
        let record = Record::from_pairs([("room_id", "r1"), ("url", ""), ("content", "")]);
        assert_eq!(record.url(), None);
        assert_eq!(record.content(), None);
        assert_eq!(record.create_time(), "");
        // room_id keeps the raw value so exact matching still works
        assert_eq!(record.room_id(), Some("r1"));
    }

    #[test]
    fn test_unknown_columns_are_preserved() {
        let record = Record::from_pairs([("room_id", "r1"), ("device", "ios")]);
        assert_eq!(record.get("device"), Some("ios"));
        assert_eq!(record.len(), 2);
        assert!(record.contains("device"));
    }
}
