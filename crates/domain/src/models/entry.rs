//! Entry domain model and submission wire contracts.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One submitted value: a scalar string, or an ordered list for
/// multi-value (checkbox) fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryValue {
    Single(String),
    Many(Vec<String>),
}

impl EntryValue {
    /// True when the value carries no usable content.
    pub fn is_empty(&self) -> bool {
        match self {
            EntryValue::Single(s) => s.trim().is_empty(),
            EntryValue::Many(list) => list.is_empty(),
        }
    }

    /// The scalar content, if this is a scalar.
    pub fn as_single(&self) -> Option<&str> {
        match self {
            EntryValue::Single(s) => Some(s),
            EntryValue::Many(_) => None,
        }
    }

    /// Flattens the value into one display string, joining lists with `sep`.
    pub fn join(&self, sep: &str) -> String {
        match self {
            EntryValue::Single(s) => s.clone(),
            EntryValue::Many(list) => list.join(sep),
        }
    }
}

/// The submitted data map: field-derived name to value.
pub type EntryData = BTreeMap<String, EntryValue>;

/// One completed submission.
#[derive(Debug, Clone, Serialize)]
pub struct Entry {
    pub id: i64,
    pub form_id: i64,
    pub data: EntryData,
    pub created_at: DateTime<Utc>,
}

/// Request payload for the public submission endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitEntryRequest {
    pub form_id: i64,
    #[serde(default)]
    pub data: EntryData,
}

/// Response for a successful submission.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitEntryResponse {
    pub success: bool,
    pub entry_id: i64,
    pub message: String,
}

/// One entry as returned to the admin UI.
#[derive(Debug, Clone, Serialize)]
pub struct EntryResponse {
    pub id: i64,
    pub form_id: i64,
    pub entry_data: EntryData,
    pub created_at: DateTime<Utc>,
}

impl From<Entry> for EntryResponse {
    fn from(entry: Entry) -> Self {
        Self {
            id: entry.id,
            form_id: entry.form_id,
            entry_data: entry.data,
            created_at: entry.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_value_untagged_deserialization() {
        let single: EntryValue = serde_json::from_str("\"Ali\"").unwrap();
        assert_eq!(single, EntryValue::Single("Ali".into()));

        let many: EntryValue = serde_json::from_str(r#"["a","b"]"#).unwrap();
        assert_eq!(many, EntryValue::Many(vec!["a".into(), "b".into()]));
    }

    #[test]
    fn test_entry_value_is_empty() {
        assert!(EntryValue::Single("".into()).is_empty());
        assert!(EntryValue::Single("   ".into()).is_empty());
        assert!(!EntryValue::Single("x".into()).is_empty());
        assert!(EntryValue::Many(vec![]).is_empty());
        assert!(!EntryValue::Many(vec!["x".into()]).is_empty());
    }

    #[test]
    fn test_entry_value_join() {
        let many = EntryValue::Many(vec!["red".into(), "blue".into()]);
        assert_eq!(many.join("; "), "red; blue");
        assert_eq!(EntryValue::Single("x".into()).join("; "), "x");
    }

    #[test]
    fn test_submit_request_deserialization() {
        let json = r#"{"form_id": 4, "data": {"name": "Ali", "colors": ["red", "blue"]}}"#;
        let req: SubmitEntryRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.form_id, 4);
        assert_eq!(req.data.get("name"), Some(&EntryValue::Single("Ali".into())));
        assert_eq!(
            req.data.get("colors"),
            Some(&EntryValue::Many(vec!["red".into(), "blue".into()]))
        );
    }

    #[test]
    fn test_submit_request_missing_data_defaults_empty() {
        let req: SubmitEntryRequest = serde_json::from_str(r#"{"form_id": 1}"#).unwrap();
        assert!(req.data.is_empty());
    }

    #[test]
    fn test_entry_response_shape() {
        let entry = Entry {
            id: 11,
            form_id: 4,
            data: BTreeMap::from([("name".to_string(), EntryValue::Single("Ali".into()))]),
            created_at: Utc::now(),
        };
        let response: EntryResponse = entry.into();
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["entry_data"]["name"], "Ali");
        assert_eq!(json["form_id"], 4);
    }
}
