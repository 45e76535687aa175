//! Entry entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domain::models::entry::{Entry, EntryData};

/// Database row mapping for the entries table.
#[derive(Debug, Clone, FromRow)]
pub struct EntryEntity {
    pub id: i64,
    pub form_id: i64,
    pub entry_data: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl From<EntryEntity> for Entry {
    fn from(entity: EntryEntity) -> Self {
        let data = entity
            .entry_data
            .and_then(|value| serde_json::from_value::<EntryData>(value).ok())
            .unwrap_or_default();

        Self {
            id: entity.id,
            form_id: entity.form_id,
            data,
            created_at: entity.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::models::entry::EntryValue;

    #[test]
    fn test_entity_parses_scalar_and_list_values() {
        let entity = EntryEntity {
            id: 5,
            form_id: 2,
            entry_data: Some(serde_json::json!({
                "name": "Ali",
                "colors": ["red", "blue"]
            })),
            created_at: Utc::now(),
        };

        let entry: Entry = entity.into();
        assert_eq!(entry.data.get("name"), Some(&EntryValue::Single("Ali".into())));
        assert_eq!(
            entry.data.get("colors"),
            Some(&EntryValue::Many(vec!["red".into(), "blue".into()]))
        );
    }

    #[test]
    fn test_entity_null_data_yields_empty_map() {
        let entity = EntryEntity {
            id: 5,
            form_id: 2,
            entry_data: None,
            created_at: Utc::now(),
        };
        let entry: Entry = entity.into();
        assert!(entry.data.is_empty());
    }

    #[test]
    fn test_entity_non_object_data_yields_empty_map() {
        let entity = EntryEntity {
            id: 5,
            form_id: 2,
            entry_data: Some(serde_json::json!([1, 2, 3])),
            created_at: Utc::now(),
        };
        let entry: Entry = entity.into();
        assert!(entry.data.is_empty());
    }
}
