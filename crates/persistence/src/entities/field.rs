//! Field entity (database row mapping).

use sqlx::FromRow;

use domain::models::field::{FieldDef, FieldType};
use domain::models::form::StoredField;

/// Database row mapping for the fields table.
///
/// The full client-authored definition lives in `field_meta`; the other
/// columns exist for querying and ordering.
#[derive(Debug, Clone, FromRow)]
pub struct FieldEntity {
    pub id: i64,
    pub form_id: i64,
    pub field_key: String,
    pub field_type: String,
    pub field_meta: Option<serde_json::Value>,
    pub position: i32,
}

impl FieldEntity {
    /// Converts to the domain representation.
    ///
    /// When the meta blob is missing or corrupt, a minimal definition is
    /// reconstructed from the structured columns so the row still renders.
    pub fn into_stored(self) -> StoredField {
        let field_type = FieldType::parse(&self.field_type).unwrap_or(FieldType::Text);
        let field_meta = self
            .field_meta
            .and_then(|value| serde_json::from_value::<FieldDef>(value).ok())
            .unwrap_or_else(|| FieldDef {
                id: self.field_key.clone(),
                field_type,
                label: self.field_key.clone(),
                placeholder: None,
                required: false,
                options: None,
                validation: None,
                styles: None,
            });

        StoredField {
            id: self.id,
            form_id: self.form_id,
            field_key: self.field_key,
            field_type,
            field_meta,
            position: self.position,
        }
    }
}
