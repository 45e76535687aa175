//! Form entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domain::models::form::{Form, FormSettings, FormSummary};

/// Database row mapping for the forms table.
#[derive(Debug, Clone, FromRow)]
pub struct FormEntity {
    pub id: i64,
    pub title: String,
    pub settings: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl FormEntity {
    /// Parses the settings blob, synthesizing defaults when the column is
    /// NULL or does not deserialize.
    pub fn parsed_settings(&self) -> FormSettings {
        self.settings
            .clone()
            .and_then(|value| serde_json::from_value(value).ok())
            .unwrap_or_default()
    }
}

impl From<FormEntity> for Form {
    fn from(entity: FormEntity) -> Self {
        let settings = entity.parsed_settings();
        Self {
            id: entity.id,
            title: entity.title,
            settings,
            created_at: entity.created_at,
        }
    }
}

/// Row mapping for the form listing (no settings column).
#[derive(Debug, Clone, FromRow)]
pub struct FormSummaryEntity {
    pub id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

impl From<FormSummaryEntity> for FormSummary {
    fn from(entity: FormSummaryEntity) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            created_at: entity.created_at,
        }
    }
}
