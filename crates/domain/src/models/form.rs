//! Form domain model and wire contracts.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::field::{FieldDef, FieldType};

/// Submission-behavior settings attached to a form.
///
/// Settings always resolve to a complete record at read time: when a form
/// was saved without settings, defaults are synthesized rather than null.
/// Unknown boolean keys are carried through as feature flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSettings {
    #[serde(default = "default_submit_button_text")]
    pub submit_button_text: String,

    #[serde(default = "default_success_message")]
    pub success_message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,

    #[serde(flatten)]
    pub flags: BTreeMap<String, bool>,
}

fn default_submit_button_text() -> String {
    "Submit".to_string()
}

fn default_success_message() -> String {
    "Form submitted successfully".to_string()
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            submit_button_text: default_submit_button_text(),
            success_message: default_success_message(),
            redirect_url: None,
            flags: BTreeMap::new(),
        }
    }
}

/// Partial settings for the builder's shallow-merge patch.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    pub submit_button_text: Option<String>,
    pub success_message: Option<String>,
    pub redirect_url: Option<String>,
    #[serde(flatten)]
    pub flags: BTreeMap<String, bool>,
}

impl SettingsPatch {
    /// Shallow-merges this patch into existing settings.
    pub fn apply_to(self, settings: &mut FormSettings) {
        if let Some(text) = self.submit_button_text {
            settings.submit_button_text = text;
        }
        if let Some(message) = self.success_message {
            settings.success_message = message;
        }
        if let Some(url) = self.redirect_url {
            settings.redirect_url = Some(url);
        }
        settings.flags.extend(self.flags);
    }
}

/// A form as read from storage, with settings already parsed.
#[derive(Debug, Clone, Serialize)]
pub struct Form {
    pub id: i64,
    pub title: String,
    pub settings: FormSettings,
    pub created_at: DateTime<Utc>,
}

/// One persisted field row: the structured columns plus the full definition.
#[derive(Debug, Clone, Serialize)]
pub struct StoredField {
    pub id: i64,
    pub form_id: i64,
    pub field_key: String,
    pub field_type: FieldType,
    pub field_meta: FieldDef,
    pub position: i32,
}

/// Request payload for creating a form.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateFormRequest {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
}

/// Response for a successful form creation.
#[derive(Debug, Clone, Serialize)]
pub struct CreatedFormResponse {
    pub id: i64,
}

/// Request payload for the full-replace form update.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateFormRequest {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,

    #[serde(default)]
    #[validate(nested)]
    pub fields: Vec<FieldDef>,

    #[serde(default)]
    pub settings: FormSettings,
}

/// Request payload for the explicit field reorder command.
#[derive(Debug, Clone, Deserialize)]
pub struct ReorderFieldsRequest {
    pub field_ids: Vec<String>,
}

/// Generic acknowledgement for mutations.
#[derive(Debug, Clone, Serialize)]
pub struct AckResponse {
    pub success: bool,
    pub id: i64,
}

/// One row of the form listing.
#[derive(Debug, Clone, Serialize)]
pub struct FormSummary {
    pub id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// Full form payload: the form row plus its fields ordered by position.
#[derive(Debug, Clone, Serialize)]
pub struct FormResponse {
    pub id: i64,
    pub title: String,
    pub settings: FormSettings,
    pub created_at: DateTime<Utc>,
    pub fields: Vec<StoredField>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings = FormSettings::default();
        assert_eq!(settings.submit_button_text, "Submit");
        assert_eq!(settings.success_message, "Form submitted successfully");
        assert!(settings.redirect_url.is_none());
        assert!(settings.flags.is_empty());
    }

    #[test]
    fn test_settings_camel_case_wire_format() {
        let json = r#"{
            "submitButtonText": "Send",
            "successMessage": "Thanks!",
            "redirectUrl": "https://example.com/thanks"
        }"#;
        let settings: FormSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.submit_button_text, "Send");
        assert_eq!(settings.redirect_url.as_deref(), Some("https://example.com/thanks"));

        let out = serde_json::to_string(&settings).unwrap();
        assert!(out.contains("\"submitButtonText\":\"Send\""));
        assert!(out.contains("\"successMessage\":\"Thanks!\""));
    }

    #[test]
    fn test_settings_partial_payload_synthesizes_defaults() {
        let settings: FormSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.submit_button_text, "Submit");
        assert_eq!(settings.success_message, "Form submitted successfully");
    }

    #[test]
    fn test_settings_boolean_flags_round_trip() {
        let json = r#"{"submitButtonText":"Go","successMessage":"ok","storeIp":true}"#;
        let settings: FormSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.flags.get("storeIp"), Some(&true));

        let out = serde_json::to_string(&settings).unwrap();
        assert!(out.contains("\"storeIp\":true"));
    }

    #[test]
    fn test_settings_patch_shallow_merge() {
        let mut settings = FormSettings {
            submit_button_text: "Send".into(),
            success_message: "Thanks".into(),
            redirect_url: Some("https://a.example".into()),
            flags: BTreeMap::new(),
        };

        let patch = SettingsPatch {
            success_message: Some("Received".into()),
            ..Default::default()
        };
        patch.apply_to(&mut settings);

        assert_eq!(settings.success_message, "Received");
        assert_eq!(settings.submit_button_text, "Send");
        assert_eq!(settings.redirect_url.as_deref(), Some("https://a.example"));
    }

    #[test]
    fn test_create_form_request_title_required() {
        use validator::Validate;

        let req = CreateFormRequest { title: "".into() };
        assert!(req.validate().is_err());

        let req = CreateFormRequest { title: "Contact".into() };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_update_form_request_defaults() {
        let req: UpdateFormRequest = serde_json::from_str(r#"{"title":"Contact"}"#).unwrap();
        assert!(req.fields.is_empty());
        assert_eq!(req.settings.submit_button_text, "Submit");
    }

    #[test]
    fn test_stored_field_serialization_shape() {
        let field = StoredField {
            id: 7,
            form_id: 3,
            field_key: "name".into(),
            field_type: FieldType::Text,
            field_meta: serde_json::from_str(
                r#"{"id":"name","type":"text","label":"Name","required":true}"#,
            )
            .unwrap(),
            position: 0,
        };
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["field_key"], "name");
        assert_eq!(json["field_type"], "text");
        assert_eq!(json["field_meta"]["label"], "Name");
        assert_eq!(json["position"], 0);
    }
}
