//! Form export/import document model.
//!
//! Entries are intentionally excluded from export documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::field::FieldDef;
use super::form::{FormResponse, FormSettings};

/// Version stamp written into export documents.
pub const EXPORT_FORMAT_VERSION: &str = "1.0.0";

/// Suffix appended to imported form titles.
pub const IMPORTED_TITLE_SUFFIX: &str = " (Imported)";

/// The export file format: `{version, date, forms}`.
#[derive(Debug, Clone, Serialize)]
pub struct ExportDocument {
    pub version: String,
    pub date: DateTime<Utc>,
    pub forms: Vec<FormResponse>,
}

impl ExportDocument {
    pub fn new(forms: Vec<FormResponse>) -> Self {
        Self {
            version: EXPORT_FORMAT_VERSION.to_string(),
            date: Utc::now(),
            forms,
        }
    }
}

/// One field inside an import payload: either a bare definition, or a
/// stored field row from an export document (definition under `field_meta`).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ImportField {
    Def(FieldDef),
    Row { field_meta: FieldDef },
}

impl ImportField {
    pub fn into_def(self) -> FieldDef {
        match self {
            ImportField::Def(def) => def,
            ImportField::Row { field_meta } => field_meta,
        }
    }
}

/// One form inside an import payload.
///
/// The shape is lenient enough to accept a previously exported document:
/// unknown keys (ids, timestamps) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportForm {
    pub title: String,
    #[serde(default)]
    pub fields: Vec<ImportField>,
    #[serde(default)]
    pub settings: FormSettings,
}

impl ImportForm {
    /// The full field definitions, whichever shape they arrived in.
    pub fn field_defs(self) -> (String, Vec<FieldDef>, FormSettings) {
        (
            self.title,
            self.fields.into_iter().map(ImportField::into_def).collect(),
            self.settings,
        )
    }
}

/// An import payload: any document carrying a `forms` array.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportDocument {
    pub forms: Vec<ImportForm>,
}

/// Import outcome.
#[derive(Debug, Clone, Serialize)]
pub struct ImportSummary {
    pub imported: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_document_version() {
        let doc = ExportDocument::new(vec![]);
        assert_eq!(doc.version, "1.0.0");
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json["forms"].as_array().unwrap().is_empty());
        assert!(json.get("entries").is_none());
    }

    #[test]
    fn test_import_document_accepts_bare_definitions() {
        let json = r#"{
            "forms": [
                {
                    "title": "Contact",
                    "settings": {"submitButtonText": "Send", "successMessage": "ok"},
                    "fields": [
                        {"id": "name", "type": "text", "label": "Name", "required": true}
                    ]
                }
            ]
        }"#;
        let doc: ImportDocument = serde_json::from_str(json).unwrap();
        let (title, fields, settings) = doc.forms.into_iter().next().unwrap().field_defs();
        assert_eq!(title, "Contact");
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].id, "name");
        assert_eq!(settings.submit_button_text, "Send");
    }

    #[test]
    fn test_import_document_accepts_export_shape() {
        let json = r#"{
            "version": "1.0.0",
            "date": "2026-01-05T10:00:00Z",
            "forms": [
                {
                    "id": 9,
                    "title": "Contact",
                    "created_at": "2026-01-01T00:00:00Z",
                    "settings": {"submitButtonText": "Send", "successMessage": "ok"},
                    "fields": [
                        {
                            "id": 31,
                            "form_id": 9,
                            "field_key": "name",
                            "field_type": "text",
                            "field_meta": {"id": "name", "type": "text", "label": "Name"},
                            "position": 0
                        }
                    ]
                }
            ]
        }"#;
        let doc: ImportDocument = serde_json::from_str(json).unwrap();
        let (_, fields, _) = doc.forms.into_iter().next().unwrap().field_defs();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].label, "Name");
    }

    #[test]
    fn test_import_form_defaults() {
        let form: ImportForm = serde_json::from_str(r#"{"title": "Bare"}"#).unwrap();
        assert!(form.fields.is_empty());
        assert_eq!(form.settings.submit_button_text, "Submit");
    }
}
