//! Builder view-model: an explicit draft state plus reducer functions.
//!
//! The admin builder holds one [`FormDraft`] and mutates it through these
//! reducers; nothing touches the server until an explicit save performs the
//! full-replace update. Last save wins; there is no conflict detection.

use rand::distributions::Alphanumeric;
use rand::Rng;
use thiserror::Error;

use crate::models::field::{FieldDef, FieldPatch, FieldStyles, FieldType};
use crate::models::form::{FormSettings, SettingsPatch};

/// Reducer failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuilderError {
    #[error("Unknown field id: {0}")]
    UnknownField(String),

    #[error("Reorder must list every existing field id exactly once")]
    IncompleteOrder,
}

/// The builder's working state for one form.
#[derive(Debug, Clone, Default)]
pub struct FormDraft {
    pub title: String,
    pub fields: Vec<FieldDef>,
    pub settings: FormSettings,
}

impl FormDraft {
    /// Starts an empty draft for a newly created form.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            fields: Vec::new(),
            settings: FormSettings::default(),
        }
    }

    /// Resumes a draft from a previously saved form.
    pub fn from_saved(title: impl Into<String>, fields: Vec<FieldDef>, settings: FormSettings) -> Self {
        Self {
            title: title.into(),
            fields,
            settings,
        }
    }

    /// Appends a new field of the given type with a generated id and the
    /// type-specific default label.
    pub fn add_field(&mut self, field_type: FieldType) -> &FieldDef {
        let field = FieldDef {
            id: generate_field_id(),
            field_type,
            label: default_label(field_type).to_string(),
            placeholder: Some(String::new()),
            required: false,
            options: None,
            validation: None,
            styles: Some(FieldStyles {
                width: Some("100%".to_string()),
                label_color: None,
                border_color: None,
            }),
        };
        self.fields.push(field);
        self.fields.last().expect("field was just pushed")
    }

    /// Shallow-merges partial attributes into one field by id.
    ///
    /// Returns false when no field with that id exists.
    pub fn update_field(&mut self, id: &str, patch: FieldPatch) -> bool {
        match self.fields.iter_mut().find(|f| f.id == id) {
            Some(field) => {
                patch.apply_to(field);
                true
            }
            None => false,
        }
    }

    /// Removes a field by id. Returns false when no field matched.
    pub fn remove_field(&mut self, id: &str) -> bool {
        let before = self.fields.len();
        self.fields.retain(|f| f.id != id);
        self.fields.len() != before
    }

    /// Applies a new field order given as the complete list of field ids.
    ///
    /// The order is accepted only when it is set-equal to the existing
    /// field ids; an unknown, missing, or duplicated id rejects the whole
    /// command and leaves the draft unchanged.
    pub fn reorder_fields(&mut self, ordered_ids: &[String]) -> Result<(), BuilderError> {
        let existing: Vec<String> = self.fields.iter().map(|f| f.id.clone()).collect();
        validate_order(ordered_ids, &existing)?;

        self.fields.sort_by_key(|f| {
            ordered_ids
                .iter()
                .position(|id| *id == f.id)
                .expect("order was validated against field ids")
        });
        Ok(())
    }

    /// Shallow-merges a settings patch.
    pub fn patch_settings(&mut self, patch: SettingsPatch) {
        patch.apply_to(&mut self.settings);
    }
}

/// Checks that `ordered_ids` is exactly the set of existing field ids.
pub fn validate_order(ordered_ids: &[String], existing_ids: &[String]) -> Result<(), BuilderError> {
    if ordered_ids.len() != existing_ids.len() {
        return Err(BuilderError::IncompleteOrder);
    }
    for id in ordered_ids {
        if !existing_ids.contains(id) {
            return Err(BuilderError::UnknownField(id.clone()));
        }
    }
    // Same length and every id known; a duplicate would shadow a missing one
    let mut seen: Vec<&str> = Vec::with_capacity(ordered_ids.len());
    for id in ordered_ids {
        if seen.contains(&id.as_str()) {
            return Err(BuilderError::IncompleteOrder);
        }
        seen.push(id);
    }
    Ok(())
}

/// Generates an opaque client-side field id.
fn generate_field_id() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(10)
        .map(|c| char::from(c).to_ascii_lowercase())
        .collect();
    format!("field-{suffix}")
}

/// The default label shown for a freshly added field.
fn default_label(field_type: FieldType) -> &'static str {
    match field_type {
        FieldType::Text => "Text field",
        FieldType::Email => "Email",
        FieldType::Textarea => "Multi-line text",
        FieldType::Select => "Dropdown",
        FieldType::Radio => "Radio buttons",
        FieldType::Checkbox => "Checkboxes",
        FieldType::Number => "Number",
        FieldType::Date => "Date",
        FieldType::File => "File upload",
    }
}
