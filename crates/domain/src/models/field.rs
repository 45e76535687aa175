//! Field definition model.
//!
//! A field's full definition is client-authored and round-trips through the
//! server untouched: it is persisted both as structured columns (type, key,
//! position) and as the serialized definition blob.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// The closed set of supported field types.
///
/// Any other value is rejected at deserialization time; the renderer only
/// knows these eight templates (date shares the text-like template).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Email,
    Textarea,
    Select,
    Radio,
    Checkbox,
    Number,
    Date,
    File,
}

impl FieldType {
    /// Converts to the database/wire string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Email => "email",
            FieldType::Textarea => "textarea",
            FieldType::Select => "select",
            FieldType::Radio => "radio",
            FieldType::Checkbox => "checkbox",
            FieldType::Number => "number",
            FieldType::Date => "date",
            FieldType::File => "file",
        }
    }

    /// Parses from the database string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "text" => Some(FieldType::Text),
            "email" => Some(FieldType::Email),
            "textarea" => Some(FieldType::Textarea),
            "select" => Some(FieldType::Select),
            "radio" => Some(FieldType::Radio),
            "checkbox" => Some(FieldType::Checkbox),
            "number" => Some(FieldType::Number),
            "date" => Some(FieldType::Date),
            "file" => Some(FieldType::File),
            _ => None,
        }
    }

    /// True for types rendered with the plain `<input>` template.
    pub fn is_text_input(&self) -> bool {
        matches!(
            self,
            FieldType::Text | FieldType::Email | FieldType::Number | FieldType::Date
        )
    }

    /// True for types whose option list is meaningful.
    pub fn has_options(&self) -> bool {
        matches!(
            self,
            FieldType::Select | FieldType::Radio | FieldType::Checkbox
        )
    }

    /// True for fields that submit a list of values rather than a scalar.
    pub fn is_multi_value(&self) -> bool {
        matches!(self, FieldType::Checkbox)
    }
}

/// Numeric bounds and an optional pattern, applicable to `number` fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldValidation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

/// Presentation styles for a field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FieldStyles {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "shared::validation::validate_css_width"))]
    pub width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "shared::validation::validate_hex_color"))]
    pub label_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "shared::validation::validate_hex_color"))]
    pub border_color: Option<String>,
}

/// One input definition within a form, exactly as the builder authored it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct FieldDef {
    #[validate(custom(function = "shared::validation::validate_field_id"))]
    pub id: String,

    #[serde(rename = "type")]
    pub field_type: FieldType,

    #[validate(length(max = 500, message = "Label must be at most 500 characters"))]
    pub label: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    #[serde(default)]
    pub required: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<FieldValidation>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub styles: Option<FieldStyles>,
}

impl FieldDef {
    /// The option list, or empty when none was authored.
    pub fn options(&self) -> &[String] {
        self.options.as_deref().unwrap_or(&[])
    }
}

/// Partial field attributes for the builder's shallow-merge update.
///
/// `None` means "leave unchanged"; sub-records replace wholesale.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FieldPatch {
    #[serde(rename = "type")]
    pub field_type: Option<FieldType>,
    pub label: Option<String>,
    pub placeholder: Option<String>,
    pub required: Option<bool>,
    pub options: Option<Vec<String>>,
    pub validation: Option<FieldValidation>,
    pub styles: Option<FieldStyles>,
}

impl FieldPatch {
    /// Shallow-merges this patch into a field definition.
    pub fn apply_to(self, field: &mut FieldDef) {
        if let Some(ty) = self.field_type {
            field.field_type = ty;
        }
        if let Some(label) = self.label {
            field.label = label;
        }
        if let Some(placeholder) = self.placeholder {
            field.placeholder = Some(placeholder);
        }
        if let Some(required) = self.required {
            field.required = required;
        }
        if let Some(options) = self.options {
            field.options = Some(options);
        }
        if let Some(validation) = self.validation {
            field.validation = Some(validation);
        }
        if let Some(styles) = self.styles {
            field.styles = Some(styles);
        }
    }
}
