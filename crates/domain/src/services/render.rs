//! Server-side form renderer.
//!
//! A pure function from (form id, anti-forgery token, settings, ordered
//! fields) to an HTML fragment. The emitted input names are derived
//! deterministically from field ids so that the collector and the storage
//! layer agree on entry data keys. All user-authored text passes through
//! `shared::escape` before it reaches the markup.

use shared::escape::{html_attr, html_text};
use shared::sanitize;

use crate::models::field::{FieldDef, FieldType};
use crate::models::form::FormSettings;

/// Name of the hidden anti-forgery token input. The collector excludes it.
pub const TOKEN_FIELD: &str = "fs_token";

/// Prefix for all field input names.
pub const FIELD_NAME_PREFIX: &str = "fs_field_";

/// Suffix marking an array-valued (checkbox group) input name.
pub const ARRAY_SUFFIX: &str = "[]";

const DEFAULT_WIDTH: &str = "100%";
const DEFAULT_LABEL_COLOR: &str = "#374151";
const DEFAULT_BORDER_COLOR: &str = "#D1D5DB";

/// Derives the submission key for a field id.
///
/// This is the single source of truth for the renderer/collector/storage
/// naming contract.
pub fn field_name(field_id: &str) -> String {
    format!("{FIELD_NAME_PREFIX}{}", sanitize::key(field_id))
}

/// The wire name of a checkbox group input (array marker appended).
pub fn group_name(field_id: &str) -> String {
    format!("{}{}", field_name(field_id), ARRAY_SUFFIX)
}

/// Renders the full embeddable form fragment.
pub fn render_form(
    form_id: i64,
    token: &str,
    settings: &FormSettings,
    fields: &[FieldDef],
) -> String {
    let mut html = String::with_capacity(1024 + fields.len() * 512);

    html.push_str(&format!(
        "<div class=\"formsmith-wrapper\" id=\"formsmith-{form_id}\">\n"
    ));
    html.push_str(&format!(
        "<form class=\"fs-form\" data-form-id=\"{form_id}\" method=\"post\" action=\"/embed/{form_id}\">\n"
    ));
    html.push_str(&format!(
        "<input type=\"hidden\" name=\"{TOKEN_FIELD}\" value=\"{}\" />\n",
        html_attr(token)
    ));

    html.push_str("<div class=\"fs-fields\">\n");
    for field in fields {
        render_field(&mut html, field);
    }
    html.push_str("</div>\n");

    html.push_str("<div class=\"fs-submit-wrapper\">\n");
    html.push_str(&format!(
        "<button type=\"submit\" class=\"fs-submit-btn\">{}</button>\n",
        html_text(&settings.submit_button_text)
    ));
    html.push_str("<span class=\"fs-loading\" style=\"display:none\">Sending...</span>\n");
    html.push_str("</div>\n");

    html.push_str("<div class=\"fs-message\" style=\"display:none\"></div>\n");
    html.push_str("</form>\n</div>\n");
    html
}

fn render_field(html: &mut String, field: &FieldDef) {
    let styles = field.styles.as_ref();
    let width = styles
        .and_then(|s| s.width.as_deref())
        .unwrap_or(DEFAULT_WIDTH);
    let label_color = styles
        .and_then(|s| s.label_color.as_deref())
        .unwrap_or(DEFAULT_LABEL_COLOR);
    let border_color = styles
        .and_then(|s| s.border_color.as_deref())
        .unwrap_or(DEFAULT_BORDER_COLOR);

    html.push_str(&format!(
        "<div class=\"fs-field-wrapper\" style=\"width: {}\">\n",
        html_attr(width)
    ));
    html.push_str(&format!(
        "<label class=\"fs-label\" style=\"color: {}\">{}",
        html_attr(label_color),
        html_text(&field.label)
    ));
    if field.required {
        html.push_str("<span class=\"fs-required\">*</span>");
    }
    html.push_str("</label>\n");

    match field.field_type {
        FieldType::Text | FieldType::Email | FieldType::Number | FieldType::Date => {
            render_input(html, field, border_color)
        }
        FieldType::Textarea => render_textarea(html, field, border_color),
        FieldType::Select => render_select(html, field, border_color),
        FieldType::Radio => render_radio(html, field),
        FieldType::Checkbox => render_checkbox(html, field),
        FieldType::File => render_file(html, field, border_color),
    }

    html.push_str("</div>\n");
}

fn render_input(html: &mut String, field: &FieldDef, border_color: &str) {
    let placeholder = field.placeholder.as_deref().unwrap_or("");
    html.push_str(&format!(
        "<input type=\"{}\" name=\"{}\" class=\"fs-input\" placeholder=\"{}\" style=\"border-color: {}\"",
        field.field_type.as_str(),
        field_name(&field.id),
        html_attr(placeholder),
        html_attr(border_color)
    ));
    if field.required {
        html.push_str(" required");
    }
    if let Some(validation) = &field.validation {
        if let Some(min) = validation.min {
            html.push_str(&format!(" min=\"{}\"", num_attr(min)));
        }
        if let Some(max) = validation.max {
            html.push_str(&format!(" max=\"{}\"", num_attr(max)));
        }
    }
    html.push_str(" />\n");
}

fn render_textarea(html: &mut String, field: &FieldDef, border_color: &str) {
    let placeholder = field.placeholder.as_deref().unwrap_or("");
    html.push_str(&format!(
        "<textarea name=\"{}\" class=\"fs-textarea\" placeholder=\"{}\" style=\"border-color: {}\" rows=\"4\"",
        field_name(&field.id),
        html_attr(placeholder),
        html_attr(border_color)
    ));
    if field.required {
        html.push_str(" required");
    }
    html.push_str("></textarea>\n");
}

fn render_select(html: &mut String, field: &FieldDef, border_color: &str) {
    html.push_str(&format!(
        "<select name=\"{}\" class=\"fs-select\" style=\"border-color: {}\"",
        field_name(&field.id),
        html_attr(border_color)
    ));
    if field.required {
        html.push_str(" required");
    }
    html.push_str(">\n<option value=\"\">Choose...</option>\n");
    for option in field.options() {
        html.push_str(&format!(
            "<option value=\"{}\">{}</option>\n",
            html_attr(option),
            html_text(option)
        ));
    }
    html.push_str("</select>\n");
}

fn render_radio(html: &mut String, field: &FieldDef) {
    html.push_str("<div class=\"fs-radio-group\">\n");
    for (index, option) in field.options().iter().enumerate() {
        html.push_str(&format!(
            "<label class=\"fs-radio-label\"><input type=\"radio\" name=\"{}\" value=\"{}\" class=\"fs-radio\"",
            field_name(&field.id),
            html_attr(option)
        ));
        // required on the first input is enough for the whole group
        if field.required && index == 0 {
            html.push_str(" required");
        }
        html.push_str(&format!(" /><span>{}</span></label>\n", html_text(option)));
    }
    html.push_str("</div>\n");
}

fn render_checkbox(html: &mut String, field: &FieldDef) {
    html.push_str("<div class=\"fs-checkbox-group\">\n");
    for option in field.options() {
        html.push_str(&format!(
            "<label class=\"fs-checkbox-label\"><input type=\"checkbox\" name=\"{}\" value=\"{}\" class=\"fs-checkbox\" /><span>{}</span></label>\n",
            group_name(&field.id),
            html_attr(option),
            html_text(option)
        ));
    }
    html.push_str("</div>\n");
}

fn render_file(html: &mut String, field: &FieldDef, border_color: &str) {
    html.push_str(&format!(
        "<input type=\"file\" name=\"{}\" class=\"fs-file\" style=\"border-color: {}\"",
        field_name(&field.id),
        html_attr(border_color)
    ));
    if field.required {
        html.push_str(" required");
    }
    html.push_str(" />\n");
}

/// Formats a numeric bound without a trailing `.0` for whole numbers.
fn num_attr(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
