//! Server-side submission processing: schema validation and sanitization.
//!
//! Validation runs against the form's declared fields before anything is
//! stored; sanitization reduces every key and value to plain text. Both run
//! on every submission path regardless of client-side validation.

use shared::sanitize;

use crate::models::entry::{EntryData, EntryValue};
use crate::models::field::{FieldDef, FieldType};
use crate::services::render::field_name;

/// Validates submitted data against the declared field schema.
///
/// A field's value is looked up under its derived submission name first and
/// its bare id second, so both the rendered-HTML path and direct API clients
/// satisfy the same constraints. Returns every violation, not just the first.
pub fn validate_submission(fields: &[FieldDef], data: &EntryData) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for field in fields {
        let value = data
            .get(&field_name(&field.id))
            .or_else(|| data.get(&field.id));

        if field.required && value.map_or(true, EntryValue::is_empty) {
            errors.push(format!("'{}' is required", field.label));
            continue;
        }

        if field.field_type == FieldType::Number {
            if let Some(value) = value {
                if !value.is_empty() {
                    check_number(field, value, &mut errors);
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_number(field: &FieldDef, value: &EntryValue, errors: &mut Vec<String>) {
    let raw = match value.as_single() {
        Some(raw) => raw,
        None => {
            errors.push(format!("'{}' must be a number", field.label));
            return;
        }
    };

    let number: f64 = match raw.trim().parse() {
        Ok(n) => n,
        Err(_) => {
            errors.push(format!("'{}' must be a number", field.label));
            return;
        }
    };

    if let Some(validation) = &field.validation {
        if let Some(min) = validation.min {
            if number < min {
                errors.push(format!("'{}' must be at least {}", field.label, min));
            }
        }
        if let Some(max) = validation.max {
            if number > max {
                errors.push(format!("'{}' must be at most {}", field.label, max));
            }
        }
    }
}

/// Sanitizes every key and value of submitted data to plain text.
///
/// Keys collapse to single-line text; scalar values keep newlines (textarea
/// content), list elements collapse to single-line text. Keys that sanitize
/// to nothing are dropped.
pub fn sanitize_entry_data(data: &EntryData) -> EntryData {
    let mut clean = EntryData::new();
    for (key, value) in data {
        let key = sanitize::text_field(key);
        if key.is_empty() {
            continue;
        }
        let value = match value {
            EntryValue::Single(s) => EntryValue::Single(sanitize::textarea_field(s)),
            EntryValue::Many(list) => {
                EntryValue::Many(list.iter().map(|s| sanitize::text_field(s)).collect())
            }
        };
        clean.insert(key, value);
    }
    clean
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::field::FieldValidation;
    use std::collections::BTreeMap;

    fn field(id: &str, field_type: FieldType, required: bool) -> FieldDef {
        FieldDef {
            id: id.to_string(),
            field_type,
            label: id.to_string(),
            placeholder: None,
            required,
            options: None,
            validation: None,
            styles: None,
        }
    }

    fn data(entries: &[(&str, EntryValue)]) -> EntryData {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect::<BTreeMap<_, _>>()
    }

    #[test]
    fn test_required_field_missing() {
        let fields = vec![field("name", FieldType::Text, true)];
        let err = validate_submission(&fields, &data(&[])).unwrap_err();
        assert_eq!(err, vec!["'name' is required"]);
    }

    #[test]
    fn test_required_field_blank() {
        let fields = vec![field("name", FieldType::Text, true)];
        let err = validate_submission(
            &fields,
            &data(&[("name", EntryValue::Single("   ".into()))]),
        )
        .unwrap_err();
        assert_eq!(err.len(), 1);
    }

    #[test]
    fn test_required_accepts_bare_id_or_derived_name() {
        let fields = vec![field("name", FieldType::Text, true)];
        assert!(validate_submission(
            &fields,
            &data(&[("name", EntryValue::Single("Ali".into()))])
        )
        .is_ok());
        assert!(validate_submission(
            &fields,
            &data(&[("fs_field_name", EntryValue::Single("Ali".into()))])
        )
        .is_ok());
    }

    #[test]
    fn test_required_checkbox_empty_list_fails() {
        let fields = vec![field("choices", FieldType::Checkbox, true)];
        assert!(validate_submission(
            &fields,
            &data(&[("choices", EntryValue::Many(vec![]))])
        )
        .is_err());
    }

    #[test]
    fn test_number_bounds() {
        let mut f = field("age", FieldType::Number, false);
        f.validation = Some(FieldValidation {
            min: Some(18.0),
            max: Some(99.0),
            pattern: None,
        });
        let fields = vec![f];

        assert!(validate_submission(
            &fields,
            &data(&[("age", EntryValue::Single("42".into()))])
        )
        .is_ok());

        let err = validate_submission(
            &fields,
            &data(&[("age", EntryValue::Single("12".into()))]),
        )
        .unwrap_err();
        assert_eq!(err, vec!["'age' must be at least 18"]);

        let err = validate_submission(
            &fields,
            &data(&[("age", EntryValue::Single("120".into()))]),
        )
        .unwrap_err();
        assert_eq!(err, vec!["'age' must be at most 99"]);
    }

    #[test]
    fn test_number_not_parseable() {
        let fields = vec![field("age", FieldType::Number, false)];
        let err = validate_submission(
            &fields,
            &data(&[("age", EntryValue::Single("abc".into()))]),
        )
        .unwrap_err();
        assert_eq!(err, vec!["'age' must be a number"]);
    }

    #[test]
    fn test_optional_empty_number_passes() {
        let fields = vec![field("age", FieldType::Number, false)];
        assert!(validate_submission(
            &fields,
            &data(&[("age", EntryValue::Single("".into()))])
        )
        .is_ok());
        assert!(validate_submission(&fields, &data(&[])).is_ok());
    }

    #[test]
    fn test_multiple_errors_collected() {
        let fields = vec![
            field("name", FieldType::Text, true),
            field("email", FieldType::Email, true),
        ];
        let err = validate_submission(&fields, &data(&[])).unwrap_err();
        assert_eq!(err.len(), 2);
    }

    #[test]
    fn test_sanitize_strips_markup_from_values() {
        let dirty = data(&[(
            "comment",
            EntryValue::Single("<script>alert(1)</script>hello".into()),
        )]);
        let clean = sanitize_entry_data(&dirty);
        assert_eq!(
            clean.get("comment"),
            Some(&EntryValue::Single("alert(1)hello".into()))
        );
    }

    #[test]
    fn test_sanitize_preserves_newlines_in_scalars() {
        let dirty = data(&[("msg", EntryValue::Single("line one\nline two".into()))]);
        let clean = sanitize_entry_data(&dirty);
        assert_eq!(
            clean.get("msg"),
            Some(&EntryValue::Single("line one\nline two".into()))
        );
    }

    #[test]
    fn test_sanitize_cleans_keys_and_list_elements() {
        let dirty = data(&[(
            "<b>choices</b>",
            EntryValue::Many(vec!["<i>A</i>".into(), "B".into()]),
        )]);
        let clean = sanitize_entry_data(&dirty);
        assert_eq!(
            clean.get("choices"),
            Some(&EntryValue::Many(vec!["A".into(), "B".into()]))
        );
    }

    #[test]
    fn test_sanitize_drops_empty_keys() {
        let dirty = data(&[("<>", EntryValue::Single("x".into()))]);
        assert!(sanitize_entry_data(&dirty).is_empty());
    }
}
