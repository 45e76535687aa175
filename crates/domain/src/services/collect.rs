//! Submission collector for the rendered-HTML path.
//!
//! Folds the raw name/value pairs of a posted form into the canonical entry
//! data map, applying the same naming rules the renderer used: the array
//! marker is stripped from checkbox names and their values accumulate into a
//! list, every other name takes its last scalar value, and the anti-forgery
//! token field is excluded. A declared checkbox field with nothing checked
//! yields an empty list, never an absent key.

use crate::models::entry::{EntryData, EntryValue};
use crate::models::field::FieldDef;
use crate::services::render::{field_name, ARRAY_SUFFIX, TOKEN_FIELD};

/// Collects posted pairs into entry data, guided by the declared fields.
pub fn collect(fields: &[FieldDef], pairs: &[(String, String)]) -> EntryData {
    let mut data = EntryData::new();

    // Browsers omit unchecked checkboxes entirely; seed every declared
    // multi-value field so the stored entry still carries the key.
    for field in fields {
        if field.field_type.is_multi_value() {
            data.insert(field_name(&field.id), EntryValue::Many(Vec::new()));
        }
    }

    for (name, value) in pairs {
        if name == TOKEN_FIELD {
            continue;
        }
        if let Some(base) = name.strip_suffix(ARRAY_SUFFIX) {
            let slot = data
                .entry(base.to_string())
                .or_insert_with(|| EntryValue::Many(Vec::new()));
            match slot {
                EntryValue::Many(list) => list.push(value.clone()),
                other => *other = EntryValue::Many(vec![value.clone()]),
            }
        } else {
            data.insert(name.clone(), EntryValue::Single(value.clone()));
        }
    }

    data
}
