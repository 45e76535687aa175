//! CSV export of form entries.
//!
//! Layout matches the admin exporter: a UTF-8 byte-order mark for
//! spreadsheet compatibility, fixed identity columns followed by the union
//! of all observed data keys, list values joined with `"; "`, and every
//! cell quoted.

use crate::models::entry::Entry;

/// UTF-8 BOM prepended so spreadsheet software detects the encoding.
const BOM: char = '\u{feff}';

/// Separator for array-valued cells.
const LIST_SEPARATOR: &str = "; ";

/// Renders entries to a CSV document.
pub fn entries_csv(entries: &[Entry]) -> String {
    let mut columns: Vec<String> = Vec::new();
    for entry in entries {
        for key in entry.data.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }

    let mut csv = String::new();
    csv.push(BOM);

    let mut header: Vec<String> = vec!["id".to_string(), "created_at".to_string()];
    header.extend(columns.iter().cloned());
    push_row(&mut csv, &header);

    for entry in entries {
        let mut row: Vec<String> = vec![entry.id.to_string(), entry.created_at.to_rfc3339()];
        for column in &columns {
            row.push(
                entry
                    .data
                    .get(column)
                    .map(|v| v.join(LIST_SEPARATOR))
                    .unwrap_or_default(),
            );
        }
        push_row(&mut csv, &row);
    }

    csv
}

fn push_row(csv: &mut String, cells: &[String]) {
    let line: Vec<String> = cells.iter().map(|c| quote(c)).collect();
    csv.push_str(&line.join(","));
    csv.push('\n');
}

fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::entry::{EntryData, EntryValue};
    use chrono::{TimeZone, Utc};

    fn entry(id: i64, pairs: &[(&str, EntryValue)]) -> Entry {
        Entry {
            id,
            form_id: 1,
            data: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect::<EntryData>(),
            created_at: Utc.with_ymd_and_hms(2026, 1, 5, 10, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_csv_starts_with_bom() {
        let csv = entries_csv(&[]);
        assert!(csv.starts_with('\u{feff}'));
    }

    #[test]
    fn test_csv_header_union_of_keys() {
        let entries = vec![
            entry(1, &[("name", EntryValue::Single("Ali".into()))]),
            entry(2, &[("email", EntryValue::Single("a@b.com".into()))]),
        ];
        let csv = entries_csv(&entries);
        let header = csv.lines().next().unwrap();
        assert_eq!(header, "\u{feff}\"id\",\"created_at\",\"name\",\"email\"");
    }

    #[test]
    fn test_csv_missing_cell_empty() {
        let entries = vec![
            entry(1, &[("name", EntryValue::Single("Ali".into()))]),
            entry(2, &[("email", EntryValue::Single("a@b.com".into()))]),
        ];
        let csv = entries_csv(&entries);
        let second_row = csv.lines().nth(2).unwrap();
        assert!(second_row.ends_with("\"\",\"a@b.com\""));
    }

    #[test]
    fn test_csv_joins_lists() {
        let entries = vec![entry(
            1,
            &[(
                "colors",
                EntryValue::Many(vec!["red".into(), "blue".into()]),
            )],
        )];
        let csv = entries_csv(&entries);
        assert!(csv.contains("\"red; blue\""));
    }

    #[test]
    fn test_csv_escapes_quotes() {
        let entries = vec![entry(
            1,
            &[("name", EntryValue::Single("Ali \"The Ace\"".into()))],
        )];
        let csv = entries_csv(&entries);
        assert!(csv.contains("\"Ali \"\"The Ace\"\"\""));
    }

    #[test]
    fn test_csv_row_count() {
        let entries = vec![
            entry(1, &[("a", EntryValue::Single("1".into()))]),
            entry(2, &[("a", EntryValue::Single("2".into()))]),
        ];
        let csv = entries_csv(&entries);
        assert_eq!(csv.lines().count(), 3);
    }
}
