use super::{fields, Record, Table};
use crate::source::RawRow;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use tracing::info;

/// Column label used by the export before renaming.
const SOURCE_STUDENT_ID: &str = "StudentID";

/// Source column label → canonical field name.
static RENAMES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Timestamp", fields::TIME_STAMP),
        ("Username", fields::EMAIL),
        ("StudentID", fields::STUDENT_ID),
        ("Job Status", fields::JOB_STATUS),
        ("Birth Month", fields::BIRTH_MONTH),
        (
            "Which class session will you attend? (Select all that apply)",
            fields::CLASS_ATTENDANCE,
        ),
        (
            "Programming Experience level (Any language)",
            fields::PROGRAMMING_EXPERIENCE,
        ),
        (
            "Python Programming Experience level",
            fields::PYTHON_EXPERIENCE,
        ),
        ("LinkedIn Profile URL", fields::LINKEDIN_URL),
    ])
});

/// Drops rows with no student identifier, then renames source labels to
/// canonical field names. Unmapped columns pass through unchanged.
#[tracing::instrument(level = "debug", skip(rows))]
pub fn ingest(rows: Vec<RawRow>) -> Table {
    let total = rows.len();
    let table: Table = rows
        .into_iter()
        .filter(|row| {
            row.get(SOURCE_STUDENT_ID)
                .is_some_and(|v| !v.trim().is_empty())
        })
        .map(|row| {
            let fields = row
                .into_iter()
                .map(|(label, value)| {
                    let name = RENAMES
                        .get(label.as_str())
                        .map(|canonical| canonical.to_string())
                        .unwrap_or(label);
                    (name, value)
                })
                .collect();
            Record {
                fields,
                ..Record::default()
            }
        })
        .collect();
    if table.len() < total {
        info!(dropped = total - table.len(), "rows without a student id");
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn drops_rows_without_student_id() {
        let rows = vec![
            raw(&[("StudentID", "S1"), ("Username", "a@b.com")]),
            raw(&[("StudentID", ""), ("Username", "b@c.com")]),
            raw(&[("StudentID", "   "), ("Username", "c@d.com")]),
            raw(&[("Username", "d@e.com")]),
        ];
        let table = ingest(rows);
        assert_eq!(table.len(), 1);
        assert_eq!(table[0].get(fields::STUDENT_ID), "S1");
    }

    #[test]
    fn renames_known_labels_and_passes_the_rest_through() {
        let rows = vec![raw(&[
            ("StudentID", "S1"),
            ("Timestamp", "2024-01-05 09:00:00"),
            ("Username", "a@b.com"),
            (
                "Which class session will you attend? (Select all that apply)",
                "Day 1",
            ),
            ("Favorite Color", "green"),
        ])];
        let table = ingest(rows);
        let record = &table[0];
        assert_eq!(record.get(fields::TIME_STAMP), "2024-01-05 09:00:00");
        assert_eq!(record.get(fields::EMAIL), "a@b.com");
        assert_eq!(record.get(fields::CLASS_ATTENDANCE), "Day 1");
        assert_eq!(record.get("Favorite Color"), "green");
        assert!(!record.fields.contains_key("Username"));
    }
}
