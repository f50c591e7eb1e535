use super::{fields, Table};
use std::cmp::Reverse;
use std::collections::HashSet;
use tracing::info;

/// First identifier handed out after deduplication.
pub const FIRST_UNIQUE_ID: u64 = 10001;

/// Keeps the most recent submission per student and numbers the survivors.
///
/// Ordering is timestamp descending; rows whose timestamp failed to parse
/// sort after every valid one. Equal timestamps resolve to the later
/// submission in the original file. Identifiers are dense, strictly
/// increasing, and assigned in the deduplicated order.
#[tracing::instrument(level = "debug", skip(table))]
pub fn dedupe_and_number(table: Table) -> Table {
    let before = table.len();
    let mut indexed: Vec<_> = table.into_iter().enumerate().collect();
    indexed.sort_by_key(|(position, record)| (Reverse(record.timestamp), Reverse(*position)));

    let mut seen = HashSet::new();
    let mut table = Table::with_capacity(indexed.len());
    for (_, record) in indexed {
        if seen.insert(record.get(fields::STUDENT_ID).to_string()) {
            table.push(record);
        }
    }
    for (offset, record) in table.iter_mut().enumerate() {
        record.unique_id = Some(FIRST_UNIQUE_ID + offset as u64);
    }

    info!(before, after = table.len(), "deduplicated by student id");
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Record;
    use chrono::NaiveDate;

    fn record(student: &str, timestamp: Option<(u32, u32)>) -> Record {
        let mut record = Record::default();
        record.set(fields::STUDENT_ID, student);
        record.timestamp = timestamp.and_then(|(month, day)| {
            NaiveDate::from_ymd_opt(2024, month, day)?.and_hms_opt(12, 0, 0)
        });
        record
    }

    #[test]
    fn most_recent_submission_wins() {
        let table = dedupe_and_number(vec![
            record("S1", Some((1, 2))),
            record("S1", Some((1, 5))),
            record("S2", Some((1, 3))),
        ]);
        assert_eq!(table.len(), 2);
        assert_eq!(table[0].get(fields::STUDENT_ID), "S1");
        assert_eq!(
            table[0].timestamp,
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap().and_hms_opt(12, 0, 0)
        );
        assert_eq!(table[1].get(fields::STUDENT_ID), "S2");
    }

    #[test]
    fn equal_timestamps_keep_the_later_submission() {
        let mut first = record("S1", Some((1, 2)));
        first.set("Marker", "first");
        let mut second = record("S1", Some((1, 2)));
        second.set("Marker", "second");

        let table = dedupe_and_number(vec![first, second]);
        assert_eq!(table.len(), 1);
        assert_eq!(table[0].get("Marker"), "second");
    }

    #[test]
    fn unparsed_timestamps_sort_last() {
        let table = dedupe_and_number(vec![
            record("S1", None),
            record("S2", Some((1, 1))),
            record("S3", Some((1, 9))),
        ]);
        let order: Vec<_> = table
            .iter()
            .map(|r| r.get(fields::STUDENT_ID).to_string())
            .collect();
        assert_eq!(order, ["S3", "S2", "S1"]);
    }

    #[test]
    fn identifiers_are_dense_from_10001() {
        let table = dedupe_and_number(vec![
            record("S1", Some((1, 3))),
            record("S2", Some((1, 2))),
            record("S3", Some((1, 1))),
        ]);
        let ids: Vec<_> = table.iter().map(|r| r.unique_id.unwrap()).collect();
        assert_eq!(ids, [10001, 10002, 10003]);

        let students: HashSet<_> = table.iter().map(|r| r.get(fields::STUDENT_ID)).collect();
        assert_eq!(students.len(), table.len());
    }
}
