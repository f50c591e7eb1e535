use super::{fields, Table};
use once_cell::sync::Lazy;
use std::collections::HashMap;

static MONTHS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("January", "1"),
        ("February", "2"),
        ("March", "3"),
        ("April", "4"),
        ("May", "5"),
        ("June", "6"),
        ("July", "7"),
        ("August", "8"),
        ("September", "9"),
        ("October", "10"),
        ("November", "11"),
        ("December", "12"),
    ])
});

// The scale has no label for code 8.
static EXPERIENCE_LEVELS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Zero Experience", "0"),
        ("Beginner", "1"),
        ("Capable", "2"),
        ("Intermediate", "3"),
        ("Effective", "4"),
        ("Experienced", "5"),
        ("Advance", "6"),
        ("Distinguished", "7"),
        ("Master", "9"),
    ])
});

static JOB_STATUS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([("Working in Data", "1"), ("Seeking Job in Data", "0")])
});

/// Class-session labels counted by the attendance recode.
const SESSION_DAYS: [&str; 5] = ["Day 1", "Day 2", "Day 3", "Day 4", "Day 5"];

/// `table[raw]`, falling back to the unchanged raw value. Unmapped labels
/// are never erased.
fn code(map: &HashMap<&'static str, &'static str>, raw: &str) -> String {
    map.get(raw)
        .map(|coded| coded.to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn recode_field(table: &mut Table, field: &str, map: &HashMap<&'static str, &'static str>) {
    for record in table.iter_mut() {
        let coded = code(map, record.get(field));
        record.set(field, coded);
    }
}

/// Month name → "1".."12".
pub fn birth_months(mut table: Table) -> Table {
    recode_field(&mut table, fields::BIRTH_MONTH, &MONTHS);
    table
}

/// Nine-level ordinal scale, applied to both experience fields.
pub fn experience_levels(mut table: Table) -> Table {
    recode_field(&mut table, fields::PROGRAMMING_EXPERIENCE, &EXPERIENCE_LEVELS);
    recode_field(&mut table, fields::PYTHON_EXPERIENCE, &EXPERIENCE_LEVELS);
    table
}

/// "Working in Data" → "1", "Seeking Job in Data" → "0".
pub fn job_status(mut table: Table) -> Table {
    recode_field(&mut table, fields::JOB_STATUS, &JOB_STATUS);
    table
}

/// Total occurrences of the session labels; repeated mentions of the same
/// day count again.
pub fn count_attendance(raw: &str) -> usize {
    SESSION_DAYS.iter().map(|day| raw.matches(day).count()).sum()
}

/// Replaces the multi-select attendance text with its session count. A
/// missing cell counts as 0.
pub fn class_attendance(mut table: Table) -> Table {
    for record in table.iter_mut() {
        let count = count_attendance(record.get(fields::CLASS_ATTENDANCE));
        record.set(fields::CLASS_ATTENDANCE, count.to_string());
    }
    table
}
