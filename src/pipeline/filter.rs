use super::{fields, Record, Table, PROFILE_MARKER};
use anyhow::{Context, Result};
use tracing::info;

/// Minimum coded level for each cohort criterion.
const MIN_EXPERIENCE: i64 = 3;
const MIN_ATTENDANCE: i64 = 3;

/// Drops rows whose LinkedinUrl does not reference a profile path. Runs
/// before any repair, so salvageable-but-malformed values are rejected here.
#[tracing::instrument(level = "debug", skip(table))]
pub fn retain_linkedin_profiles(table: Table) -> Table {
    let before = table.len();
    let table: Table = table
        .into_iter()
        .filter(|record| record.get(fields::LINKEDIN_URL).contains(PROFILE_MARKER))
        .collect();
    if table.len() < before {
        info!(
            dropped = before - table.len(),
            "rows without a linkedin profile url"
        );
    }
    table
}

fn coded_level(record: &Record, field: &str) -> Result<i64> {
    let raw = record.get(field);
    raw.parse().with_context(|| {
        format!(
            "student {}: {} = {:?} is not numeric after recoding",
            record.get(fields::STUDENT_ID),
            field,
            raw
        )
    })
}

/// Terminal cohort selection: job-seeking respondents with enough
/// experience and enough attended sessions.
///
/// A non-numeric experience or attendance value at this point means an
/// earlier stage misbehaved, and the whole run fails.
#[tracing::instrument(level = "debug", skip(table))]
pub fn cohort(table: Table) -> Result<Table> {
    let before = table.len();
    let mut kept = Table::with_capacity(table.len());
    for record in table {
        let python = coded_level(&record, fields::PYTHON_EXPERIENCE)?;
        let general = coded_level(&record, fields::PROGRAMMING_EXPERIENCE)?;
        let attendance = coded_level(&record, fields::CLASS_ATTENDANCE)?;
        if record.get(fields::JOB_STATUS) == "0"
            && python >= MIN_EXPERIENCE
            && general >= MIN_EXPERIENCE
            && attendance >= MIN_ATTENDANCE
        {
            kept.push(record);
        }
    }
    info!(before, kept = kept.len(), "cohort filter");
    Ok(kept)
}
