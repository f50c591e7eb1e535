pub mod coerce;
pub mod dedupe;
pub mod filter;
pub mod format;
pub mod project;
pub mod recode;
pub mod rename;

use crate::source::RawRow;
use anyhow::Result;
use chrono::NaiveDateTime;
use std::collections::BTreeMap;
use tracing::info;

/// Canonical column names every stage after renaming works with.
pub mod fields {
    pub const TIME_STAMP: &str = "TimeStamp";
    pub const EMAIL: &str = "Email";
    pub const STUDENT_ID: &str = "StudentId";
    pub const JOB_STATUS: &str = "JobStatus";
    pub const BIRTH_MONTH: &str = "BirthMonth";
    pub const CLASS_ATTENDANCE: &str = "ClassAttendance";
    pub const PROGRAMMING_EXPERIENCE: &str = "ProgrammingExperience";
    pub const PYTHON_EXPERIENCE: &str = "PythonProgrammingExperience";
    pub const LINKEDIN_URL: &str = "LinkedinUrl";
}

/// Substring that marks a LinkedIn profile URL.
pub const PROFILE_MARKER: &str = "linkedin.com/in/";

/// One survey response. Cell values stay text through every stage; the
/// parsed timestamp and the assigned identifier live beside the map so no
/// stage sees them before the stage that produces them has run.
#[derive(Debug, Clone, Default)]
pub struct Record {
    pub fields: BTreeMap<String, String>,
    pub timestamp: Option<NaiveDateTime>,
    pub unique_id: Option<u64>,
}

impl Record {
    /// Cell text for `name`, or empty for a column the row never had.
    pub fn get(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.fields.insert(name.to_string(), value.into());
    }
}

pub type Table = Vec<Record>;

/// Runs every stage over freshly read raw rows, in the fixed order the
/// stages depend on each other.
#[tracing::instrument(level = "info", skip(rows))]
pub fn run(rows: Vec<RawRow>) -> Result<Table> {
    let table = rename::ingest(rows);
    let table = coerce::timestamps(table);
    let table = filter::retain_linkedin_profiles(table);
    let table = recode::birth_months(table);
    let table = recode::experience_levels(table);
    let table = recode::class_attendance(table);
    let table = recode::job_status(table);
    let table = dedupe::dedupe_and_number(table);
    let table = format::repair_contact_fields(table);
    let table = filter::cohort(table)?;
    info!(rows = table.len(), "pipeline complete");
    Ok(table)
}
