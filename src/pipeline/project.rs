use super::{fields, Table};
use anyhow::{Context, Result};
use serde::Serialize;

/// One row of the Student sheet.
#[derive(Debug, Serialize)]
pub struct StudentRow {
    #[serde(rename = "UniqueId")]
    pub unique_id: u64,
    #[serde(rename = "StudentId")]
    pub student_id: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "BirthMonth")]
    pub birth_month: String,
    #[serde(rename = "LinkedinUrl")]
    pub linkedin_url: String,
    #[serde(rename = "JobStatus")]
    pub job_status: String,
}

/// One row of the Experience sheet.
#[derive(Debug, Serialize)]
pub struct ExperienceRow {
    #[serde(rename = "UniqueId")]
    pub unique_id: u64,
    #[serde(rename = "ProgrammingExperience")]
    pub programming_experience: String,
    #[serde(rename = "PythonProgrammingExperience")]
    pub python_experience: String,
}

/// One row of the ClassAttendance sheet.
#[derive(Debug, Serialize)]
pub struct AttendanceRow {
    #[serde(rename = "UniqueId")]
    pub unique_id: u64,
    #[serde(rename = "ClassAttendance")]
    pub class_attendance: String,
}

/// The three column projections exported from the final table, joined by
/// UniqueId. Immutable once built.
#[derive(Debug)]
pub struct Projections {
    pub student: Vec<StudentRow>,
    pub experience: Vec<ExperienceRow>,
    pub attendance: Vec<AttendanceRow>,
}

/// Splits the final table into its three output projections.
pub fn split(table: &Table) -> Result<Projections> {
    let mut student = Vec::with_capacity(table.len());
    let mut experience = Vec::with_capacity(table.len());
    let mut attendance = Vec::with_capacity(table.len());

    for record in table {
        let unique_id = record
            .unique_id
            .context("projection ran before identifier assignment")?;
        student.push(StudentRow {
            unique_id,
            student_id: record.get(fields::STUDENT_ID).to_string(),
            email: record.get(fields::EMAIL).to_string(),
            birth_month: record.get(fields::BIRTH_MONTH).to_string(),
            linkedin_url: record.get(fields::LINKEDIN_URL).to_string(),
            job_status: record.get(fields::JOB_STATUS).to_string(),
        });
        experience.push(ExperienceRow {
            unique_id,
            programming_experience: record.get(fields::PROGRAMMING_EXPERIENCE).to_string(),
            python_experience: record.get(fields::PYTHON_EXPERIENCE).to_string(),
        });
        attendance.push(AttendanceRow {
            unique_id,
            class_attendance: record.get(fields::CLASS_ATTENDANCE).to_string(),
        });
    }

    Ok(Projections {
        student,
        experience,
        attendance,
    })
}
