use super::{RowSink, SinkError, SHEET_ATTENDANCE, SHEET_EXPERIENCE, SHEET_STUDENT};
use crate::pipeline::project::Projections;
use serde::Serialize;
use std::{
    fs,
    io::{Cursor, Write},
    path::{Path, PathBuf},
};
use tracing::info;
use zip::{write::SimpleFileOptions, CompressionMethod, ZipWriter};

/// A workbook laid out as a ZIP container with one CSV sheet per entry.
///
/// The whole container is assembled in memory and persisted with a single
/// file write, so a serialization failure leaves nothing on disk.
pub struct ZipWorkbookSink {
    path: PathBuf,
}

impl ZipWorkbookSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sheet_bytes<R: Serialize>(
        &self,
        sheet: &'static str,
        rows: &[R],
    ) -> Result<Vec<u8>, SinkError> {
        let mut buf = Vec::new();
        {
            let mut wtr = csv::Writer::from_writer(&mut buf);
            for row in rows {
                wtr.serialize(row)
                    .map_err(|source| SinkError::Sheet { sheet, source })?;
            }
            wtr.flush().map_err(|source| SinkError::Write {
                path: self.path.clone(),
                source,
            })?;
        }
        Ok(buf)
    }
}

impl RowSink for ZipWorkbookSink {
    #[tracing::instrument(level = "info", skip(self, projections), fields(path = %self.path.display()))]
    fn write(&self, projections: &Projections) -> Result<(), SinkError> {
        let sheets = [
            (SHEET_STUDENT, self.sheet_bytes(SHEET_STUDENT, &projections.student)?),
            (
                SHEET_EXPERIENCE,
                self.sheet_bytes(SHEET_EXPERIENCE, &projections.experience)?,
            ),
            (
                SHEET_ATTENDANCE,
                self.sheet_bytes(SHEET_ATTENDANCE, &projections.attendance)?,
            ),
        ];

        let mut cursor = Cursor::new(Vec::new());
        {
            let mut zip = ZipWriter::new(&mut cursor);
            for (sheet, bytes) in &sheets {
                let options = SimpleFileOptions::default()
                    .compression_method(CompressionMethod::Deflated);
                zip.start_file(format!("{sheet}.csv"), options)?;
                zip.write_all(bytes).map_err(|source| SinkError::Write {
                    path: self.path.clone(),
                    source,
                })?;
            }
            zip.finish()?;
        }

        fs::write(&self.path, cursor.get_ref()).map_err(|source| SinkError::Write {
            path: self.path.clone(),
            source,
        })?;
        info!(rows = projections.student.len(), "workbook written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::project::{AttendanceRow, ExperienceRow, StudentRow};
    use anyhow::Result;
    use std::io::Read;
    use tempfile::tempdir;
    use zip::ZipArchive;

    fn sample_projections() -> Projections {
        Projections {
            student: vec![StudentRow {
                unique_id: 10001,
                student_id: "S1".into(),
                email: "s1@uni.edu".into(),
                birth_month: "3".into(),
                linkedin_url: "https://www.linkedin.com/in/s1".into(),
                job_status: "0".into(),
            }],
            experience: vec![ExperienceRow {
                unique_id: 10001,
                programming_experience: "5".into(),
                python_experience: "3".into(),
            }],
            attendance: vec![AttendanceRow {
                unique_id: 10001,
                class_attendance: "3".into(),
            }],
        }
    }

    #[test]
    fn writes_three_labeled_sheets() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("processed.zip");
        ZipWorkbookSink::new(&path).write(&sample_projections())?;

        let file = fs::File::open(&path)?;
        let mut archive = ZipArchive::new(file)?;
        let mut names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).map(|e| e.name().to_string()))
            .collect::<Result<_, _>>()?;
        names.sort();
        assert_eq!(
            names,
            ["ClassAttendance.csv", "Experience.csv", "Student.csv"]
        );

        let mut student_csv = String::new();
        archive
            .by_name("Student.csv")?
            .read_to_string(&mut student_csv)?;
        let mut lines = student_csv.lines();
        assert_eq!(
            lines.next(),
            Some("UniqueId,StudentId,Email,BirthMonth,LinkedinUrl,JobStatus")
        );
        assert_eq!(
            lines.next(),
            Some("10001,S1,s1@uni.edu,3,https://www.linkedin.com/in/s1,0")
        );
        Ok(())
    }
}
