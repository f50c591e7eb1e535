pub mod workbook;

use crate::pipeline::project::Projections;
use std::path::PathBuf;
use thiserror::Error;

pub use workbook::ZipWorkbookSink;

/// Sheet labels in the output artifact.
pub const SHEET_STUDENT: &str = "Student";
pub const SHEET_EXPERIENCE: &str = "Experience";
pub const SHEET_ATTENDANCE: &str = "ClassAttendance";

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to serialize sheet {sheet}")]
    Sheet {
        sheet: &'static str,
        #[source]
        source: csv::Error,
    },
    #[error("failed to build workbook container")]
    Container(#[from] zip::result::ZipError),
    #[error("failed to write workbook to {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Writes the three projections as separate labeled sheets of one workbook
/// artifact. No partial-write guarantee beyond what the implementation
/// documents.
pub trait RowSink {
    fn write(&self, projections: &Projections) -> Result<(), SinkError>;
}
