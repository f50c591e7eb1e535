use csv::ReaderBuilder;
use std::{
    collections::BTreeMap,
    fs,
    io::{self, Cursor},
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::debug;

/// One raw row as read from the export: original column label → cell text.
pub type RawRow = BTreeMap<String, String>;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("input file not found: {0}")]
    NotFound(PathBuf),
    #[error("input file is empty: {0}")]
    Empty(PathBuf),
    #[error("input file could not be parsed: {path}")]
    Unparsable {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("failed to read input file: {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Produces the raw rows the pipeline consumes, whatever the backing file
/// format. Failure kinds are distinguished so callers can report them.
pub trait RowSource {
    fn read(&self) -> Result<Vec<RawRow>, SourceError>;
}

/// Reads a delimited export with a header row. Every cell is kept as text;
/// typing happens later in the pipeline.
pub struct CsvRowSource {
    path: PathBuf,
}

impl CsvRowSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RowSource for CsvRowSource {
    fn read(&self) -> Result<Vec<RawRow>, SourceError> {
        let bytes = fs::read(&self.path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => SourceError::NotFound(self.path.clone()),
            _ => SourceError::Io {
                path: self.path.clone(),
                source,
            },
        })?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(SourceError::Empty(self.path.clone()));
        }

        let unparsable = |source: csv::Error| SourceError::Unparsable {
            path: self.path.clone(),
            source,
        };

        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .from_reader(Cursor::new(bytes));
        let headers = rdr.headers().map_err(unparsable)?.clone();

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(unparsable)?;
            let row: RawRow = headers
                .iter()
                .zip(record.iter())
                .map(|(label, cell)| (label.to_string(), cell.to_string()))
                .collect();
            rows.push(row);
        }
        debug!(rows = rows.len(), path = %self.path.display(), "read raw rows");
        Ok(rows)
    }
}
