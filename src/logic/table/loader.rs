//! Input Loader
//!
//! Reads a delimited table with a header row into memory.
//! Row order and column names are preserved exactly as found.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use csv::ReaderBuilder;

use crate::logic::error::{GateError, GateResult};

/// In-memory table of string cells
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl FeatureTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the first column with this name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Rename a column in place; returns false if `from` is absent
    pub fn rename_column(&mut self, from: &str, to: &str) -> bool {
        match self.column_index(from) {
            Some(idx) => {
                self.headers[idx] = to.to_string();
                true
            }
            None => false,
        }
    }

    /// Cell at (row, column name)
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx).map(String::as_str)
    }
}

/// Load a table from a file path
pub fn load_table(path: &Path) -> GateResult<FeatureTable> {
    log::info!("Processing input file: {}", path.display());

    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
            GateError::NotFound { path: path.to_path_buf() }
        }
        _ => GateError::Malformed { path: path.to_path_buf(), reason: e.to_string() },
    })?;

    if !file.metadata().map(|m| m.is_file()).unwrap_or(false) {
        return Err(GateError::NotFound { path: path.to_path_buf() });
    }

    let table = read_table(file).map_err(|e| GateError::Malformed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    log::info!("Loaded {} rows from {}", table.len(), path.display());
    Ok(table)
}

/// Parse a table from any reader
pub fn read_table<R: Read>(reader: R) -> Result<FeatureTable, csv::Error> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers = rdr.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(FeatureTable::new(headers, rows))
}
