//! CSV sink
//!
//! Opens the target file once, writes the fixed header row up front, and
//! appends data rows in one pass. Each row serializes the declared columns
//! of one JSON record as strings; fields absent from a record are written
//! empty.

use crate::error::{Error, Result};
use serde_json::Value;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// CSV writer with a fixed column schema
pub struct CsvSink {
    writer: BufWriter<File>,
    columns: Vec<String>,
    rows_written: usize,
}

impl CsvSink {
    /// Create the target file and write the header row
    pub fn create(path: impl AsRef<Path>, columns: &[&str]) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)
            .map_err(|e| Error::output(format!("Failed to create {}: {e}", path.display())))?;
        let mut writer = BufWriter::new(file);

        let header: Vec<String> = columns.iter().map(|c| escape_field(c)).collect();
        writeln!(writer, "{}", header.join(","))?;

        Ok(Self {
            writer,
            columns: columns.iter().map(ToString::to_string).collect(),
            rows_written: 0,
        })
    }

    /// Append one record as a data row
    pub fn append_record(&mut self, record: &Value) -> Result<()> {
        let fields: Vec<String> = self
            .columns
            .iter()
            .map(|column| escape_field(&field_as_string(record, column)))
            .collect();
        writeln!(self.writer, "{}", fields.join(","))?;
        self.rows_written += 1;
        Ok(())
    }

    /// Append a batch of records, returning how many rows were written
    pub fn append_records(&mut self, records: &[Value]) -> Result<usize> {
        for record in records {
            self.append_record(record)?;
        }
        Ok(records.len())
    }

    /// Number of data rows written so far (header excluded)
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Flush and close the sink, returning the data row count
    pub fn finish(mut self) -> Result<usize> {
        self.writer.flush()?;
        Ok(self.rows_written)
    }
}

impl std::fmt::Debug for CsvSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsvSink")
            .field("columns", &self.columns)
            .field("rows_written", &self.rows_written)
            .finish_non_exhaustive()
    }
}

/// Serialize one declared column of a record as a string.
///
/// Strings are taken verbatim; numbers and booleans use their JSON text;
/// a missing field or JSON null becomes the empty string.
fn field_as_string(record: &Value, column: &str) -> String {
    match record.get(column) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Quote a field if it contains the delimiter, quotes, or line breaks
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
