// src/table/mod.rs
//! The lead table — CSV-backed tabular data with a stable column set.
//!
//! Input rows are read once and treated as read-only; result columns are
//! appended blank at load time and filled in one row at a time by the batch
//! loop. Column order is preserved end to end so the output sheet looks like
//! the input sheet plus result columns.

pub mod segment;

use crate::constants::{CONTACT_EMAIL_COLUMN, CONTACT_NAME_COLUMN, URL_COLUMN};
use crate::error::AppError;
use indexmap::IndexMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// An in-memory CSV table: ordered columns, rows of column→value cells.
#[derive(Debug, Clone, Default)]
pub struct LeadTable {
    columns: Vec<String>,
    rows: Vec<IndexMap<String, String>>,
}

impl LeadTable {
    /// Loads a table from a CSV file.
    pub fn from_csv_path(path: &Path) -> Result<Self, AppError> {
        log::info!("Loading lead table from {}", path.display());
        let file = File::open(path)?;
        let table = Self::from_csv_reader(file)?;
        log::info!(
            "Loaded {} rows and {} columns",
            table.len(),
            table.columns.len()
        );
        Ok(table)
    }

    /// Loads a table from any CSV byte stream.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, AppError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader);

        let columns: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            let mut cells = IndexMap::with_capacity(columns.len());
            for (i, column) in columns.iter().enumerate() {
                let value = record.get(i).unwrap_or_default();
                cells.insert(column.clone(), value.to_string());
            }
            rows.push(cells);
        }

        Ok(Self { columns, rows })
    }

    /// Appends any of the given columns that don't exist yet, blank in every
    /// row. Existing columns (a re-run over a previous output file) are left
    /// alone so `--resume` can see prior results.
    pub fn ensure_columns(&mut self, names: &[&str]) {
        for name in names {
            if self.columns.iter().any(|c| c == name) {
                continue;
            }
            self.columns.push(name.to_string());
            for row in &mut self.rows {
                row.insert(name.to_string(), String::new());
            }
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[allow(dead_code)] // Used via the library API
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[allow(dead_code)] // Used via the library API
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Read-only lead view over one row.
    pub fn row(&self, index: usize) -> LeadRow<'_> {
        LeadRow {
            cells: &self.rows[index],
        }
    }

    /// Cell value, empty string for an unknown column.
    pub fn get(&self, index: usize, column: &str) -> &str {
        self.rows[index]
            .get(column)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Writes a cell. The column must have been declared via the header or
    /// [`ensure_columns`](Self::ensure_columns); writes to undeclared columns
    /// would silently disappear on output, so they are rejected.
    pub fn set(&mut self, index: usize, column: &str, value: String) -> Result<(), AppError> {
        if !self.has_column(column) {
            return Err(AppError::MissingColumn {
                column: column.to_string(),
            });
        }
        self.rows[index].insert(column.to_string(), value);
        Ok(())
    }

    /// Keeps only the rows the predicate accepts. Used by segmenting.
    pub fn filtered(&self, mut keep: impl FnMut(&LeadRow<'_>) -> bool) -> Self {
        let rows = self
            .rows
            .iter()
            .filter(|cells| keep(&LeadRow { cells }))
            .cloned()
            .collect();
        Self {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Writes the table to a CSV file, creating parent directories as needed.
    pub fn write_csv_path(&self, path: &Path) -> Result<(), AppError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        self.write_csv(file)?;
        log::debug!("Wrote {} rows to {}", self.len(), path.display());
        Ok(())
    }

    /// Writes the table to any byte sink.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), AppError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(&self.columns)?;
        for row in &self.rows {
            let record: Vec<&str> = self
                .columns
                .iter()
                .map(|column| row.get(column).map(String::as_str).unwrap_or_default())
                .collect();
            csv_writer.write_record(&record)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

/// Read-only view of one lead: the identifier fields the pipeline needs,
/// backed by the row's cells.
#[derive(Debug, Clone, Copy)]
pub struct LeadRow<'a> {
    cells: &'a IndexMap<String, String>,
}

impl<'a> LeadRow<'a> {
    /// The company website to research, `None` when missing or blank.
    pub fn target_url(&self) -> Option<&'a str> {
        self.cells
            .get(URL_COLUMN)
            .map(String::as_str)
            .filter(|url| !url.trim().is_empty())
    }

    /// The contact's full name; empty string when the column is absent.
    pub fn contact_name(&self) -> &'a str {
        self.cells
            .get(CONTACT_NAME_COLUMN)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// The contact's email; empty string when the column is absent.
    #[allow(dead_code)] // Used via the library API
    pub fn contact_email(&self) -> &'a str {
        self.cells
            .get(CONTACT_EMAIL_COLUMN)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Arbitrary cell access for passthrough columns.
    pub fn get(&self, column: &str) -> &'a str {
        self.cells
            .get(column)
            .map(String::as_str)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "\
URL,CEO Name,CEO Email,Country
https://acme.test,Jane Doe,jane@acme.test,United States
,Missing Url,missing@nowhere.test,India
https://globex.test,Hank Scorpio,hank@globex.test,Germany
";

    fn sample_table() -> LeadTable {
        LeadTable::from_csv_reader(SAMPLE.as_bytes()).unwrap()
    }

    #[test]
    fn loads_rows_and_preserves_column_order() {
        let table = sample_table();
        assert_eq!(table.len(), 3);
        assert_eq!(
            table.columns(),
            &["URL", "CEO Name", "CEO Email", "Country"]
        );
        assert_eq!(table.get(0, "CEO Name"), "Jane Doe");
    }

    #[test]
    fn lead_row_treats_blank_url_as_missing() {
        let table = sample_table();
        assert_eq!(table.row(0).target_url(), Some("https://acme.test"));
        assert_eq!(table.row(1).target_url(), None);
        assert_eq!(table.row(1).contact_name(), "Missing Url");
    }

    #[test]
    fn ensure_columns_appends_blank_and_keeps_existing() {
        let mut table = sample_table();
        table.ensure_columns(&["Body", "Country"]);
        assert_eq!(
            table.columns(),
            &["URL", "CEO Name", "CEO Email", "Country", "Body"]
        );
        assert_eq!(table.get(0, "Body"), "");
        // Existing column untouched
        assert_eq!(table.get(2, "Country"), "Germany");
    }

    #[test]
    fn set_rejects_undeclared_columns() {
        let mut table = sample_table();
        assert!(table.set(0, "Nope", "x".to_string()).is_err());
        table.ensure_columns(&["Body"]);
        table.set(0, "Body", "hello".to_string()).unwrap();
        assert_eq!(table.get(0, "Body"), "hello");
    }

    #[test]
    fn write_round_trips_through_csv() {
        let mut table = sample_table();
        table.ensure_columns(&["Body"]);
        table.set(2, "Body", "Hi Hank,\nwe should talk".to_string()).unwrap();

        let mut buffer = Vec::new();
        table.write_csv(&mut buffer).unwrap();
        let reloaded = LeadTable::from_csv_reader(buffer.as_slice()).unwrap();

        assert_eq!(reloaded.len(), 3);
        assert_eq!(reloaded.get(2, "Body"), "Hi Hank,\nwe should talk");
        assert_eq!(reloaded.columns(), table.columns());
    }

    #[test]
    fn short_records_read_as_blank_cells() {
        let csv = "URL,CEO Name,CEO Email\nhttps://a.test,Ann\n";
        let table = LeadTable::from_csv_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.get(0, "CEO Email"), "");
    }
}
