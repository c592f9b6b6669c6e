//! Row fetching and column redaction.
//!
//! Each requested table is checked for existence, read in full and stripped
//! of its timestamp columns and conventional primary key. Missing tables
//! are skipped with a [`Diagnostic`]; tables without rows are dropped from
//! the resulting [`TableDataset`].

mod row;

pub use row::{Row, Value};

use crate::catalog::Catalog;
use crate::error::Result;
use crate::inflect::primary_key_for;
use std::fmt;

/// Columns removed from every row before the primary key.
pub const DEFAULT_STRIP_COLUMNS: [&str; 2] = ["created_at", "updated_at"];

/// Rows captured for one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableData {
    pub name: String,
    pub rows: Vec<Row>,
}

impl TableData {
    pub fn record_count(&self) -> usize {
        self.rows.len()
    }
}

/// Captured tables in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableDataset {
    tables: Vec<TableData>,
}

impl TableDataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, rows: Vec<Row>) {
        self.tables.push(TableData {
            name: name.into(),
            rows,
        });
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TableData> {
        self.tables.iter()
    }

    pub fn get(&self, name: &str) -> Option<&TableData> {
        self.tables.iter().find(|t| t.name == name)
    }

    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn total_rows(&self) -> usize {
        self.tables.iter().map(TableData::record_count).sum()
    }
}

impl<'a> IntoIterator for &'a TableDataset {
    type Item = &'a TableData;
    type IntoIter = std::slice::Iter<'a, TableData>;

    fn into_iter(self) -> Self::IntoIter {
        self.tables.iter()
    }
}

impl<N: Into<String>> FromIterator<(N, Vec<Row>)> for TableDataset {
    fn from_iter<I: IntoIterator<Item = (N, Vec<Row>)>>(iter: I) -> Self {
        let mut dataset = TableDataset::new();
        for (name, rows) in iter {
            dataset.push(name, rows);
        }
        dataset
    }
}

/// Non-fatal findings recorded while fetching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Requested table is not a base table of the schema; it was skipped.
    MissingTable { table: String },
    /// Table exists but yielded no rows; it is left out of the seeder.
    EmptyTable { table: String },
}

impl Diagnostic {
    pub fn table(&self) -> &str {
        match self {
            Diagnostic::MissingTable { table } | Diagnostic::EmptyTable { table } => table,
        }
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Diagnostic::MissingTable { .. })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MissingTable { table } => {
                write!(f, "Table '{}' does not exist, skipping...", table)
            }
            Diagnostic::EmptyTable { table } => write!(f, "Table '{}' has no data", table),
        }
    }
}

/// Result of fetching one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableFetch {
    Missing,
    Empty,
    Rows(Vec<Row>),
}

/// Everything the fetch phase produced.
#[derive(Debug, Clone, Default)]
pub struct FetchOutcome {
    pub dataset: TableDataset,
    pub diagnostics: Vec<Diagnostic>,
}

impl FetchOutcome {
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_warning())
    }
}

/// Remove the stripped columns and the `<singular>_id` key from a row.
///
/// The key is derived from the table name only; a table whose real primary
/// key does not follow the convention keeps it.
pub fn redact_row(row: &mut Row, table: &str, strip_columns: &[String]) {
    for column in strip_columns {
        row.remove(column);
    }
    row.remove(&primary_key_for(table));
}

/// Reads tables from a [`Catalog`] one at a time.
pub struct RowFetcher<'c, C: Catalog> {
    catalog: &'c mut C,
    schema: String,
    strip_columns: Vec<String>,
    progress: Option<Box<dyn Fn(&str) + 'c>>,
}

impl<'c, C: Catalog> RowFetcher<'c, C> {
    pub fn new(catalog: &'c mut C, schema: impl Into<String>) -> Self {
        Self {
            catalog,
            schema: schema.into(),
            strip_columns: DEFAULT_STRIP_COLUMNS.iter().map(|c| c.to_string()).collect(),
            progress: None,
        }
    }

    pub fn with_strip_columns(mut self, columns: Vec<String>) -> Self {
        self.strip_columns = columns;
        self
    }

    /// Called with each table name before it is checked and read.
    pub fn with_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(&str) + 'c,
    {
        self.progress = Some(Box::new(callback));
        self
    }

    pub fn fetch_table(&mut self, table: &str) -> Result<TableFetch> {
        if !self.catalog.table_exists(&self.schema, table)? {
            return Ok(TableFetch::Missing);
        }
        let mut rows = self.catalog.fetch_rows(&self.schema, table)?;
        if rows.is_empty() {
            return Ok(TableFetch::Empty);
        }
        for row in &mut rows {
            redact_row(row, table, &self.strip_columns);
        }
        Ok(TableFetch::Rows(rows))
    }

    /// Fetch every table in order. Database failures abort the whole run.
    pub fn fetch_all(&mut self, tables: &[String]) -> Result<FetchOutcome> {
        let mut outcome = FetchOutcome::default();
        for table in tables {
            if let Some(progress) = &self.progress {
                progress(table);
            }
            match self.fetch_table(table)? {
                TableFetch::Missing => outcome.diagnostics.push(Diagnostic::MissingTable {
                    table: table.clone(),
                }),
                TableFetch::Empty => outcome.diagnostics.push(Diagnostic::EmptyTable {
                    table: table.clone(),
                }),
                TableFetch::Rows(rows) => outcome.dataset.push(table.as_str(), rows),
            }
        }
        Ok(outcome)
    }
}
