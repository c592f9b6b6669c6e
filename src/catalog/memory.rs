use super::Catalog;
use crate::error::Result;
use crate::fetcher::Row;
use std::collections::BTreeMap;

/// In-memory catalog holding a single schema's tables.
///
/// The schema argument is ignored. Every `fetch_rows` call is recorded so
/// callers can assert which tables were actually read.
#[derive(Debug, Default, Clone)]
pub struct MemoryCatalog {
    tables: BTreeMap<String, Vec<Row>>,
    fetched: Vec<String>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, name: impl Into<String>, rows: Vec<Row>) -> Self {
        self.insert_table(name, rows);
        self
    }

    pub fn insert_table(&mut self, name: impl Into<String>, rows: Vec<Row>) {
        self.tables.insert(name.into(), rows);
    }

    /// Tables passed to `fetch_rows`, in call order.
    pub fn fetched(&self) -> &[String] {
        &self.fetched
    }
}

impl Catalog for MemoryCatalog {
    fn base_tables(&mut self, _schema: &str) -> Result<Vec<String>> {
        Ok(self.tables.keys().cloned().collect())
    }

    fn table_exists(&mut self, _schema: &str, table: &str) -> Result<bool> {
        Ok(self.tables.contains_key(table))
    }

    fn fetch_rows(&mut self, _schema: &str, table: &str) -> Result<Vec<Row>> {
        self.fetched.push(table.to_string());
        Ok(self.tables.get(table).cloned().unwrap_or_default())
    }
}
