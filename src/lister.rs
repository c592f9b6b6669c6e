//! Resolves which tables a run exports.

use crate::catalog::Catalog;
use crate::error::Result;

/// Tables exported in test mode, in this order.
pub const TEST_TABLES: [&str; 2] = ["accounts", "company_types"];

/// Where the table list comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSelection {
    /// Every base table of the schema, alphabetically.
    Catalog,
    /// A caller-supplied list, order preserved.
    Named(Vec<String>),
}

impl TableSelection {
    /// The fixed test-mode selection.
    pub fn test() -> Self {
        TableSelection::Named(TEST_TABLES.iter().map(|t| t.to_string()).collect())
    }
}

/// Resolve a selection into table names.
///
/// Named lists are trimmed, empty entries dropped and repeated names kept
/// at their first position. An empty result is not an error here.
pub fn list_tables<C: Catalog>(
    catalog: &mut C,
    selection: &TableSelection,
    schema: &str,
) -> Result<Vec<String>> {
    match selection {
        TableSelection::Catalog => catalog.base_tables(schema),
        TableSelection::Named(names) => {
            let mut tables: Vec<String> = Vec::with_capacity(names.len());
            for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
                if !tables.iter().any(|t| t == name) {
                    tables.push(name.to_string());
                }
            }
            Ok(tables)
        }
    }
}

/// Split a comma-separated table list.
pub fn parse_table_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Drop excluded tables (exact match), keeping order.
pub fn exclude_tables(tables: Vec<String>, exclude: &[String]) -> Vec<String> {
    if exclude.is_empty() {
        return tables;
    }
    tables
        .into_iter()
        .filter(|t| !exclude.iter().any(|e| e == t))
        .collect()
}
