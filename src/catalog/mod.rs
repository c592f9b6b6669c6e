//! Database catalog access.
//!
//! The generator only ever needs three read-only questions answered: which
//! base tables exist in a schema, whether a given name is one of them, and
//! what rows it holds. [`Catalog`] is that seam; [`PgCatalog`] answers it
//! against a live PostgreSQL server and [`MemoryCatalog`] from fixtures.

mod memory;
mod pg;

pub use self::memory::MemoryCatalog;
pub use self::pg::{quote_ident, PgCatalog};

use crate::error::Result;
use crate::fetcher::Row;

pub trait Catalog {
    /// All base tables in `schema`, ascending by name.
    fn base_tables(&mut self, schema: &str) -> Result<Vec<String>>;

    /// Exact, case-sensitive lookup of a base table in `schema`.
    fn table_exists(&mut self, schema: &str, table: &str) -> Result<bool>;

    /// Every row of `table`, ordered by its first physical column, with
    /// columns in catalog order.
    fn fetch_rows(&mut self, schema: &str, table: &str) -> Result<Vec<Row>>;
}
