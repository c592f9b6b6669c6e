//! Seeder source assembly.
//!
//! Truncations run first and outside the transaction; every insert then runs
//! inside a single transaction with constraints deferred, so tables can be
//! seeded in any order regardless of foreign keys between them.

mod code;
pub mod template;
mod value;

pub use code::CodeWriter;
pub use value::{format_value, quote};

use crate::context::GenerationContext;
use crate::fetcher::TableDataset;
use template::{Insert, Preamble, Render, SeederClass, SeederFile, TransactionBlock, Truncate};

pub const DEFAULT_NAMESPACE: &str = "Database\\Seeders";
pub const DEFAULT_CLASS_PREFIX: &str = "CombinedDataSeeder";
pub const DEFAULT_EXTENSION: &str = "php";

/// Knobs for the generated class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeederOptions {
    pub namespace: String,
    pub class_prefix: String,
    /// Rows per `insert()` call; `None` inserts each table in one call.
    pub insert_chunk_size: Option<usize>,
}

impl Default for SeederOptions {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            class_prefix: DEFAULT_CLASS_PREFIX.to_string(),
            insert_chunk_size: None,
        }
    }
}

/// Build the template tree for a dataset.
pub fn build<'a>(
    dataset: &'a TableDataset,
    context: &'a GenerationContext,
    options: &'a SeederOptions,
) -> SeederFile<'a> {
    let truncates = dataset
        .iter()
        .map(|t| Truncate {
            table: t.name.as_str(),
        })
        .collect();
    let inserts = dataset
        .iter()
        .map(|table| Insert {
            table,
            chunk_size: options.insert_chunk_size,
        })
        .collect();

    SeederFile {
        preamble: Preamble {
            namespace: &options.namespace,
        },
        class: SeederClass {
            name: context.class_name(&options.class_prefix),
            generated_on: context.timestamp(),
            truncates,
            transaction: TransactionBlock { inserts },
        },
    }
}

/// Render the complete seeder source for a dataset.
pub fn assemble(
    dataset: &TableDataset,
    context: &GenerationContext,
    options: &SeederOptions,
) -> String {
    build(dataset, context, options).render_to_string()
}
