//! The generate pipeline: list tables, fetch rows, assemble, write.
//!
//! Each stage only consumes the output of the previous one. Nothing is
//! written to disk until [`SeederOutput::write`] is called, so callers can
//! render for a dry run or stdout without touching the filesystem.

use crate::catalog::Catalog;
use crate::config::GenerateConfig;
use crate::context::GenerationContext;
use crate::error::{Result, SeedgenError};
use crate::fetcher::{FetchOutcome, RowFetcher, TableDataset};
use crate::lister::{exclude_tables, list_tables};
use crate::seeder;
use crate::writer::{seeder_path, write_seeder};
use std::path::PathBuf;

/// Rendered seeder and where it belongs.
#[derive(Debug, Clone)]
pub struct SeederOutput {
    pub class_name: String,
    pub path: PathBuf,
    pub source: String,
}

impl SeederOutput {
    pub fn write(&self) -> Result<()> {
        write_seeder(&self.path, &self.source)
    }
}

/// Everything a completed (unwritten) run produced.
#[derive(Debug, Clone)]
pub struct Generation {
    pub tables: Vec<String>,
    pub fetch: FetchOutcome,
    pub seeder: SeederOutput,
}

pub struct Generator<'a> {
    config: &'a GenerateConfig,
    context: GenerationContext,
}

impl<'a> Generator<'a> {
    pub fn new(config: &'a GenerateConfig, context: GenerationContext) -> Self {
        Self { config, context }
    }

    pub fn context(&self) -> &GenerationContext {
        &self.context
    }

    /// Tables to export after exclusions. Errors when nothing is left.
    pub fn resolve_tables<C: Catalog>(&self, catalog: &mut C) -> Result<Vec<String>> {
        let tables = list_tables(catalog, &self.config.selection, &self.config.schema)?;
        let tables = exclude_tables(tables, &self.config.exclude);
        if tables.is_empty() {
            return Err(SeedgenError::DiscoveryEmpty {
                schema: self.config.schema.clone(),
            });
        }
        Ok(tables)
    }

    /// Read every table in order, reporting each name to `progress` first.
    pub fn fetch<C, F>(
        &self,
        catalog: &mut C,
        tables: &[String],
        progress: F,
    ) -> Result<FetchOutcome>
    where
        C: Catalog,
        F: Fn(&str),
    {
        RowFetcher::new(catalog, self.config.schema.as_str())
            .with_strip_columns(self.config.strip_columns.clone())
            .with_progress(progress)
            .fetch_all(tables)
    }

    /// In strict mode, fail on the first table that was not found.
    pub fn check(&self, outcome: &FetchOutcome) -> Result<()> {
        if self.config.strict {
            if let Some(missing) = outcome.warnings().next() {
                return Err(SeedgenError::MissingTable(missing.table().to_string()));
            }
        }
        Ok(())
    }

    pub fn render(&self, dataset: &TableDataset) -> Result<SeederOutput> {
        if dataset.is_empty() {
            return Err(SeedgenError::NoDataFound);
        }
        let options = &self.config.seeder;
        Ok(SeederOutput {
            class_name: self.context.class_name(&options.class_prefix),
            path: seeder_path(
                &self.config.database_path,
                &self.config.output,
                &self.context,
                &options.class_prefix,
                &self.config.extension,
            ),
            source: seeder::assemble(dataset, &self.context, options),
        })
    }

    /// Run every stage except the final write.
    pub fn run<C: Catalog>(&self, catalog: &mut C) -> Result<Generation> {
        let tables = self.resolve_tables(catalog)?;
        let fetch = self.fetch(catalog, &tables, |_| {})?;
        self.check(&fetch)?;
        let seeder = self.render(&fetch.dataset)?;
        Ok(Generation {
            tables,
            fetch,
            seeder,
        })
    }
}
