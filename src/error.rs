//! Error taxonomy for seeder generation.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeedgenError {
    #[error("no tables left to export from schema '{schema}' (none found, or all excluded)")]
    DiscoveryEmpty { schema: String },
    #[error("table '{0}' does not exist")]
    MissingTable(String),
    #[error("No data found in any of the specified tables")]
    NoDataFound,
    #[error("cannot resolve database connection: {0}")]
    Connection(String),
    #[error("database error: {0}")]
    Database(#[from] postgres::Error),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("failed to read config file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },
    #[error("failed to write seeder {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, SeedgenError>;
