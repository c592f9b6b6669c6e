//! Configuration for the generate command.
//!
//! Values resolve as built-in defaults, then the YAML file, then flags.

use crate::error::{Result, SeedgenError};
use crate::fetcher::DEFAULT_STRIP_COLUMNS;
use crate::lister::{TableSelection, TEST_TABLES};
use crate::seeder::{SeederOptions, DEFAULT_EXTENSION};
use postgres::config::Host;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_SCHEMA: &str = "public";
pub const DEFAULT_DATABASE_PATH: &str = "database";
pub const DEFAULT_OUTPUT: &str = "seeders";
pub const DEFAULT_CONFIG_FILE: &str = "seedgen.yaml";
pub const DEFAULT_PG_PORT: u16 = 5432;

/// Optional YAML configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeedgenYamlConfig {
    pub database_url: Option<String>,
    pub schema: Option<String>,
    pub database_path: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub class_prefix: Option<String>,
    pub namespace: Option<String>,
    pub extension: Option<String>,
    pub test_tables: Option<Vec<String>>,
    pub exclude: Vec<String>,
    pub strip_columns: Option<Vec<String>>,
    pub insert_chunk_size: Option<usize>,
}

impl SeedgenYamlConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| SeedgenError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| SeedgenError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(content: &str) -> std::result::Result<Self, serde_yaml_ng::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml_ng::from_str(content)
    }
}

/// How to reach the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Connection {
    Url(String),
    /// Laravel-style `DB_*` settings.
    Params {
        host: String,
        port: u16,
        database: String,
        username: String,
        password: Option<String>,
    },
}

impl Connection {
    /// Resolve from an explicit URL, then `DATABASE_URL`, then Laravel's
    /// `DB_HOST`/`DB_PORT`/`DB_DATABASE`/`DB_USERNAME`/`DB_PASSWORD`.
    pub fn resolve<F>(explicit: Option<String>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = explicit.filter(|u| !u.trim().is_empty()) {
            return Ok(Connection::Url(url));
        }
        if let Some(url) = env("DATABASE_URL").filter(|u| !u.trim().is_empty()) {
            return Ok(Connection::Url(url));
        }
        if let Some(driver) = env("DB_CONNECTION") {
            if driver != "pgsql" {
                return Err(SeedgenError::Connection(format!(
                    "DB_CONNECTION is '{}', only pgsql is supported",
                    driver
                )));
            }
        }
        let Some(database) = env("DB_DATABASE") else {
            return Err(SeedgenError::Connection(
                "set --database-url, DATABASE_URL or DB_DATABASE".to_string(),
            ));
        };
        let port = match env("DB_PORT") {
            Some(p) => p.trim().parse::<u16>().map_err(|_| {
                SeedgenError::Connection(format!("invalid DB_PORT '{}'", p))
            })?,
            None => DEFAULT_PG_PORT,
        };
        Ok(Connection::Params {
            host: env("DB_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            database,
            username: env("DB_USERNAME").unwrap_or_else(|| "postgres".to_string()),
            password: env("DB_PASSWORD").filter(|p| !p.is_empty()),
        })
    }

    pub fn to_pg_config(&self) -> Result<postgres::Config> {
        match self {
            Connection::Url(url) => Ok(url.parse()?),
            Connection::Params {
                host,
                port,
                database,
                username,
                password,
            } => {
                let mut config = postgres::Config::new();
                config
                    .host(host)
                    .port(*port)
                    .dbname(database)
                    .user(username)
                    .application_name("seedgen");
                if let Some(password) = password {
                    config.password(password);
                }
                Ok(config)
            }
        }
    }

    /// Human-readable `host:port/database` target. Never includes the user
    /// or password, whichever form the connection string takes.
    pub fn describe(&self) -> String {
        let config = match self.to_pg_config() {
            Ok(config) => config,
            Err(_) => return "<unparseable connection string>".to_string(),
        };
        let ports = config.get_ports();
        let mut targets: Vec<String> = config
            .get_hosts()
            .iter()
            .enumerate()
            .map(|(i, host)| {
                let port = ports.get(i).or(ports.first()).copied();
                format!("{}:{}", host_label(host), port.unwrap_or(DEFAULT_PG_PORT))
            })
            .collect();
        if targets.is_empty() {
            let port = ports.first().copied().unwrap_or(DEFAULT_PG_PORT);
            targets.push(format!("localhost:{}", port));
        }
        match config.get_dbname() {
            Some(dbname) => format!("{}/{}", targets.join(","), dbname),
            None => targets.join(","),
        }
    }
}

fn host_label(host: &Host) -> String {
    match host {
        Host::Tcp(name) => name.clone(),
        #[cfg(unix)]
        Host::Unix(path) => path.display().to_string(),
    }
}

/// Fully resolved settings for one generate run.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub database_url: Option<String>,
    pub schema: String,
    pub database_path: PathBuf,
    pub output: PathBuf,
    pub extension: String,
    pub selection: TableSelection,
    pub exclude: Vec<String>,
    pub strip_columns: Vec<String>,
    /// Treat a missing table as an error instead of skipping it.
    pub strict: bool,
    pub seeder: SeederOptions,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            schema: DEFAULT_SCHEMA.to_string(),
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            output: PathBuf::from(DEFAULT_OUTPUT),
            extension: DEFAULT_EXTENSION.to_string(),
            selection: TableSelection::Catalog,
            exclude: Vec::new(),
            strip_columns: DEFAULT_STRIP_COLUMNS.iter().map(|c| c.to_string()).collect(),
            strict: false,
            seeder: SeederOptions::default(),
        }
    }
}

impl GenerateConfig {
    pub fn builder() -> GenerateConfigBuilder {
        GenerateConfigBuilder::default()
    }

    pub fn validate(&self) -> Result<()> {
        if self.schema.trim().is_empty() {
            return Err(SeedgenError::Config("schema must not be empty".into()));
        }
        if self.seeder.class_prefix.trim().is_empty() {
            return Err(SeedgenError::Config("class prefix must not be empty".into()));
        }
        if self.seeder.namespace.trim().is_empty() {
            return Err(SeedgenError::Config("namespace must not be empty".into()));
        }
        if self.extension.trim().is_empty() {
            return Err(SeedgenError::Config("extension must not be empty".into()));
        }
        if self.seeder.insert_chunk_size == Some(0) {
            return Err(SeedgenError::Config(
                "insert chunk size must be at least 1".into(),
            ));
        }
        if let TableSelection::Named(names) = &self.selection {
            if names.iter().all(|n| n.trim().is_empty()) {
                return Err(SeedgenError::Config("table list is empty".into()));
            }
        }
        Ok(())
    }

    pub fn connection(&self) -> Result<Connection> {
        Connection::resolve(self.database_url.clone(), |key| std::env::var(key).ok())
    }
}

/// Builder merging CLI flags over the YAML file.
#[derive(Debug, Default)]
pub struct GenerateConfigBuilder {
    config_file: Option<PathBuf>,
    database_url: Option<String>,
    schema: Option<String>,
    database_path: Option<PathBuf>,
    output: Option<PathBuf>,
    test: bool,
    tables: Option<Vec<String>>,
    exclude: Vec<String>,
    insert_chunk_size: Option<usize>,
    strict: bool,
}

impl GenerateConfigBuilder {
    pub fn config_file(mut self, path: Option<PathBuf>) -> Self {
        self.config_file = path;
        self
    }

    pub fn database_url(mut self, url: Option<String>) -> Self {
        self.database_url = url;
        self
    }

    pub fn schema(mut self, schema: Option<String>) -> Self {
        self.schema = schema;
        self
    }

    pub fn database_path(mut self, path: Option<PathBuf>) -> Self {
        self.database_path = path;
        self
    }

    pub fn output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }

    pub fn test(mut self, test: bool) -> Self {
        self.test = test;
        self
    }

    pub fn tables(mut self, tables: Option<Vec<String>>) -> Self {
        self.tables = tables;
        self
    }

    pub fn exclude(mut self, exclude: Vec<String>) -> Self {
        self.exclude = exclude;
        self
    }

    pub fn insert_chunk_size(mut self, size: Option<usize>) -> Self {
        self.insert_chunk_size = size;
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn build(self) -> Result<GenerateConfig> {
        let yaml = match &self.config_file {
            Some(path) => SeedgenYamlConfig::load(path)?,
            None => SeedgenYamlConfig::default(),
        };
        self.build_with(yaml)
    }

    /// Merge against an already-loaded YAML config.
    pub fn build_with(self, yaml: SeedgenYamlConfig) -> Result<GenerateConfig> {
        let defaults = GenerateConfig::default();

        let selection = if self.test {
            let tables = yaml
                .test_tables
                .unwrap_or_else(|| TEST_TABLES.iter().map(|t| t.to_string()).collect());
            TableSelection::Named(tables)
        } else if let Some(tables) = self.tables {
            TableSelection::Named(tables)
        } else {
            TableSelection::Catalog
        };

        let mut exclude = yaml.exclude;
        for table in self.exclude {
            if !exclude.contains(&table) {
                exclude.push(table);
            }
        }

        let config = GenerateConfig {
            database_url: self.database_url.or(yaml.database_url),
            schema: self.schema.or(yaml.schema).unwrap_or(defaults.schema),
            database_path: self
                .database_path
                .or(yaml.database_path)
                .unwrap_or(defaults.database_path),
            output: self.output.or(yaml.output).unwrap_or(defaults.output),
            extension: yaml.extension.unwrap_or(defaults.extension),
            selection,
            exclude,
            strip_columns: yaml.strip_columns.unwrap_or(defaults.strip_columns),
            strict: self.strict,
            seeder: SeederOptions {
                namespace: yaml.namespace.unwrap_or(defaults.seeder.namespace),
                class_prefix: yaml.class_prefix.unwrap_or(defaults.seeder.class_prefix),
                insert_chunk_size: self.insert_chunk_size.or(yaml.insert_chunk_size),
            },
        };
        config.validate()?;
        Ok(config)
    }
}

/// `seedgen.yaml` in the working directory, if present.
pub fn discover_config_file() -> Option<PathBuf> {
    let path = PathBuf::from(DEFAULT_CONFIG_FILE);
    path.is_file().then_some(path)
}
