mod generate;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "seedgen")]
#[command(version)]
#[command(
    about = "Generate a Laravel seeder file from existing PostgreSQL table data",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Capture table contents into a combined seeder class
    Generate {
        /// Output directory, relative to the database path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Test mode: only export the fixture tables (accounts, company_types)
        #[arg(short, long, conflicts_with = "tables")]
        test: bool,

        /// Only export specific tables (comma-separated, order preserved)
        #[arg(long)]
        tables: Option<String>,

        /// Exclude specific tables (comma-separated)
        #[arg(short = 'x', long)]
        exclude: Option<String>,

        /// PostgreSQL connection string (default: DATABASE_URL, then DB_* variables)
        #[arg(long)]
        database_url: Option<String>,

        /// Base path the output directory is relative to
        #[arg(long)]
        database_path: Option<PathBuf>,

        /// Schema to introspect
        #[arg(long)]
        schema: Option<String>,

        /// YAML config file (default: seedgen.yaml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Fail if a requested table does not exist
        #[arg(long)]
        strict: bool,

        /// Split each table's insert into calls of at most this many rows
        #[arg(long)]
        chunk_size: Option<usize>,

        /// Preview without writing files (dry run)
        #[arg(long)]
        dry_run: bool,

        /// Print the generated seeder to stdout instead of writing it
        #[arg(long, conflicts_with = "json")]
        stdout: bool,

        /// Show progress while reading tables
        #[arg(short, long)]
        progress: bool,

        /// Output a JSON summary instead of human-readable text
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            output,
            test,
            tables,
            exclude,
            database_url,
            database_path,
            schema,
            config,
            strict,
            chunk_size,
            dry_run,
            stdout,
            progress,
            json,
        } => generate::run(
            output,
            test,
            tables,
            exclude,
            database_url,
            database_path,
            schema,
            config,
            strict,
            chunk_size,
            dry_run,
            stdout,
            progress,
            json,
        ),
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "seedgen", &mut io::stdout());
            Ok(())
        }
    }
}
