use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use seedgen::catalog::PgCatalog;
use seedgen::config::{discover_config_file, GenerateConfig};
use seedgen::context::GenerationContext;
use seedgen::fetcher::Diagnostic;
use seedgen::generator::Generator;
use seedgen::lister::parse_table_list;
use serde::Serialize;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// JSON output for the generate command
#[derive(Serialize)]
struct GenerateJsonOutput {
    class_name: String,
    output_file: String,
    timestamp: String,
    dry_run: bool,
    statistics: GenerateStatistics,
    tables: Vec<TableSummary>,
    skipped: Vec<SkippedTable>,
}

#[derive(Serialize)]
struct GenerateStatistics {
    tables_requested: usize,
    tables_seeded: usize,
    total_records: usize,
    elapsed_secs: f64,
}

#[derive(Serialize)]
struct TableSummary {
    name: String,
    records: usize,
}

#[derive(Serialize)]
struct SkippedTable {
    name: String,
    reason: &'static str,
}

impl From<&Diagnostic> for SkippedTable {
    fn from(d: &Diagnostic) -> Self {
        let reason = match d {
            Diagnostic::MissingTable { .. } => "missing",
            Diagnostic::EmptyTable { .. } => "empty",
        };
        Self {
            name: d.table().to_string(),
            reason,
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub fn run(
    output: Option<PathBuf>,
    test: bool,
    tables: Option<String>,
    exclude: Option<String>,
    database_url: Option<String>,
    database_path: Option<PathBuf>,
    schema: Option<String>,
    config: Option<PathBuf>,
    strict: bool,
    chunk_size: Option<usize>,
    dry_run: bool,
    stdout: bool,
    progress: bool,
    json: bool,
) -> anyhow::Result<()> {
    // Laravel projects keep DB_* settings in .env
    dotenvy::dotenv().ok();

    let context = GenerationContext::now();
    let human = !json && !stdout;

    if human {
        println!("🌱 seedgen started 🔥");
    }

    let config = GenerateConfig::builder()
        .config_file(config.or_else(discover_config_file))
        .database_url(database_url)
        .schema(schema)
        .database_path(database_path)
        .output(output)
        .test(test)
        .tables(tables.as_deref().map(parse_table_list))
        .exclude(exclude.as_deref().map(parse_table_list).unwrap_or_default())
        .insert_chunk_size(chunk_size)
        .strict(strict)
        .build()?;

    let connection = config.connection()?;
    let mut catalog = PgCatalog::from_config(&connection.to_pg_config()?)
        .with_context(|| format!("failed to connect to {}", connection.describe()))?;

    let start = Instant::now();
    let generator = Generator::new(&config, context);
    let table_names = generator.resolve_tables(&mut catalog)?;

    if human {
        println!(
            "🌱 Generating combined seeder file for {} tables",
            table_names.len()
        );
    }

    let pb = if progress && human {
        let pb = ProgressBar::new(table_names.len() as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
            )?
            .progress_chars("█▓▒░  "),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let outcome = generator.fetch(&mut catalog, &table_names, |table| {
        if let Some(ref pb) = pb {
            pb.set_message(table.to_string());
            pb.inc(1);
        }
    })?;

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    if !json {
        for warning in outcome.warnings() {
            eprintln!("⚠️  {}", warning);
        }
    }
    if human {
        for table in &outcome.dataset {
            println!("📈 {}: {} records", table.name, table.record_count());
        }
    }

    generator.check(&outcome)?;
    let seeder = generator.render(&outcome.dataset)?;

    if stdout {
        print!("{}", seeder.source);
        return Ok(());
    }

    if !dry_run {
        seeder.write()?;
    }

    if json {
        let output = GenerateJsonOutput {
            class_name: seeder.class_name.clone(),
            output_file: seeder.path.display().to_string(),
            timestamp: generator.context().timestamp().to_string(),
            dry_run,
            statistics: GenerateStatistics {
                tables_requested: table_names.len(),
                tables_seeded: outcome.dataset.len(),
                total_records: outcome.dataset.total_rows(),
                elapsed_secs: start.elapsed().as_secs_f64(),
            },
            tables: outcome
                .dataset
                .iter()
                .map(|t| TableSummary {
                    name: t.name.clone(),
                    records: t.record_count(),
                })
                .collect(),
            skipped: outcome.diagnostics.iter().map(SkippedTable::from).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if dry_run {
        println!(
            "📝 Dry run: would generate combined seeder: {}",
            seeder.path.display()
        );
        println!("✅ seedgen completed successfully!");
    } else {
        println!("📝 Generated combined seeder: {}", seeder.path.display());
        println!("✅ seedgen completed successfully!");
    }

    Ok(())
}
