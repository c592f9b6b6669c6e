//! End-to-end tests of the generate pipeline against an in-memory catalog.

use seedgen::catalog::MemoryCatalog;
use seedgen::config::{GenerateConfig, SeedgenYamlConfig};
use seedgen::context::GenerationContext;
use seedgen::fetcher::{Diagnostic, Row};
use seedgen::generator::Generator;
use seedgen::SeedgenError;
use std::path::PathBuf;
use tempfile::TempDir;

const TS: &str = "20240315093000";

fn config_for(dir: &TempDir, test: bool, tables: Option<&[&str]>) -> GenerateConfig {
    GenerateConfig::builder()
        .database_path(Some(dir.path().to_path_buf()))
        .test(test)
        .tables(tables.map(|t| t.iter().map(|s| s.to_string()).collect()))
        .build_with(SeedgenYamlConfig::default())
        .unwrap()
}

fn accounts() -> Vec<Row> {
    vec![Row::new()
        .with("account_id", 1i64)
        .with("name", "O'Brien")
        .with("created_at", "2024-01-01 00:00:00")
        .with("updated_at", None::<String>)]
}

#[test]
fn test_mode_concrete_scenario() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir, true, None);
    let mut catalog = MemoryCatalog::new()
        .with_table("accounts", accounts())
        .with_table("company_types", vec![]);

    let generation = Generator::new(&config, GenerationContext::with_timestamp(TS))
        .run(&mut catalog)
        .unwrap();

    assert_eq!(generation.tables, vec!["accounts", "company_types"]);
    assert_eq!(generation.fetch.dataset.table_names(), vec!["accounts"]);
    assert_eq!(
        generation.fetch.diagnostics,
        vec![Diagnostic::EmptyTable {
            table: "company_types".into()
        }]
    );

    let source = &generation.seeder.source;
    assert!(source.contains(r"['name' => 'O\'Brien'],"));
    assert!(source.contains("DB::table('accounts')->truncate();"));
    assert!(!source.contains("company_types"));
    assert!(!source.contains("account_id"));
    assert!(!source.contains("created_at"));
    assert!(!source.contains("updated_at"));
}

#[test]
fn test_class_name_and_path_share_timestamp() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir, true, None);
    let mut catalog = MemoryCatalog::new().with_table("accounts", accounts());

    let generation = Generator::new(&config, GenerationContext::with_timestamp(TS))
        .run(&mut catalog)
        .unwrap();

    assert_eq!(generation.seeder.class_name, format!("CombinedDataSeeder{TS}"));
    assert_eq!(
        generation.seeder.path,
        dir.path()
            .join("seeders")
            .join(format!("CombinedDataSeeder{TS}.php"))
    );
    assert!(generation
        .seeder
        .source
        .contains(&format!("class CombinedDataSeeder{TS} extends Seeder")));
    assert!(generation
        .seeder
        .source
        .contains(&format!("Generated on: {TS}")));
}

#[test]
fn test_missing_table_is_skipped() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir, false, Some(&["users", "ghosts", "posts"]));
    let mut catalog = MemoryCatalog::new()
        .with_table("users", vec![Row::new().with("email", "a@example.com")])
        .with_table("posts", vec![Row::new().with("title", "Hello")]);

    let generation = Generator::new(&config, GenerationContext::with_timestamp(TS))
        .run(&mut catalog)
        .unwrap();

    assert_eq!(generation.fetch.dataset.table_names(), vec!["users", "posts"]);
    let warnings: Vec<_> = generation.fetch.warnings().collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].table(), "ghosts");
    // Existence is checked before any read.
    assert_eq!(catalog.fetched(), ["users", "posts"]);
}

#[test]
fn test_strict_mode_rejects_missing_table() {
    let dir = TempDir::new().unwrap();
    let config = GenerateConfig::builder()
        .database_path(Some(dir.path().to_path_buf()))
        .tables(Some(vec!["users".into(), "ghosts".into()]))
        .strict(true)
        .build_with(SeedgenYamlConfig::default())
        .unwrap();
    let mut catalog =
        MemoryCatalog::new().with_table("users", vec![Row::new().with("email", "a@b.c")]);

    let err = Generator::new(&config, GenerationContext::with_timestamp(TS))
        .run(&mut catalog)
        .unwrap_err();

    assert!(matches!(err, SeedgenError::MissingTable(ref t) if t == "ghosts"));
}

#[test]
fn test_all_empty_aborts_without_writing() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir, true, None);
    let mut catalog = MemoryCatalog::new()
        .with_table("accounts", vec![])
        .with_table("company_types", vec![]);

    let err = Generator::new(&config, GenerationContext::with_timestamp(TS))
        .run(&mut catalog)
        .unwrap_err();

    assert!(matches!(err, SeedgenError::NoDataFound));
    assert!(!dir.path().join("seeders").exists());
}

#[test]
fn test_empty_catalog_is_discovery_empty() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir, false, None);
    let mut catalog = MemoryCatalog::new();

    let err = Generator::new(&config, GenerationContext::with_timestamp(TS))
        .run(&mut catalog)
        .unwrap_err();

    assert!(matches!(err, SeedgenError::DiscoveryEmpty { ref schema } if schema == "public"));
}

#[test]
fn test_excluding_every_test_table_is_reported() {
    let dir = TempDir::new().unwrap();
    let config = GenerateConfig::builder()
        .database_path(Some(dir.path().to_path_buf()))
        .test(true)
        .exclude(vec!["accounts".into(), "company_types".into()])
        .build_with(SeedgenYamlConfig::default())
        .unwrap();
    let mut catalog = MemoryCatalog::new().with_table("accounts", accounts());

    let err = Generator::new(&config, GenerationContext::with_timestamp(TS))
        .run(&mut catalog)
        .unwrap_err();

    assert!(matches!(err, SeedgenError::DiscoveryEmpty { .. }));
    assert!(err.to_string().contains("all excluded"));
    assert!(catalog.fetched().is_empty());
}

#[test]
fn test_order_is_preserved() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir, false, Some(&["zebras", "apples", "mangos"]));
    let mut catalog = MemoryCatalog::new();
    for name in ["apples", "mangos", "zebras"] {
        catalog.insert_table(name, vec![Row::new().with("label", name)]);
    }

    let source = Generator::new(&config, GenerationContext::with_timestamp(TS))
        .run(&mut catalog)
        .unwrap()
        .seeder
        .source;

    let positions = |needle: &str| -> Vec<usize> {
        ["zebras", "apples", "mangos"]
            .iter()
            .map(|t| source.find(&needle.replace("{}", t)).unwrap())
            .collect()
    };
    let truncates = positions("DB::table('{}')->truncate();");
    let inserts = positions("DB::table('{}')->insert([");
    assert!(truncates.windows(2).all(|w| w[0] < w[1]));
    assert!(inserts.windows(2).all(|w| w[0] < w[1]));
    assert!(truncates[2] < inserts[0]);
}

#[test]
fn test_catalog_mode_is_alphabetical_with_exclusions() {
    let dir = TempDir::new().unwrap();
    let config = GenerateConfig::builder()
        .database_path(Some(dir.path().to_path_buf()))
        .exclude(vec!["migrations".into()])
        .build_with(SeedgenYamlConfig::default())
        .unwrap();
    let mut catalog = MemoryCatalog::new()
        .with_table("users", vec![Row::new().with("email", "a@example.com")])
        .with_table("migrations", vec![Row::new().with("migration", "init")])
        .with_table("accounts", accounts());

    let generation = Generator::new(&config, GenerationContext::with_timestamp(TS))
        .run(&mut catalog)
        .unwrap();

    assert_eq!(generation.tables, vec!["accounts", "users"]);
    assert!(!generation.seeder.source.contains("migrations"));
}

#[test]
fn test_redaction_holds_for_every_row() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir, false, Some(&["company_types", "categories"]));
    let company_types = (1..=3)
        .map(|i| {
            Row::new()
                .with("company_type_id", i as i64)
                .with("label", format!("type {i}"))
                .with("created_at", "2024-01-01")
                .with("updated_at", "2024-01-02")
        })
        .collect();
    let categories = (1..=2)
        .map(|i| {
            Row::new()
                .with("category_id", i as i64)
                .with("slug", format!("c{i}"))
        })
        .collect();
    let mut catalog = MemoryCatalog::new()
        .with_table("company_types", company_types)
        .with_table("categories", categories);

    let generation = Generator::new(&config, GenerationContext::with_timestamp(TS))
        .run(&mut catalog)
        .unwrap();

    for table in &generation.fetch.dataset {
        let key = seedgen::inflect::primary_key_for(&table.name);
        for row in &table.rows {
            assert!(!row.contains("created_at"));
            assert!(!row.contains("updated_at"));
            assert!(!row.contains(&key), "{} kept {}", table.name, key);
        }
    }
}

#[test]
fn test_write_creates_directory_and_overwrites() {
    let dir = TempDir::new().unwrap();
    let config = GenerateConfig::builder()
        .database_path(Some(dir.path().join("database")))
        .output(Some(PathBuf::from("nested/seeders")))
        .test(true)
        .build_with(SeedgenYamlConfig::default())
        .unwrap();
    let mut catalog = MemoryCatalog::new().with_table("accounts", accounts());
    let generator = Generator::new(&config, GenerationContext::with_timestamp(TS));

    let generation = generator.run(&mut catalog).unwrap();
    std::fs::create_dir_all(generation.seeder.path.parent().unwrap()).unwrap();
    std::fs::write(&generation.seeder.path, "stale").unwrap();

    generation.seeder.write().unwrap();

    let written = std::fs::read_to_string(&generation.seeder.path).unwrap();
    assert_eq!(written, generation.seeder.source);
    assert!(generation
        .seeder
        .path
        .starts_with(dir.path().join("database").join("nested").join("seeders")));
}

#[test]
fn test_chunked_inserts() {
    let dir = TempDir::new().unwrap();
    let config = GenerateConfig::builder()
        .database_path(Some(dir.path().to_path_buf()))
        .tables(Some(vec!["numbers".into()]))
        .insert_chunk_size(Some(2))
        .build_with(SeedgenYamlConfig::default())
        .unwrap();
    let rows = (0..5).map(|i| Row::new().with("n", i as i64)).collect();
    let mut catalog = MemoryCatalog::new().with_table("numbers", rows);

    let generation = Generator::new(&config, GenerationContext::with_timestamp(TS))
        .run(&mut catalog)
        .unwrap();

    assert_eq!(
        generation
            .seeder
            .source
            .matches("DB::table('numbers')->insert([")
            .count(),
        3
    );
    assert_eq!(generation.seeder.source.matches("'n' => ").count(), 5);
}
