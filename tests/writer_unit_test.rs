//! Unit tests for the seeder file writer.

use seedgen::context::GenerationContext;
use seedgen::writer::{ensure_dir, seeder_path, write_seeder};
use seedgen::SeedgenError;
use std::path::Path;
use tempfile::TempDir;

#[test]
fn test_seeder_path() {
    let ctx = GenerationContext::with_timestamp("20240101000000");
    let path = seeder_path(
        Path::new("database"),
        Path::new("seeders"),
        &ctx,
        "CombinedDataSeeder",
        "php",
    );
    assert_eq!(
        path,
        Path::new("database/seeders/CombinedDataSeeder20240101000000.php")
    );
}

#[test]
fn test_write_creates_missing_parents() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("a/b/c/Seeder.php");

    write_seeder(&file_path, "<?php\n").unwrap();

    assert_eq!(std::fs::read_to_string(&file_path).unwrap(), "<?php\n");
}

#[test]
fn test_write_overwrites_existing_file() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("Seeder.php");
    std::fs::write(&file_path, "old contents that are longer").unwrap();

    write_seeder(&file_path, "new").unwrap();

    assert_eq!(std::fs::read_to_string(&file_path).unwrap(), "new");
}

#[test]
fn test_ensure_dir_existing_is_ok() {
    let temp_dir = TempDir::new().unwrap();
    ensure_dir(temp_dir.path()).unwrap();
    ensure_dir(Path::new("")).unwrap();
}

#[cfg(unix)]
#[test]
fn test_created_dir_mode() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join("seeders");
    ensure_dir(&dir).unwrap();

    let mode = std::fs::metadata(&dir).unwrap().permissions().mode() & 0o777;
    // umask can only remove bits
    assert_eq!(mode & !0o755, 0);
    assert_eq!(mode & 0o700, 0o700);
}

#[test]
fn test_write_error_names_path() {
    let temp_dir = TempDir::new().unwrap();
    let blocker = temp_dir.path().join("blocker");
    std::fs::write(&blocker, "").unwrap();
    let file_path = blocker.join("Seeder.php");

    let err = write_seeder(&file_path, "x").unwrap_err();

    match err {
        SeedgenError::Write { path, .. } => assert_eq!(path, file_path),
        other => panic!("unexpected error: {other}"),
    }
}
