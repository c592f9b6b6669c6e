//! Writes the generated seeder to disk.

use crate::context::GenerationContext;
use crate::error::{Result, SeedgenError};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const WRITER_BUFFER_SIZE: usize = 64 * 1024;

/// Permissions for directories created on the way to the output file.
#[cfg(unix)]
pub const DIR_MODE: u32 = 0o755;

/// `<base>/<output_dir>/<prefix><timestamp>.<extension>`
pub fn seeder_path(
    base: &Path,
    output_dir: &Path,
    context: &GenerationContext,
    class_prefix: &str,
    extension: &str,
) -> PathBuf {
    base.join(output_dir).join(context.file_name(class_prefix, extension))
}

/// Create `dir` and any missing parents (rwxr-xr-x on unix).
pub fn ensure_dir(dir: &Path) -> std::io::Result<()> {
    if dir.as_os_str().is_empty() || dir.is_dir() {
        return Ok(());
    }
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }
    builder.create(dir)
}

/// Write `contents` to `path`, creating the parent directory if needed and
/// replacing any existing file.
pub fn write_seeder(path: &Path, contents: &str) -> Result<()> {
    write_file(path, contents).map_err(|source| SeedgenError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let file = File::create(path)?;
    let mut writer = BufWriter::with_capacity(WRITER_BUFFER_SIZE, file);
    writer.write_all(contents.as_bytes())?;
    writer.flush()
}
