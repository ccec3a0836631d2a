//! ZIP helpers for APK and smali archives

use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;

use zip::{ZipArchive, ZipWriter};

use crate::error::Result;

/// Copy every entry of the archive at `source` into `dest`, except entries
/// whose name starts with `prefix`. Returns how many entries were dropped.
///
/// Entries are copied raw, so compressed data is never re-encoded.
pub fn strip_entries<W: Write + Seek>(source: &Path, dest: W, prefix: &str) -> Result<usize> {
    let mut archive = ZipArchive::new(File::open(source)?)?;
    let mut writer = ZipWriter::new(dest);
    let mut removed = 0;

    for i in 0..archive.len() {
        let entry = archive.by_index_raw(i)?;
        if entry.name().starts_with(prefix) {
            tracing::trace!("Dropping {}", entry.name());
            removed += 1;
            continue;
        }
        writer.raw_copy_file(entry)?;
    }

    writer.finish()?;
    Ok(removed)
}

/// Extract a ZIP archive into `dest_dir`. Entries escaping the target
/// directory are rejected by the zip crate.
pub fn extract_archive(source: &Path, dest_dir: &Path) -> Result<()> {
    let mut archive = ZipArchive::new(File::open(source)?)?;
    archive.extract(dest_dir)?;
    Ok(())
}
