//! Path utilities

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::{Error, Result};

/// Fail with [`Error::InputMissing`] unless `path` exists.
pub fn require_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(Error::InputMissing {
            path: path.to_path_buf(),
        })
    }
}

/// Like [`require_exists`], and additionally reject directories.
pub fn require_file(path: &Path) -> Result<()> {
    require_exists(path)?;
    if path.is_file() {
        Ok(())
    } else {
        Err(Error::NotAFile {
            path: path.to_path_buf(),
        })
    }
}

/// Like [`require_exists`], and additionally reject regular files.
pub fn require_dir(path: &Path) -> Result<()> {
    require_exists(path)?;
    if path.is_dir() {
        Ok(())
    } else {
        Err(Error::NotADirectory {
            path: path.to_path_buf(),
        })
    }
}

/// Create `dir` and its ancestors.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| Error::PathCreation {
        path: dir.to_path_buf(),
        source,
    })
}

/// Create the directory that will hold the file `path`.
pub fn ensure_parent(path: &Path) -> Result<()> {
    match non_empty_parent(path) {
        Some(parent) => ensure_dir(parent),
        None => Ok(()),
    }
}

/// Delete a leftover output file so a failed run cannot be mistaken for success.
pub fn remove_stale(path: &Path) -> Result<()> {
    if path.is_file() {
        tracing::debug!("Removing stale output {}", path.display());
        fs::remove_file(path)?;
    }
    Ok(())
}

/// Best-effort removal of a partial output after a failure.
pub fn discard(path: &Path) {
    if path.is_file() {
        if let Err(e) = fs::remove_file(path) {
            tracing::warn!("Failed to remove partial output {}: {e}", path.display());
        }
    }
}

/// File name without its last extension (`app.apk` -> `app`).
pub fn file_stem_string(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Uniquely named scratch directory next to `path`, removed on drop.
///
/// Placing it beside the input keeps intermediate files on the same
/// filesystem as the artifacts they are derived from.
pub fn scratch_dir_beside(path: &Path) -> Result<TempDir> {
    let parent = non_empty_parent(path).map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    let dir = tempfile::Builder::new()
        .prefix(".apkforge-")
        .tempdir_in(&parent)
        .map_err(|source| Error::PathCreation {
            path: parent.clone(),
            source,
        })?;
    tracing::debug!("Scratch directory {}", dir.path().display());
    Ok(dir)
}

fn non_empty_parent(path: &Path) -> Option<&Path> {
    path.parent().filter(|p| !p.as_os_str().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_require_file_rejects_directory() {
        let dir = tempdir().unwrap();
        let err = require_file(dir.path()).unwrap_err();
        assert!(matches!(err, Error::NotAFile { .. }));

        let missing = dir.path().join("missing.jar");
        assert!(matches!(require_file(&missing), Err(Error::InputMissing { .. })));
    }

    #[test]
    fn test_ensure_parent_creates_nested_dirs() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("a/b/c/classes.dex");
        ensure_parent(&out).unwrap();
        assert!(dir.path().join("a/b/c").is_dir());
        assert!(!out.exists());
    }

    #[test]
    fn test_ensure_parent_of_bare_name() {
        ensure_parent(Path::new("classes.dex")).unwrap();
    }

    #[test]
    fn test_remove_stale() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out.jar");
        std::fs::write(&out, b"old").unwrap();
        remove_stale(&out).unwrap();
        assert!(!out.exists());
        remove_stale(&out).unwrap();
    }

    #[test]
    fn test_file_stem_string() {
        assert_eq!(file_stem_string(Path::new("/tmp/app-release.apk")), "app-release");
        assert_eq!(file_stem_string(Path::new("noext")), "noext");
    }

    #[test]
    fn test_scratch_dir_removed_on_drop() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("classes");
        let scratch = scratch_dir_beside(&input).unwrap();
        let scratch_path = scratch.path().to_path_buf();
        assert_eq!(scratch_path.parent().unwrap(), dir.path());
        drop(scratch);
        assert!(!scratch_path.exists());
    }

    #[test]
    fn test_scratch_dirs_are_unique() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("classes");
        let a = scratch_dir_beside(&input).unwrap();
        let b = scratch_dir_beside(&input).unwrap();
        assert_ne!(a.path(), b.path());
    }
}
