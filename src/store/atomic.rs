//! Full-file replacement via temp file + rename

use crate::error::StoreError;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Contents written to a temp file next to the target, not yet visible
///
/// Dropping a `StagedWrite` without committing removes the temp file and
/// leaves the target untouched.
pub struct StagedWrite {
    file: NamedTempFile,
    target: PathBuf,
}

impl StagedWrite {
    /// Write `contents` to a temp file in the target's directory
    pub fn stage(target: &Path, contents: &str) -> Result<Self, StoreError> {
        let dir = parent_dir(target);
        std::fs::create_dir_all(&dir).map_err(|source| StoreError::CreateDir {
            path: dir.display().to_string(),
            source,
        })?;

        let write_err = |source| StoreError::Write {
            path: target.display().to_string(),
            source,
        };

        let mut file = NamedTempFile::new_in(&dir).map_err(write_err)?;
        file.write_all(contents.as_bytes()).map_err(write_err)?;
        file.as_file().sync_all().map_err(write_err)?;

        Ok(Self {
            file,
            target: target.to_path_buf(),
        })
    }

    /// Atomically move the temp file over the target
    ///
    /// Readers see either the old or the new file, never a partial one.
    pub fn commit(self) -> Result<(), StoreError> {
        let target = self.target;
        self.file
            .persist(&target)
            .map_err(|e| StoreError::Write {
                path: target.display().to_string(),
                source: e.error,
            })?;
        Ok(())
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
