//! Run lock
//!
//! Keeps two scheduled runs from interleaving reads and writes of the
//! state file and queue.

use crate::error::{AppError, Result, StoreError};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Exclusive advisory lock on a file, held until drop
///
/// The kernel releases the lock when the process exits, so a run killed by
/// the shutdown it triggered leaves nothing to clean up. The file's content
/// is the owner's PID and is only used in messages.
#[derive(Debug)]
pub struct RunLock {
    file: File,
    path: PathBuf,
}

impl RunLock {
    /// Take the lock at `path` without blocking
    pub fn acquire(path: &Path) -> Result<Self> {
        if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|source| StoreError::CreateDir {
                path: dir.display().to_string(),
                source,
            })?;
        }

        // Not truncated on open: a held lock's PID must stay readable
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;

        if let Err(e) = file.try_lock_exclusive() {
            if e.kind() != fs2::lock_contended_error().kind() {
                return Err(e.into());
            }
            return Err(AppError::AlreadyRunning {
                owner: read_owner(&mut file)
                    .map(|pid| format!("pid {}", pid))
                    .unwrap_or_else(|| "unknown pid".to_string()),
                path: path.display().to_string(),
            });
        }

        file.set_len(0)?;
        file.seek(SeekFrom::Start(0))?;
        writeln!(file, "{}", std::process::id())?;
        file.sync_all()?;

        log::debug!("Acquired lock {}", path.display());
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    /// PID recorded in a lock file
    pub fn owner(path: &Path) -> Option<u32> {
        std::fs::read_to_string(path).ok()?.trim().parse().ok()
    }

    /// Path of the lock file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn read_owner(file: &mut File) -> Option<u32> {
    let mut content = String::new();
    file.read_to_string(&mut content).ok()?;
    content.trim().parse().ok()
}

impl Drop for RunLock {
    fn drop(&mut self) {
        // The file stays; removing it would race with a run opening it
        if let Err(e) = FileExt::unlock(&self.file) {
            log::warn!("Failed to release lock {}: {}", self.path.display(), e);
        } else {
            log::debug!("Released lock {}", self.path.display());
        }
    }
}
