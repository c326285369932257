//! Pending notification queue
//!
//! Newline-delimited messages, appended on delivery failure and removed
//! only once the whole batch has been delivered.

use crate::error::StoreError;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Durable FIFO of undelivered messages
#[derive(Debug, Clone)]
pub struct PendingQueue {
    path: PathBuf,
}

impl PendingQueue {
    /// Create a queue backed by `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all pending messages in FIFO order
    pub fn load(&self) -> Result<Vec<String>, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.display().to_string(),
                    source,
                })
            }
        };

        Ok(content
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Number of pending messages
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.load()?.len())
    }

    /// Whether the queue holds no messages
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    /// Append one message
    ///
    /// Embedded newlines are flattened so one message stays one line.
    pub fn append(&self, message: &str) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|source| StoreError::CreateDir {
                path: dir.display().to_string(),
                source,
            })?;
        }

        let write_err = |source| StoreError::Write {
            path: self.path.display().to_string(),
            source,
        };

        let mut file = OpenOptions::new()
            .read(true)
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(write_err)?;

        // A write cut short by power loss leaves no trailing newline
        let mut line = String::new();
        if !ends_with_newline(&mut file).map_err(write_err)? {
            log::warn!("{} ends with a partial line, starting a new one", self.path.display());
            line.push('\n');
        }
        line.push_str(&flatten(message));
        line.push('\n');
        file.write_all(line.as_bytes()).map_err(write_err)?;
        file.sync_all().map_err(write_err)?;

        log::debug!("Appended message to {}", self.path.display());
        Ok(())
    }

    /// Drop every pending message
    pub fn clear(&self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Write {
                path: self.path.display().to_string(),
                source,
            }),
        }
    }
}

/// Whether the file is empty or its last byte is a newline
fn ends_with_newline(file: &mut File) -> std::io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(true);
    }
    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

fn flatten(message: &str) -> String {
    message
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let queue = PendingQueue::new(dir.path().join("pending"));
        assert!(queue.load().unwrap().is_empty());
        assert!(queue.is_empty().unwrap());
    }

    #[test]
    fn test_append_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let queue = PendingQueue::new(dir.path().join("pending"));
        queue.append("first").unwrap();
        queue.append("second").unwrap();
        queue.append("third").unwrap();
        assert_eq!(queue.load().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_append_after_torn_write_starts_new_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pending");
        std::fs::write(&path, "first\n[nas01] WARNING: UPS swi").unwrap();

        let queue = PendingQueue::new(path.clone());
        queue.append("second").unwrap();

        assert_eq!(
            queue.load().unwrap(),
            vec!["first", "[nas01] WARNING: UPS swi", "second"]
        );
    }

    #[test]
    fn test_append_flattens_newlines() {
        let dir = tempfile::tempdir().unwrap();
        let queue = PendingQueue::new(dir.path().join("pending"));
        queue.append("line one\nline two\n").unwrap();
        assert_eq!(queue.load().unwrap(), vec!["line one line two"]);
    }

    #[test]
    fn test_clear() {
        let dir = tempfile::tempdir().unwrap();
        let queue = PendingQueue::new(dir.path().join("pending"));
        queue.append("message").unwrap();
        queue.clear().unwrap();
        assert!(queue.is_empty().unwrap());
        // Clearing twice is fine
        queue.clear().unwrap();
    }
}
