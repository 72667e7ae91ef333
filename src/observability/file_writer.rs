//! Append-only trace file with numbered backups.
//!
//! Once the live file grows past the size limit it is shifted to `<file>.1`,
//! the previous `.1` becomes `.2`, and so on. At most [`MAX_BACKUPS`] backups
//! are kept; the oldest falls off the end.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Live file size that triggers a rotation (10 MiB).
pub const MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// Backups kept next to the live file.
pub const MAX_BACKUPS: usize = 3;

pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    handle: Mutex<Option<File>>,
}

impl RotatingFile {
    pub const fn new(path: PathBuf) -> Self {
        Self::with_limit(path, MAX_FILE_BYTES)
    }

    pub const fn with_limit(path: PathBuf, max_bytes: u64) -> Self {
        Self {
            path,
            max_bytes,
            handle: Mutex::new(None),
        }
    }

    /// Appends `line` plus a newline, rotating first if the file is full.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if rotating, opening or writing fails.
    pub fn append_line(&self, line: &str) -> io::Result<()> {
        let mut handle = self
            .handle
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("trace file lock poisoned: {e}")))?;

        if self.is_full() {
            *handle = None;
            self.rotate()?;
        }

        let file = match handle.take() {
            Some(file) => file,
            None => OpenOptions::new().create(true).append(true).open(&self.path)?,
        };
        let file = handle.insert(file);

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn is_full(&self) -> bool {
        fs::metadata(&self.path).is_ok_and(|meta| meta.len() > self.max_bytes)
    }

    /// Shifts `.N` to `.N+1` from the oldest down, then moves the live file
    /// to `.1`.
    fn rotate(&self) -> io::Result<()> {
        let oldest = backup_path(&self.path, MAX_BACKUPS);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }

        for n in (1..MAX_BACKUPS).rev() {
            let from = backup_path(&self.path, n);
            if from.exists() {
                fs::rename(&from, backup_path(&self.path, n + 1))?;
            }
        }

        if self.path.exists() {
            fs::rename(&self.path, backup_path(&self.path, 1))?;
        }
        Ok(())
    }
}

/// `<file>.<n>`, e.g. `pantry-otlp.json.2`.
pub fn backup_path(path: &Path, n: usize) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(format!(".{n}"));
    PathBuf::from(name)
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("path", &self.path)
            .field("max_bytes", &self.max_bytes)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn appends_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trace.json");
        let file = RotatingFile::new(path.clone());

        file.append_line("{\"a\":1}").unwrap();
        file.append_line("{\"b\":2}").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"a\":1}\n{\"b\":2}\n");
    }

    #[test]
    fn rotation_keeps_three_numbered_backups() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trace.json");
        let file = RotatingFile::with_limit(path.clone(), 4);

        for line in ["first", "second", "third", "fourth", "fifth"] {
            file.append_line(line).unwrap();
        }

        assert_eq!(fs::read_to_string(&path).unwrap(), "fifth\n");
        assert_eq!(fs::read_to_string(backup_path(&path, 1)).unwrap(), "fourth\n");
        assert_eq!(fs::read_to_string(backup_path(&path, 3)).unwrap(), "second\n");
        assert!(!backup_path(&path, 4).exists());
    }

    #[test]
    fn backup_names_are_suffixed() {
        let path = Path::new("/data/pantry-otlp.json");
        assert_eq!(backup_path(path, 2), PathBuf::from("/data/pantry-otlp.json.2"));
    }
}
