//! History store (spec §4.7, §3): an in-memory ordered log of accepted
//! command lines, optionally persisted to the file named by `HISTFILE`.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// One recorded command line. Its 1-based position in [`HistoryStore`] is
/// implicit in its index, not stored redundantly.
pub type HistoryEntry = String;

/// Ordered log of accepted lines, with a high-water mark tracking how much
/// has already been flushed via `history -a` (spec §4.5).
#[derive(Debug, Default, Clone)]
pub struct HistoryStore {
    entries: Vec<HistoryEntry>,
    appended_mark: usize,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `HISTFILE` if set and readable. I/O errors are reported to the
    /// caller for logging but never abort startup.
    pub fn load_from_env(&mut self) -> Option<io::Error> {
        let path = std::env::var("HISTFILE").ok()?;
        self.load_file(&path).err()
    }

    pub fn load_file(&mut self, path: impl AsRef<Path>) -> io::Result<()> {
        let contents = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e),
        };
        for line in contents.lines() {
            if !line.is_empty() {
                self.entries.push(line.to_string());
            }
        }
        Ok(())
    }

    /// Appends `line` if non-empty. Returns the entry's 1-based index.
    pub fn push(&mut self, line: &str) -> Option<usize> {
        if line.is_empty() {
            return None;
        }
        self.entries.push(line.to_string());
        Some(self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries with their 1-based index.
    pub fn all(&self) -> impl Iterator<Item = (usize, &str)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| (i + 1, e.as_str()))
    }

    /// The last `n` entries with their 1-based index.
    pub fn last_n(&self, n: usize) -> impl Iterator<Item = (usize, &str)> {
        let start = self.entries.len().saturating_sub(n);
        self.entries[start..]
            .iter()
            .enumerate()
            .map(move |(i, e)| (start + i + 1, e.as_str()))
    }

    /// Overwrites `path` with the full store, one entry per line
    /// (`history -w`). Does not advance the `-a` high-water mark.
    pub fn write_file(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(entry);
            out.push('\n');
        }
        fs::write(path, out)
    }

    /// Appends the unwritten portion of the store to `path`
    /// (`history -a`), then advances the high-water mark.
    pub fn append_file(&mut self, path: impl AsRef<Path>) -> io::Result<()> {
        let unwritten = &self.entries[self.appended_mark..];
        if !unwritten.is_empty() {
            let mut out = String::new();
            for entry in unwritten {
                out.push_str(entry);
                out.push('\n');
            }
            let mut f = fs::OpenOptions::new().create(true).append(true).open(path)?;
            f.write_all(out.as_bytes())?;
        }
        self.appended_mark = self.entries.len();
        Ok(())
    }

    /// Appends each non-empty line of `path` to the store (`history -r`).
    pub fn read_file(&mut self, path: impl AsRef<Path>) -> io::Result<()> {
        let contents = fs::read_to_string(path)?;
        for line in contents.lines() {
            if !line.is_empty() {
                self.entries.push(line.to_string());
            }
        }
        Ok(())
    }

    /// Saves the full store to `HISTFILE` if set. I/O errors are reported
    /// to the caller for logging but never block shutdown.
    pub fn save_to_env(&self) -> Option<io::Error> {
        let path = std::env::var("HISTFILE").ok()?;
        self.write_file(&path).err()
    }
}
