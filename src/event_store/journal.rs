//! Journal - optional on-disk record of every committed mutation
//!
//! Each `recorded` or `undone` record is appended as one JSON line and synced
//! before the in-memory state changes. Replaying the file in order rebuilds
//! every game log and aggregate exactly.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::{debug, error, warn};

use crate::error::JournalError;
use crate::types::LogRecord;

/// Result type for journal operations
pub type JournalResult<T> = Result<T, JournalError>;

/// Location of the journal
#[derive(Debug, Clone)]
pub struct JournalConfig {
    /// Path to the data directory
    pub data_dir: PathBuf,
}

impl JournalConfig {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    /// Get path to the journal file
    pub fn journal_path(&self) -> PathBuf {
        self.data_dir.join("scorebook.jsonl")
    }
}

/// Append-only JSONL journal
pub struct Journal {
    path: PathBuf,
    file: Mutex<File>,
}

impl Journal {
    /// Open (or create) the journal for appending
    ///
    /// An unterminated final line, left by a write that never finished, is
    /// cut off so the next record starts on a line of its own.
    pub fn open(config: &JournalConfig) -> JournalResult<Self> {
        let path = config.journal_path();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&path)?;

        let dropped = trim_torn_tail(&mut file)?;
        if dropped > 0 {
            warn!(path = %path.display(), bytes = dropped, "dropped unterminated journal tail");
        }

        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record and sync it to disk
    ///
    /// On failure the file is cut back to its previous length, so a record
    /// that was not acknowledged is never replayed.
    pub fn append(&self, record: &LogRecord) -> JournalResult<()> {
        let line = record.to_json_line()?;

        let mut file = self.file.lock();
        let start = file.metadata()?.len();

        if let Err(e) = write_line(&mut file, &line) {
            if let Err(trim) = file.set_len(start) {
                error!(path = %self.path.display(), error = %trim, "could not roll back failed journal write");
            }
            return Err(e.into());
        }

        debug!(game_id = %record.game_id(), "journal record written");
        Ok(())
    }

    /// Load all records, numbered by line
    ///
    /// Lines that fail to parse (e.g. a torn final write) are skipped with a
    /// warning; the remaining records are still returned.
    pub fn load(path: &Path) -> JournalResult<Vec<(usize, LogRecord)>> {
        if !path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(path)?);
        let mut records = Vec::new();

        for (index, line_result) in reader.lines().enumerate() {
            let line = line_result?;
            if line.trim().is_empty() {
                continue;
            }

            match LogRecord::from_json_line(&line) {
                Ok(record) => records.push((index + 1, record)),
                Err(e) => {
                    warn!(line = index + 1, error = %e, "skipping unreadable journal line");
                }
            }
        }

        Ok(records)
    }
}

fn write_line(file: &mut File, line: &str) -> std::io::Result<()> {
    writeln!(file, "{}", line)?;
    file.sync_all()
}

/// Truncate the file after its last newline; returns the bytes removed
fn trim_torn_tail(file: &mut File) -> JournalResult<u64> {
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(0);
    }

    let mut contents = Vec::with_capacity(len as usize);
    file.seek(SeekFrom::Start(0))?;
    file.read_to_end(&mut contents)?;
    if contents.last() == Some(&b'\n') {
        return Ok(0);
    }

    let keep = contents
        .iter()
        .rposition(|b| *b == b'\n')
        .map_or(0, |i| i + 1) as u64;
    file.set_len(keep)?;
    file.sync_all()?;
    Ok(len - keep)
}

#[cfg(test)]
impl Journal {
    /// A journal whose writes always fail
    pub(crate) fn open_read_only(config: &JournalConfig) -> JournalResult<Self> {
        let path = config.journal_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        OpenOptions::new().create(true).append(true).open(&path)?;
        let file = File::open(&path)?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }
}
