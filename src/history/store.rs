//! History log persistence: whole-file read, append, bounded rewrite

use std::fs::{self, File};
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;

use crate::models::HistoryEntry;
use crate::utils::{format_path_with_tilde, validate_file_size};

/// Maximum number of entries kept in the log
pub const MAX_HISTORY_ENTRIES: usize = 50;

pub const HISTORY_FILENAME: &str = "history.json";

/// JSON history log stored as a single array
///
/// Every save reads the whole file, appends, trims to the newest
/// [`MAX_HISTORY_ENTRIES`] and rewrites the file. There is no locking: two processes
/// saving at the same time can lose an entry.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store located at `history.json` inside `config_dir`
    pub fn in_dir(config_dir: &Path) -> Self {
        Self::new(config_dir.join(HISTORY_FILENAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all entries, oldest first
    ///
    /// A missing file is an empty log. An unreadable or invalid file is logged and also
    /// treated as empty; the next [`append`](Self::append) overwrites it.
    pub fn load(&self) -> Vec<HistoryEntry> {
        match read_entries(&self.path) {
            Ok(entries) => entries,
            Err(e) => {
                let shown = format_path_with_tilde(&self.path);
                warn!("Ignoring unreadable history file {}: {:#}", shown, e);
                Vec::new()
            }
        }
    }

    /// Append `entry` and persist the log, keeping only the newest entries
    pub fn append(&self, entry: HistoryEntry) -> Result<()> {
        let mut entries = self.load();
        push_bounded(&mut entries, entry, MAX_HISTORY_ENTRIES);
        self.write(&entries)
    }

    /// The newest `limit` entries, oldest first
    pub fn recent(&self, limit: usize) -> Vec<HistoryEntry> {
        let mut entries = self.load();
        let skip = entries.len().saturating_sub(limit);
        entries.drain(..skip);
        entries
    }

    fn write(&self, entries: &[HistoryEntry]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create history directory: {}", parent.display())
            })?;
        }

        // Write atomically (temp file + rename)
        let temp_path = self.path.with_extension("json.tmp");
        let json =
            serde_json::to_string_pretty(entries).context("Failed to serialize history")?;
        fs::write(&temp_path, json).context("Failed to write history temp file")?;
        fs::rename(&temp_path, &self.path).context("Failed to rename history temp file")?;

        Ok(())
    }
}

fn read_entries(path: &Path) -> Result<Vec<HistoryEntry>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to open history file: {}", path.display()));
        }
    };
    validate_file_size(&file, path)?;

    serde_json::from_reader(BufReader::new(file)).context("Failed to parse history JSON")
}

/// Push `entry` and evict the oldest entries until at most `max` remain
pub fn push_bounded(entries: &mut Vec<HistoryEntry>, entry: HistoryEntry, max: usize) {
    entries.push(entry);
    let excess = entries.len().saturating_sub(max);
    entries.drain(..excess);
}
