//! Suggested-entry storage
//!
//! Free-text suggestions live in a flat file next to the list index.
//! Lines are lowercased and de-duplicated on read so callers always see
//! a canonical list.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tokio::fs as tokio_fs;
use tracing::{debug, error, trace};

use crate::constants::SUGGESTIONS_FILE_NAME;
use crate::error::Result;

/// Reads and writes the flat suggestion file under a store root
#[derive(Debug, Clone)]
pub struct SuggestionStore {
    root: PathBuf,
}

impl SuggestionStore {
    /// Create a handle for the suggestion file under `root`
    ///
    /// No I/O happens until the file is read or written.
    pub fn new<P>(root: P) -> Self
    where
        P: AsRef<Path>,
    {
        Self { root: root.as_ref().to_path_buf() }
    }

    /// Full path of the suggestion file
    pub fn path(&self) -> PathBuf {
        self.root.join(SUGGESTIONS_FILE_NAME)
    }

    /// Read the suggestion list
    ///
    /// Entries are trimmed, lowercased, and de-duplicated keeping their
    /// first-seen order. Comment lines start with `#`. A missing file
    /// reads as an empty list.
    pub async fn load(&self) -> Result<Vec<String>> {
        let path = self.path();
        let text = match tokio_fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) => {
                trace!("Suggestion file {:?} is not readable: {}", path, e);
                return Ok(Vec::new());
            },
        };

        let mut seen = HashSet::new();
        let mut entries = Vec::new();
        for line in text.lines() {
            let entry = line.trim().to_lowercase();
            if entry.is_empty() || entry.starts_with('#') {
                continue;
            }
            if seen.insert(entry.clone()) {
                entries.push(entry);
            }
        }

        debug!("Loaded {} suggestions from {:?}", entries.len(), path);
        Ok(entries)
    }

    /// Replace the suggestion list
    pub async fn save(&self, entries: &[String]) -> Result<()> {
        tokio_fs::create_dir_all(&self.root).await?;
        let mut text = entries
            .iter()
            .map(|entry| entry.trim().to_lowercase())
            .collect::<Vec<_>>()
            .join("\n");
        text.push('\n');
        tokio_fs::write(self.path(), text).await.map_err(|e| {
            error!("Failed to write suggestion file: {}", e);
            e
        })?;
        Ok(())
    }
}
