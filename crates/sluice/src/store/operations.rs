use std::path::PathBuf;

use chrono::{DateTime, Utc};
use tokio::fs as tokio_fs;
use tracing::{debug, error, trace, warn};

use crate::{
    index::{self, IndexEntry},
    validation::normalize_relative,
    Result,
    SluiceError,
};
use super::stor::ListStore;

/// One list file as loaded from the store
#[derive(Debug, Clone)]
pub struct ListFile {
    /// Section name declaring this file
    pub section:   String,
    /// Relative path as declared by the index
    pub path:      String,
    /// Absolute path under the store root
    pub full_path: PathBuf,
    /// File contents, empty when the file does not exist yet
    pub content:   String,
    /// Last modification time, when the file exists
    pub modified:  Option<DateTime<Utc>>,
}

/// A list file to be written by `save`
#[derive(Debug, Clone)]
pub struct ListPayload {
    /// Relative path under the store root
    pub path:    String,
    /// Contents to write
    pub content: String,
}

/// Everything the store manages, loaded in one pass
#[derive(Debug, Clone, Default)]
pub struct LoadedLists {
    /// The index text, verbatim
    pub index: String,
    /// Referenced list files in index order
    pub files: Vec<ListFile>,
}

#[allow(
    clippy::multiple_inherent_impl,
    reason = "store operations are split out of the constructor module for organization"
)]
impl ListStore {
    /// Loads the index and every referenced list file.
    ///
    /// A missing index yields empty text and no files. A referenced file
    /// that does not exist yet loads as empty content. An index entry whose
    /// path escapes the root is a hard `PathEscape` error, never a silent
    /// skip.
    ///
    /// # Errors
    ///
    /// Returns `SluiceError::PathEscape` when the index references a path
    /// outside the store root.
    pub async fn load(&self) -> Result<LoadedLists> {
        trace!("Loading lists from {:?}", self.root());
        let index = tokio_fs::read_to_string(self.index_path()).await.unwrap_or_default();
        let mut files = Vec::new();
        for IndexEntry { section, path } in index::referenced_lists(&index) {
            let full_path = self.resolve(&path).await?;
            let (content, modified) = match tokio_fs::read_to_string(&full_path).await {
                Ok(content) => {
                    let modified = tokio_fs::metadata(&full_path)
                        .await
                        .ok()
                        .and_then(|meta| meta.modified().ok())
                        .map(DateTime::<Utc>::from);
                    (content, modified)
                },
                Err(e) => {
                    debug!("List file {:?} is not readable yet: {}", full_path, e);
                    (String::new(), None)
                },
            };
            files.push(ListFile {
                section,
                path,
                full_path,
                content,
                modified,
            });
        }
        debug!("Loaded index and {} referenced list files", files.len());
        Ok(LoadedLists { index, files })
    }

    /// Writes the index verbatim, then resolves and writes each payload,
    /// creating parent directories as needed.
    ///
    /// Nothing is staged: concurrent savers are last-writer-wins per file.
    ///
    /// # Errors
    ///
    /// Returns `SluiceError::PathEscape` when a payload path escapes the
    /// store root, or `SluiceError::Io` when a write fails.
    pub async fn save(&self, index: &str, files: &[ListPayload]) -> Result<()> {
        trace!("Saving index and {} list files", files.len());
        tokio_fs::create_dir_all(self.root()).await?;
        tokio_fs::write(self.index_path(), index).await.map_err(|e| {
            error!("Failed to write index {:?}: {}", self.index_path(), e);
            e
        })?;
        for file in files {
            let full_path = self.resolve(&file.path).await?;
            if let Some(parent) = full_path.parent() {
                tokio_fs::create_dir_all(parent).await?;
            }
            tokio_fs::write(&full_path, &file.content).await.map_err(|e| {
                error!("Failed to write list file {:?}: {}", full_path, e);
                e
            })?;
        }
        debug!("Saved index and {} list files", files.len());
        Ok(())
    }

    /// Resolves a relative path to an absolute path under the store root.
    ///
    /// Separators are unified, one redundant leading `config/` segment is
    /// dropped, and any `..` rejects the path before the filesystem is
    /// consulted. For paths that already exist, the canonical form must stay
    /// under the root, which catches symlinks pointing elsewhere.
    ///
    /// # Errors
    ///
    /// Returns `SluiceError::PathEscape` when the path is empty after
    /// normalization or would leave the root.
    pub async fn resolve(&self, relative: &str) -> Result<PathBuf> {
        let rel = normalize_relative(relative)?;
        if rel.is_empty() {
            debug!("Rejecting empty relative path: {:?}", relative);
            return Err(SluiceError::PathEscape {
                path: relative.to_owned(),
            });
        }
        let full = self.root().join(&rel);
        match tokio_fs::canonicalize(&full).await {
            Ok(real) => {
                if real.starts_with(self.root()) && real != *self.root() {
                    Ok(full)
                }
                else {
                    warn!("Resolved path {:?} escapes store root {:?}", real, self.root());
                    Err(SluiceError::PathEscape {
                        path: relative.to_owned(),
                    })
                }
            },
            Err(e) => {
                // Not on disk yet; the lexical join is safe because `..` was
                // rejected above.
                trace!("Path {:?} does not exist yet: {}", full, e);
                Ok(full)
            },
        }
    }

    /// Relative paths declared by the index, in declaration order.
    ///
    /// Duplicates are reported as declared; callers needing uniqueness
    /// de-duplicate themselves. A missing or malformed index yields an
    /// empty list.
    pub async fn referenced_paths(&self) -> Vec<String> {
        let index = tokio_fs::read_to_string(self.index_path()).await.unwrap_or_default();
        index::referenced_lists(&index)
            .into_iter()
            .map(|entry| entry.path)
            .collect()
    }
}
