//! Tagged bundle export and import
//!
//! The transport encoding of a bundle is decided once, at the boundary
//! where bytes enter or leave the system. Past that point every routine
//! works on one concrete encoding and nothing guesses from payload bytes.

use std::collections::BTreeMap;
#[cfg(feature = "archive")]
use std::collections::HashSet;

#[cfg(feature = "archive")]
use tokio::fs as tokio_fs;
#[cfg(feature = "archive")]
use tracing::error;
use tracing::{debug, warn};

#[cfg(feature = "archive")]
use super::archive::{self, ArchiveEntry};
use super::payload::{ExportBundle, ImportSummary, JsonBundle, JsonListEntry};
#[cfg(feature = "archive")]
use crate::constants::{ARCHIVE_BUNDLE_FILE_NAME, ARCHIVE_CONTENT_TYPE, INDEX_FILE_NAME};
use crate::constants::{JSON_BUNDLE_FILE_NAME, JSON_CONTENT_TYPE};
use crate::error::{Result, SluiceError};
use crate::store::{ListPayload, ListStore};
#[cfg(feature = "archive")]
use crate::validation::is_allowed_archive_name;

/// Bundle transport encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundleFormat {
    /// Framed binary container (compact, default)
    Archive,
    /// Plain JSON document (always available)
    Json,
}

impl Default for BundleFormat {
    #[cfg(feature = "archive")]
    fn default() -> Self {
        BundleFormat::Archive
    }

    #[cfg(not(feature = "archive"))]
    fn default() -> Self {
        BundleFormat::Json
    }
}

impl std::str::FromStr for BundleFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "archive" => Ok(BundleFormat::Archive),
            "json" => Ok(BundleFormat::Json),
            _ => Err(format!("Invalid bundle format: {}", s)),
        }
    }
}

impl std::fmt::Display for BundleFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BundleFormat::Archive => write!(f, "archive"),
            BundleFormat::Json => write!(f, "json"),
        }
    }
}

/// A bundle submitted for import, tagged with its encoding
#[derive(Debug, Clone)]
pub enum BundleInput {
    /// Bytes of a framed binary container
    Archive(Vec<u8>),
    /// Bytes of a JSON document
    Json(Vec<u8>),
}

impl BundleInput {
    /// Tag submitted bytes using their declared content type
    ///
    /// Any content type that does not declare JSON is treated as a
    /// binary container.
    pub fn from_content_type(content_type: &str, bytes: Vec<u8>) -> Self {
        if content_type.to_lowercase().contains(JSON_CONTENT_TYPE) {
            BundleInput::Json(bytes)
        }
        else {
            BundleInput::Archive(bytes)
        }
    }

    /// Tag submitted bytes with an explicit format
    pub const fn with_format(format: BundleFormat, bytes: Vec<u8>) -> Self {
        match format {
            BundleFormat::Archive => BundleInput::Archive(bytes),
            BundleFormat::Json => BundleInput::Json(bytes),
        }
    }
}

/// Export/import codec bound to one list store
///
/// # Examples
///
/// ```rust,no_run
/// use sluice::{BundleCodec, ListStore};
///
/// #[tokio::main]
/// async fn main() -> sluice::Result<()> {
///     let store = ListStore::new("./config").await?;
///     let codec = BundleCodec::new(&store);
///     let bundle = codec.export().await?;
///     assert!(!bundle.content.is_empty());
///     Ok(())
/// }
/// ```
pub struct BundleCodec<'store> {
    store: &'store ListStore,
}

impl<'store> BundleCodec<'store> {
    /// Create a codec over an existing store
    pub const fn new(store: &'store ListStore) -> Self {
        Self { store }
    }

    /// Export the index and every referenced list in this build's default format
    pub async fn export(&self) -> Result<ExportBundle> {
        self.export_as(BundleFormat::default()).await
    }

    /// Export the index and every referenced list in an explicit format
    pub async fn export_as(&self, format: BundleFormat) -> Result<ExportBundle> {
        match format {
            BundleFormat::Archive => self.export_archive().await,
            BundleFormat::Json => self.export_json().await,
        }
    }

    /// Import a tagged bundle, replacing the index and the lists it carries
    pub async fn import(&self, input: BundleInput) -> Result<ImportSummary> {
        match input {
            BundleInput::Archive(bytes) => self.import_archive(bytes).await,
            BundleInput::Json(bytes) => self.import_json(bytes).await,
        }
    }

    async fn export_json(&self) -> Result<ExportBundle> {
        let loaded = self.store.load().await?;
        let mut files = BTreeMap::new();
        for file in loaded.files {
            files.insert(file.section, JsonListEntry {
                path:    file.path,
                content: file.content,
            });
        }

        let bundle = JsonBundle { index: loaded.index, files };
        let content = serde_json::to_vec_pretty(&bundle)?;
        debug!("Exported JSON bundle with {} list files", bundle.files.len());

        Ok(ExportBundle {
            filename:     JSON_BUNDLE_FILE_NAME,
            content,
            content_type: JSON_CONTENT_TYPE,
        })
    }

    #[cfg(feature = "archive")]
    async fn export_archive(&self) -> Result<ExportBundle> {
        let index = tokio_fs::read_to_string(self.store.index_path()).await.unwrap_or_default();
        let mut entries = vec![ArchiveEntry {
            name:    INDEX_FILE_NAME.to_string(),
            content: index.into_bytes(),
        }];

        let mut seen = HashSet::new();
        for path in self.store.referenced_paths().await {
            if !seen.insert(path.clone()) {
                continue;
            }
            let full_path = self.store.resolve(&path).await?;
            let content = tokio_fs::read(&full_path).await.unwrap_or_default();
            entries.push(ArchiveEntry { name: path, content });
        }

        let content = archive::to_bytes(&entries)?;
        debug!("Exported archive bundle with {} entries", entries.len());

        Ok(ExportBundle {
            filename:     ARCHIVE_BUNDLE_FILE_NAME,
            content,
            content_type: ARCHIVE_CONTENT_TYPE,
        })
    }

    #[cfg(not(feature = "archive"))]
    async fn export_archive(&self) -> Result<ExportBundle> {
        debug!("Archive support is not compiled in, exporting JSON instead");
        self.export_json().await
    }

    async fn import_json(&self, bytes: Vec<u8>) -> Result<ImportSummary> {
        let bundle: JsonBundle = serde_json::from_slice(&bytes).map_err(|e| {
            warn!("Rejecting JSON bundle that does not parse: {}", e);
            SluiceError::InvalidArchive {
                reason: format!("invalid JSON payload: {}", e),
            }
        })?;

        let files: Vec<ListPayload> = bundle
            .files
            .into_values()
            .map(|entry| ListPayload {
                path:    entry.path,
                content: entry.content,
            })
            .collect();
        self.store.save(&bundle.index, &files).await?;

        Ok(ImportSummary {
            index_written: true,
            files_written: files.len(),
        })
    }

    #[cfg(feature = "archive")]
    async fn import_archive(&self, bytes: Vec<u8>) -> Result<ImportSummary> {
        let entries = archive::from_bytes(&bytes)?;
        let mut summary = ImportSummary::default();

        for entry in entries {
            let name = entry.name.replace('\\', "/");
            let name = name.trim_start_matches('/');
            if name.is_empty() || name.contains("../") {
                warn!("Skipping bundle entry with unsafe name {:?}", entry.name);
                continue;
            }

            if name.eq_ignore_ascii_case(INDEX_FILE_NAME) {
                tokio_fs::write(self.store.index_path(), &entry.content).await.map_err(|e| {
                    error!("Failed to write list index: {}", e);
                    e
                })?;
                summary.index_written = true;
                continue;
            }

            if !is_allowed_archive_name(name) {
                debug!("Skipping bundle entry {:?}: name is not an allowed list file", name);
                continue;
            }

            let full_path = self.store.resolve(name).await?;
            if let Some(parent) = full_path.parent() {
                tokio_fs::create_dir_all(parent).await?;
            }
            tokio_fs::write(&full_path, &entry.content).await.map_err(|e| {
                error!("Failed to write list file {:?}: {}", full_path, e);
                e
            })?;
            summary.files_written = summary.files_written.saturating_add(1);
        }

        debug!(
            "Imported archive bundle: index_written={}, files_written={}",
            summary.index_written, summary.files_written
        );
        Ok(summary)
    }

    #[cfg(not(feature = "archive"))]
    async fn import_archive(&self, _bytes: Vec<u8>) -> Result<ImportSummary> {
        Err(SluiceError::UnsupportedFormat {
            message: "archive support is not compiled in; submit the JSON form instead".to_string(),
        })
    }
}
