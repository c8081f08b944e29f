use std::path::{Path, PathBuf};

use tokio::fs as tokio_fs;
use tracing::{debug, error, trace};

use crate::{constants::INDEX_FILE_NAME, Result};

/// A configuration store confined to one root directory.
///
/// `ListStore` owns the directory where the list index and every referenced
/// list file live. All relative paths pass through `resolve`, which refuses
/// anything that would land outside the root, so the store safely accepts
/// paths coming from indexes, bundles, and remote callers.
///
/// # Architecture
///
/// The root directory holds:
/// - `lists.ini`, the index: one section per logical list, each declaring a
///   `listFileName` relative path
/// - the referenced list files, in an arbitrary tree beneath the root
///
/// # Examples
///
/// ```rust,no_run
/// use sluice::ListStore;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = ListStore::new("/var/lib/sluice/config").await?;
/// let loaded = store.load().await?;
/// println!("{} referenced lists", loaded.files.len());
/// # Ok(())
/// # }
/// ```
///
/// # Thread Safety
///
/// `ListStore` holds only its canonical root path and is cheap to clone.
/// Concurrent `load` calls are always safe; concurrent `save` calls are
/// last-writer-wins per file.
#[derive(Debug, Clone)]
pub struct ListStore {
    /// Canonicalized root directory of the store.
    root: PathBuf,
}

impl ListStore {
    /// Creates a store rooted at `root`, creating the directory if it does
    /// not exist yet.
    ///
    /// The root is canonicalized up front so later confinement checks
    /// compare against a symlink-free base.
    ///
    /// # Parameters
    ///
    /// * `root` - The directory the store is confined to. Any type
    ///   implementing `AsRef<Path>` works, including `&str` and `PathBuf`.
    ///
    /// # Errors
    ///
    /// Returns `SluiceError::Io` when the directory cannot be created or
    /// canonicalized.
    pub async fn new<P>(root: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        trace!("Creating list store at {:?}", root.as_ref());
        let root = root.as_ref().to_path_buf();
        tokio_fs::create_dir_all(&root).await.map_err(|e| {
            error!("Failed to create store root {:?}: {}", root, e);
            e
        })?;
        let root = tokio_fs::canonicalize(&root).await.map_err(|e| {
            error!("Failed to canonicalize store root {:?}: {}", root, e);
            e
        })?;
        debug!("Store root ready: {:?}", root);
        Ok(Self { root })
    }

    /// The canonicalized root directory.
    pub const fn root(&self) -> &PathBuf {
        &self.root
    }

    /// Absolute path of the list index file.
    pub fn index_path(&self) -> PathBuf {
        self.root.join(INDEX_FILE_NAME)
    }
}
