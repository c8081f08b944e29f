//! Filesystem-backed bucket slots

use std::{
    io::{BufReader, Read as _, Seek as _, SeekFrom, Write as _},
    path::PathBuf,
};

use sha2::{Digest as _, Sha256};
use tracing::{trace, warn};

use crate::{GateError, Result, SlotApply, StateSlots, Verdict};

/// Bucket slots persisted as one JSON file per key.
///
/// Slot files are named `hex(sha256(namespace:key)).json`, so arbitrary key
/// strings never reach the filesystem as path components. Mutual exclusion is
/// an exclusive `std::fs::File` lock held across the read-compute-write
/// cycle; the lock is released when the handle drops, on every exit path.
/// The cycle runs inside `spawn_blocking` because the lock call can wait on a
/// peer process.
#[derive(Debug, Clone)]
pub struct FileSlots {
    /// Directory holding the slot files.
    dir:       PathBuf,
    /// Namespace mixed into every slot name.
    namespace: String,
}

impl FileSlots {
    /// Creates a slot set rooted at `dir`.
    ///
    /// Performs no I/O; the directory is created by `RateLimiter::new`.
    pub const fn new(dir: PathBuf, namespace: String) -> Self {
        Self { dir, namespace }
    }

    /// Path of the state file backing `key`.
    pub fn slot_path(&self, key: &str) -> PathBuf {
        let digest = Sha256::digest(format!("{}:{}", self.namespace, key));
        self.dir.join(format!("{}.json", hex::encode(digest)))
    }
}

#[async_trait::async_trait]
impl StateSlots for FileSlots {
    async fn update(&self, key: &str, apply: SlotApply) -> Result<Verdict> {
        let path = self.slot_path(key);
        trace!("Updating bucket slot {:?}", path);
        tokio::task::spawn_blocking(move || -> Result<Verdict> {
            let file = std::fs::File::options()
                .read(true)
                .write(true)
                .create(true)
                .open(&path)?;
            file.lock().map_err(|e| GateError::Lock(e.to_string()))?;

            let mut raw = String::new();
            BufReader::new(&file).read_to_string(&mut raw)?;
            let prior = match serde_json::from_str(&raw) {
                Ok(state) => Some(state),
                Err(e) => {
                    if !raw.is_empty() {
                        warn!("Resetting unreadable bucket state {:?}: {}", path, e);
                    }
                    None
                },
            };

            let decision = apply(prior);
            let payload = serde_json::to_string(&decision.state).map_err(|e| GateError::State(e.to_string()))?;
            file.set_len(0)?;
            (&file).seek(SeekFrom::Start(0))?;
            (&file).write_all(payload.as_bytes())?;
            (&file).flush()?;
            Ok(decision.verdict)
        })
        .await
        .map_err(|e| GateError::State(e.to_string()))?
    }
}
