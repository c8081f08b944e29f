//! Admission control front end

use tokio::fs as tokio_fs;
use tracing::{debug, error, trace, warn};

use crate::{
    bucket::{self, BucketState},
    FileSlots,
    GateConfig,
    Result,
    SlotApply,
    SlotDecision,
    StateSlots,
    Verdict,
};

/// Per-key token-bucket rate limiter with pluggable slot storage.
///
/// Every `hit` runs one exclusive read-compute-write cycle against the key's
/// slot: credit tokens for the elapsed time, spend the cost if the balance
/// covers it, persist the new state. When the slot layer itself fails the
/// limiter fails open and admits, so a broken disk degrades to "not limited"
/// instead of an outage.
///
/// # Examples
///
/// ```rust,no_run
/// use sluice_gate::{GateConfig, RateLimiter};
///
/// # async fn example() -> sluice_gate::Result<()> {
/// let limiter = RateLimiter::new(GateConfig::default()).await?;
/// let verdict = limiter.hit("ip:203.0.113.9", 1).await;
/// if !verdict.admitted {
///     println!("retry in {} seconds", verdict.retry_after_hint());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct RateLimiter<S = FileSlots> {
    /// Slot storage backing the buckets.
    slots:  S,
    /// Capacity, refill rate, namespace, and storage directory.
    config: GateConfig,
}

impl RateLimiter<FileSlots> {
    /// Creates a limiter with file-backed slots, creating the bucket
    /// directory if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `GateError::Io` when the bucket directory cannot be created.
    pub async fn new(config: GateConfig) -> Result<Self> {
        trace!("Creating rate limiter with buckets at {:?}", config.dir);
        tokio_fs::create_dir_all(&config.dir).await.map_err(|e| {
            error!("Failed to create bucket directory {:?}: {}", config.dir, e);
            e
        })?;
        let slots = FileSlots::new(config.dir.clone(), config.namespace.clone());
        Ok(Self { slots, config })
    }
}

impl<S> RateLimiter<S>
where
    S: StateSlots,
{
    /// Creates a limiter over caller-supplied slot storage.
    pub const fn with_slots(slots: S, config: GateConfig) -> Self {
        Self { slots, config }
    }

    /// The configuration this limiter runs with.
    pub const fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Admission check for `key`, charging `cost` tokens at the current time.
    ///
    /// Never fails: slot-layer errors are logged and the request is admitted.
    pub async fn hit(&self, key: &str, cost: u32) -> Verdict {
        self.hit_at(key, cost, bucket::unix_now()).await
    }

    /// Admission check at an explicit timestamp.
    ///
    /// `now` is Unix time in fractional seconds. Exposed separately so
    /// callers with their own clock, and tests, get deterministic refill
    /// arithmetic.
    pub async fn hit_at(&self, key: &str, cost: u32, now: f64) -> Verdict {
        let capacity = self.config.capacity;
        let refill_per_sec = self.config.refill_per_sec;
        let apply: SlotApply = Box::new(move |prior| {
            let mut state = prior.unwrap_or_else(|| BucketState::fresh(capacity, now));
            state.refill(capacity, refill_per_sec, now);
            let verdict = state.spend(cost, refill_per_sec);
            SlotDecision { state, verdict }
        });
        match self.slots.update(key, apply).await {
            Ok(verdict) => {
                debug!(
                    "Bucket hit for key '{}': admitted={} retry_after={}",
                    key, verdict.admitted, verdict.retry_after_secs
                );
                verdict
            },
            Err(e) => {
                warn!("Bucket slot unavailable for key '{}', failing open: {}", key, e);
                Verdict::admit()
            },
        }
    }
}
