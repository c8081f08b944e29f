//! Token bucket state and refill arithmetic

use serde::{Deserialize, Serialize};

/// Persisted state of a single token bucket.
///
/// Only the refill timestamp and the token count are stored; capacity and
/// refill rate are configuration, supplied on every call. The timestamp
/// serializes under the short field name `t`, matching the state files
/// existing deployments already have on disk.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BucketState {
    /// Unix timestamp (fractional seconds) of the last refill
    #[serde(rename = "t")]
    pub last_refill: f64,
    /// Tokens currently available
    pub tokens:      f64,
}

impl BucketState {
    /// Creates a full bucket stamped at `now`.
    pub fn fresh(capacity: u32, now: f64) -> Self {
        Self {
            last_refill: now,
            tokens:      f64::from(capacity),
        }
    }

    /// Credits tokens for the time elapsed since the last refill and stamps
    /// the bucket at `now`.
    ///
    /// Elapsed time is clamped at zero so a bucket stamped in the future
    /// (clock rollback) never drains, and the balance is capped at
    /// `capacity`.
    pub fn refill(&mut self, capacity: u32, refill_per_sec: f64, now: f64) {
        let elapsed = (now - self.last_refill).max(0.0);
        self.tokens = (self.tokens + elapsed * refill_per_sec).min(f64::from(capacity));
        self.last_refill = now;
    }

    /// Attempts to spend `cost` tokens.
    ///
    /// On success the tokens are subtracted and the verdict admits. On
    /// failure the balance is left untouched and the verdict carries the time
    /// until the deficit refills.
    pub fn spend(&mut self, cost: u32, refill_per_sec: f64) -> Verdict {
        let cost = f64::from(cost);
        if self.tokens >= cost {
            self.tokens -= cost;
            Verdict::admit()
        }
        else {
            Verdict::deny((cost - self.tokens) / refill_per_sec)
        }
    }
}

/// Outcome of a single admission check
#[derive(Debug, Clone, Copy)]
pub struct Verdict {
    /// Whether the request may proceed
    pub admitted:         bool,
    /// Seconds until enough tokens refill, zero when admitted
    pub retry_after_secs: f64,
}

impl Verdict {
    /// An admitting verdict.
    pub const fn admit() -> Self {
        Self {
            admitted:         true,
            retry_after_secs: 0.0,
        }
    }

    /// A denying verdict with the given wait.
    pub const fn deny(retry_after_secs: f64) -> Self {
        Self {
            admitted: false,
            retry_after_secs,
        }
    }

    /// Whole-second retry hint, at least one second for a denial.
    ///
    /// Suitable for `Retry-After` style headers, where a sub-second wait must
    /// round up instead of telling the caller to retry immediately.
    pub fn retry_after_hint(&self) -> u64 {
        if self.admitted {
            return 0;
        }
        let secs = self.retry_after_secs.ceil().max(1.0);
        if secs.is_finite() {
            secs as u64
        }
        else {
            u64::MAX
        }
    }
}

/// Current Unix time as fractional seconds.
///
/// A clock before the epoch yields zero, which degrades every bucket to a
/// freshly refilled one instead of failing.
pub fn unix_now() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}
