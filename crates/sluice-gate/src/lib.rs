//! # Sluice Gate
//!
//! This crate implements persisted token-bucket admission control for Sluice.
//! Bucket state survives process restarts and stays correct under concurrent
//! access from multiple request-handling processes sharing a directory.
//!
//! ## Architecture
//!
//! Each rate-limit key owns one state file under the bucket directory:
//! - File name: `hex(sha256(namespace:key)).json`
//! - Contents: a JSON object with `t` (Unix timestamp of the last refill,
//!   fractional seconds) and `tokens` (current balance)
//!
//! A hit takes an exclusive lock on the file, credits tokens for the elapsed
//! time, spends the cost or computes the remaining wait, and rewrites the
//! state before releasing the lock. The lock scopes the whole
//! read-compute-write cycle, so racing processes never double-spend.
//!
//! ## Features
//!
//! - Fails open: unavailable or corrupt storage admits instead of erroring
//! - Deterministic key-to-file mapping, safe for arbitrary key strings
//! - Pluggable slot storage behind the `StateSlots` trait
//! - Environment-driven configuration (`RATE_CAPACITY`, `RATE_REFILL`,
//!   `RATE_MODE`)

pub mod bucket;
pub mod config;
pub mod error;
pub mod limiter;
pub mod slots;
pub mod traits;

pub use bucket::{unix_now, BucketState, Verdict};
pub use config::{GateConfig, RateMode, DEFAULT_CAPACITY, DEFAULT_REFILL};
pub use error::GateError;
pub use limiter::RateLimiter;
pub use slots::FileSlots;
pub use traits::{SlotApply, SlotDecision, StateSlots};

/// Result type for gate operations
pub type Result<T> = std::result::Result<T, GateError>;
