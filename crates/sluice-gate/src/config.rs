//! Gate configuration and environment loading

use std::path::PathBuf;

use tracing::warn;

/// Environment variable overriding the bucket capacity.
pub const RATE_CAPACITY_ENV: &str = "RATE_CAPACITY";
/// Environment variable overriding the refill rate (tokens per second).
pub const RATE_REFILL_ENV: &str = "RATE_REFILL";
/// Environment variable selecting the key-derivation mode.
pub const RATE_MODE_ENV: &str = "RATE_MODE";

/// Default bucket capacity when nothing else is configured.
pub const DEFAULT_CAPACITY: u32 = 60;
/// Default refill rate in tokens per second.
pub const DEFAULT_REFILL: f64 = 1.0;

/// How limiter keys are derived from the calling client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum RateMode {
    /// One shared bucket for every caller (default)
    #[default]
    Global,
    /// One bucket per client address
    Ip,
}

impl RateMode {
    /// Builds the limiter key for `client` under this mode.
    pub fn key(&self, client: &str) -> String {
        match self {
            RateMode::Global => "global".to_owned(),
            RateMode::Ip => format!("ip:{}", client),
        }
    }
}

impl std::str::FromStr for RateMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "global" => Ok(RateMode::Global),
            "ip" => Ok(RateMode::Ip),
            _ => Err(format!("Invalid rate mode: {}", s)),
        }
    }
}

impl std::fmt::Display for RateMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RateMode::Global => write!(f, "global"),
            RateMode::Ip => write!(f, "ip"),
        }
    }
}

/// Configuration for a rate limiter
#[derive(Debug, Clone)]
pub struct GateConfig {
    /// Maximum number of tokens a bucket can hold
    pub capacity:       u32,
    /// Tokens restored per second
    pub refill_per_sec: f64,
    /// Namespace mixed into every bucket slot name
    pub namespace:      String,
    /// Directory holding one state file per bucket
    pub dir:            PathBuf,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            capacity:       DEFAULT_CAPACITY, // 60 requests
            refill_per_sec: DEFAULT_REFILL,   // one token per second
            namespace:      "default".to_owned(),
            dir:            std::env::temp_dir().join("sluice-gate"),
        }
    }
}

impl GateConfig {
    /// Builds a configuration from the process environment.
    ///
    /// Reads `RATE_CAPACITY` and `RATE_REFILL`; unset or unparseable values
    /// fall back to the defaults with a warning rather than failing startup.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var(RATE_CAPACITY_ENV) {
            match raw.parse::<u32>() {
                Ok(capacity) => config.capacity = capacity,
                Err(e) => {
                    warn!("Ignoring {}={:?}: {}", RATE_CAPACITY_ENV, raw, e);
                },
            }
        }
        if let Ok(raw) = std::env::var(RATE_REFILL_ENV) {
            match raw.parse::<f64>() {
                Ok(refill) => config.refill_per_sec = refill,
                Err(e) => {
                    warn!("Ignoring {}={:?}: {}", RATE_REFILL_ENV, raw, e);
                },
            }
        }
        config
    }

    /// Reads the key-derivation mode from `RATE_MODE`.
    ///
    /// Unset or unrecognized values fall back to `RateMode::Global`.
    pub fn mode_from_env() -> RateMode {
        match std::env::var(RATE_MODE_ENV) {
            Ok(raw) => raw.parse().unwrap_or_else(|e| {
                warn!("Ignoring {}: {}", RATE_MODE_ENV, e);
                RateMode::default()
            }),
            Err(_) => RateMode::default(),
        }
    }
}
