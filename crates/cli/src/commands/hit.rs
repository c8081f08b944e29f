use clap::Args;
use sluice_gate::{GateConfig, RateLimiter, RateMode};
use tracing::{error, info};

impl Default for HitArgs {
    fn default() -> Self {
        Self {
            key:       None,
            cost:      1,
            capacity:  None,
            refill:    None,
            namespace: None,
            dir:       None,
            mode:      None,
            client:    "127.0.0.1".to_string(),
        }
    }
}

/// Arguments for the hit command.
#[derive(Args, Clone)]
pub struct HitArgs {
    /// Bucket key to charge (defaults to the key derived from --mode)
    #[arg(short, long)]
    pub key:       Option<String>,
    /// Token cost of this hit
    #[arg(short, long, default_value_t = 1)]
    pub cost:      u32,
    /// Bucket capacity in tokens (overrides RATE_CAPACITY)
    #[arg(long)]
    pub capacity:  Option<u32>,
    /// Refill rate in tokens per second (overrides RATE_REFILL)
    #[arg(long)]
    pub refill:    Option<f64>,
    /// Namespace mixed into bucket file names
    #[arg(long)]
    pub namespace: Option<String>,
    /// Directory holding bucket state files
    #[arg(long)]
    pub dir:       Option<String>,
    /// Key derivation mode when --key is absent: global or ip
    #[arg(long)]
    pub mode:      Option<RateMode>,
    /// Client address used by the ip mode
    #[arg(long, default_value = "127.0.0.1")]
    pub client:    String,
}

/// Charge one hit against a persisted token bucket and print the verdict.
///
/// Configuration starts from the environment and is overridden by the
/// explicit flags. A denied hit is still a successful command run; the
/// verdict on stdout carries the outcome.
///
/// # Arguments
/// * `args` - The parsed command-line arguments for hit.
///
/// # Returns
/// Returns `Ok(())` on success, or a `SluiceError` on failure.
pub async fn run(args: HitArgs) -> sluice::Result<()> {
    let mut config = GateConfig::from_env();
    if let Some(capacity) = args.capacity {
        config.capacity = capacity;
    }
    if let Some(refill) = args.refill {
        config.refill_per_sec = refill;
    }
    if let Some(namespace) = args.namespace {
        config.namespace = namespace;
    }
    if let Some(dir) = args.dir {
        config.dir = dir.into();
    }

    let mode = args.mode.unwrap_or_else(GateConfig::mode_from_env);
    let key = args.key.unwrap_or_else(|| mode.key(&args.client));

    let limiter = RateLimiter::new(config).await.map_err(|e| {
        error!("Failed to prepare the rate limiter: {}", e);
        sluice::SluiceError::Io {
            source: std::io::Error::other(e),
        }
    })?;
    let verdict = limiter.hit(&key, args.cost).await;
    info!(
        "Hit on key '{}' with cost {}: admitted={}, retry_after={}s",
        key, args.cost, verdict.admitted, verdict.retry_after_secs
    );

    let retry_at = if verdict.admitted {
        serde_json::Value::Null
    }
    else {
        let due = (sluice_gate::unix_now() + verdict.retry_after_secs).ceil() as i64;
        chrono::DateTime::from_timestamp(due, 0)
            .map(|dt| serde_json::Value::String(dt.to_rfc3339()))
            .unwrap_or(serde_json::Value::Null)
    };

    #[allow(clippy::print_stdout, reason = "CLI output")]
    {
        println!(
            "{}",
            serde_json::json!({
                "key": key,
                "admitted": verdict.admitted,
                "retry_after_secs": verdict.retry_after_secs,
                "retry_after_hint": verdict.retry_after_hint(),
                "retry_at": retry_at,
            })
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    /// Test repeated hits against one bucket.
    ///
    /// This test verifies that the hit command persists bucket state in a
    /// single digest-named file under the chosen directory.
    #[tokio::test]
    async fn test_hit_writes_bucket_state() {
        let temp_dir = TempDir::new().unwrap();
        let args = HitArgs {
            key: Some("cli-bucket".to_string()),
            capacity: Some(2),
            refill: Some(1.0),
            namespace: Some("cli-test".to_string()),
            dir: Some(temp_dir.path().to_string_lossy().to_string()),
            ..Default::default()
        };

        run(args.clone()).await.unwrap();
        run(args).await.unwrap();

        let mut entries = std::fs::read_dir(temp_dir.path()).unwrap();
        let entry = entries.next().unwrap().unwrap();
        assert!(entry.file_name().to_string_lossy().ends_with(".json"));
        assert!(entries.next().is_none());
    }

    /// Test mode-derived keys.
    ///
    /// This test verifies that distinct clients in ip mode charge distinct
    /// buckets.
    #[tokio::test]
    async fn test_distinct_clients_use_distinct_buckets() {
        let temp_dir = TempDir::new().unwrap();
        let base = HitArgs {
            capacity: Some(5),
            refill: Some(1.0),
            namespace: Some("cli-test".to_string()),
            dir: Some(temp_dir.path().to_string_lossy().to_string()),
            mode: Some(RateMode::Ip),
            ..Default::default()
        };

        let mut first = base.clone();
        first.client = "10.0.0.1".to_string();
        run(first).await.unwrap();

        let mut second = base;
        second.client = "10.0.0.2".to_string();
        run(second).await.unwrap();

        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 2);
    }

    /// Test a denied hit.
    ///
    /// This test verifies that draining a bucket does not turn the command
    /// into a failure; denial is reported through the verdict.
    #[tokio::test]
    async fn test_denied_hit_is_not_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let args = HitArgs {
            key: Some("drained".to_string()),
            cost: 1,
            capacity: Some(1),
            refill: Some(1.0),
            namespace: Some("cli-test".to_string()),
            dir: Some(temp_dir.path().to_string_lossy().to_string()),
            ..Default::default()
        };

        run(args.clone()).await.unwrap();
        run(args).await.unwrap();
    }
}
