use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing with the specified verbosity level and output format.
///
/// This function sets up the tracing subscriber with appropriate filtering based on verbosity.
/// By default, only logs from the Sluice crates are shown at INFO level or higher.
/// Verbosity levels increase the log level for the Sluice crates.
///
/// # Arguments
/// * `json` - If true, output logs in JSON format; otherwise, use human-readable format.
/// * `verbose` - Verbosity level: 0 for INFO, 1 for DEBUG, 2+ for TRACE.
pub fn init_tracing(json: bool, verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::new(format!(
        "sluice={},sluice_gate={},sluice_cli={}",
        level, level, level
    ));

    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(fmt::layer().json().flatten_event(true))
            .init();
    } else {
        registry.with(fmt::layer()).init();
    }
}
