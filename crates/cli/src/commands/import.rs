use clap::Args;
use sluice::{BundleCodec, BundleFormat, BundleInput, ListStore};
use tracing::{error, info};

/// Arguments for the import command.
#[derive(Args, Clone, Default)]
pub struct ImportArgs {
    /// Path to the store root directory
    #[arg(short, long)]
    pub root:         String,
    /// Bundle file to import
    #[arg(short, long)]
    pub input:        String,
    /// Declared format of the bundle: archive or json
    #[arg(short, long)]
    pub format:       Option<BundleFormat>,
    /// Content type the bundle was submitted with (takes precedence over --format)
    #[arg(long)]
    pub content_type: Option<String>,
}

/// Import a bundle file, replacing the index and the lists it carries.
///
/// The bundle's encoding is taken from `--content-type` when given and from
/// `--format` otherwise; the payload bytes are never sniffed.
///
/// # Arguments
/// * `args` - The parsed command-line arguments for import.
///
/// # Returns
/// Returns `Ok(())` on success, or a `SluiceError` on failure.
pub async fn run(args: ImportArgs) -> sluice::Result<()> {
    let bytes = tokio::fs::read(&args.input).await.map_err(|e| {
        error!("Failed to read bundle file {}: {}", args.input, e);
        e
    })?;

    #[allow(clippy::option_if_let_else, reason = "both branches consume the payload")]
    let input = if let Some(content_type) = args.content_type.as_deref() {
        BundleInput::from_content_type(content_type, bytes)
    }
    else {
        BundleInput::with_format(args.format.unwrap_or_default(), bytes)
    };

    let store = ListStore::new(&args.root).await?;
    let summary = BundleCodec::new(&store).import(input).await?;
    info!(
        "Imported bundle from {}: index_written={}, files_written={}",
        args.input, summary.index_written, summary.files_written
    );

    #[allow(clippy::print_stdout, reason = "CLI output")]
    {
        println!(
            "Imported {}: index written: {}, list files written: {}",
            args.input, summary.index_written, summary.files_written
        );
    }
    Ok(())
}
