use clap::Args;
use sluice::{BundleCodec, BundleFormat, ListStore};
use tracing::{error, info};

/// Arguments for the export command.
#[derive(Args, Clone, Default)]
pub struct ExportArgs {
    /// Path to the store root directory
    #[arg(short, long)]
    pub root:   String,
    /// File to write the bundle to (defaults to the bundle's own file name)
    #[arg(short, long)]
    pub output: Option<String>,
    /// Bundle format to produce: archive or json
    #[arg(short, long)]
    pub format: Option<BundleFormat>,
}

/// Export the index and every referenced list as a bundle file.
///
/// # Arguments
/// * `args` - The parsed command-line arguments for export.
///
/// # Returns
/// Returns `Ok(())` on success, or a `SluiceError` on failure.
pub async fn run(args: ExportArgs) -> sluice::Result<()> {
    let format = args.format.unwrap_or_default();
    let store = ListStore::new(&args.root).await?;
    let bundle = BundleCodec::new(&store).export_as(format).await?;

    let output = args.output.unwrap_or_else(|| bundle.filename.to_string());
    tokio::fs::write(&output, &bundle.content).await.map_err(|e| {
        error!("Failed to write bundle to {}: {}", output, e);
        e
    })?;
    info!("Exported {} bundle to {}", format, output);

    #[allow(clippy::print_stdout, reason = "CLI output")]
    {
        println!("Wrote {} ({} bytes, {})", output, bundle.content.len(), bundle.content_type);
    }
    Ok(())
}
