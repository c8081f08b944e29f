use clap::Args;
use sluice::ListStore;
use tracing::info;

/// Arguments for the show command.
#[derive(Args, Clone, Default)]
pub struct ShowArgs {
    /// Path to the store root directory
    #[arg(short, long)]
    pub root: String,
}

/// Print the list index and a per-section summary of every referenced list.
///
/// Sections whose list file is missing on disk are shown with zero entries,
/// matching what a load through the library would observe.
///
/// # Arguments
/// * `args` - The parsed command-line arguments for show.
///
/// # Returns
/// Returns `Ok(())` on success, or a `SluiceError` on failure.
pub async fn run(args: ShowArgs) -> sluice::Result<()> {
    let store = ListStore::new(&args.root).await?;
    let loaded = store.load().await?;
    info!("Loaded {} list files from {}", loaded.files.len(), args.root);

    #[allow(clippy::print_stdout, reason = "CLI output")]
    {
        if loaded.index.is_empty() {
            println!("(empty index)");
        }
        else {
            println!("{}", loaded.index.trim_end());
        }
        println!();
        for file in &loaded.files {
            let modified = file
                .modified
                .map(|m| m.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                .unwrap_or_else(|| "missing".to_string());
            println!(
                "[{}] {} ({} entries, {})",
                file.section,
                file.path,
                file.content.lines().count(),
                modified
            );
        }
    }
    Ok(())
}
