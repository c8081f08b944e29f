use clap::Args;
use sluice::ListStore;
use tracing::{error, info};

/// Arguments for the init command.
#[derive(Args, Clone, Default)]
pub struct InitArgs {
    /// Path to the store root directory
    #[arg(short, long)]
    pub root: String,
}

/// Initialize a list store root at the specified path.
///
/// This function creates the store directory and seeds an empty list index
/// if none exists yet. Re-running it against an existing root is harmless.
///
/// # Arguments
/// * `args` - The parsed command-line arguments for init.
///
/// # Returns
/// Returns `Ok(())` on success, or a `SluiceError` on failure.
pub async fn run(args: InitArgs) -> sluice::Result<()> {
    let root = args.root;
    info!("Initializing list store at {}", root);

    match ListStore::new(&root).await {
        Ok(store) => {
            let index_path = store.index_path();
            if tokio::fs::try_exists(&index_path).await? {
                info!("Index already present at {:?}", index_path);
            }
            else {
                tokio::fs::write(&index_path, "").await?;
                info!("Seeded empty index at {:?}", index_path);
            }

            #[allow(clippy::print_stdout, reason = "CLI output")]
            {
                println!("Store ready at {}", store.root().display());
            }
            Ok(())
        },
        Err(e) => {
            error!("Failed to initialize store at {}: {}", root, e);
            Err(e)
        },
    }
}
