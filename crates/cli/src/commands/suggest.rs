use clap::Args;
use sluice::SuggestionStore;
use tracing::info;

/// Arguments for the suggest command.
#[derive(Args, Clone, Default)]
pub struct SuggestArgs {
    /// Path to the store root directory
    #[arg(short, long)]
    pub root: String,
    /// Replace the suggestion list with these comma-separated entries
    #[arg(short, long, value_delimiter = ',')]
    pub set:  Option<Vec<String>>,
}

/// Show or replace the suggestion list kept next to the list index.
///
/// # Arguments
/// * `args` - The parsed command-line arguments for suggest.
///
/// # Returns
/// Returns `Ok(())` on success, or a `SluiceError` on failure.
pub async fn run(args: SuggestArgs) -> sluice::Result<()> {
    let store = SuggestionStore::new(&args.root);

    if let Some(entries) = args.set {
        store.save(&entries).await?;
        info!("Replaced suggestion list with {} entries", entries.len());

        #[allow(clippy::print_stdout, reason = "CLI output")]
        {
            println!("Saved {} suggestions", entries.len());
        }
        return Ok(());
    }

    let entries = store.load().await?;
    info!("Loaded {} suggestions from {}", entries.len(), args.root);

    #[allow(clippy::print_stdout, reason = "CLI output")]
    {
        if entries.is_empty() {
            println!("(no suggestions)");
        }
        else {
            for entry in &entries {
                println!("{}", entry);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    /// Test replacing and reading the suggestion list.
    ///
    /// This test verifies that --set writes a normalized suggestion file
    /// readable through the library.
    #[tokio::test]
    async fn test_set_then_show() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_string_lossy().to_string();

        let args = SuggestArgs {
            root: root.clone(),
            set:  Some(vec!["Example.COM".to_owned(), "beta.org".to_owned()]),
        };
        run(args).await.unwrap();

        let entries = SuggestionStore::new(temp_dir.path()).load().await.unwrap();
        assert_eq!(entries, vec!["example.com".to_owned(), "beta.org".to_owned()]);

        let args = SuggestArgs { root, set: None };
        run(args).await.unwrap();
    }

    /// Test showing suggestions from an empty root.
    ///
    /// This test verifies that a missing suggestion file is not an error.
    #[tokio::test]
    async fn test_show_empty() {
        let temp_dir = TempDir::new().unwrap();
        let args = SuggestArgs {
            root: temp_dir.path().to_string_lossy().to_string(),
            set:  None,
        };
        run(args).await.unwrap();
    }
}
