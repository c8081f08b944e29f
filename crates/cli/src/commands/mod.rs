use clap::{Parser, Subcommand};

/// Export command module.
mod export;
/// Hit command module.
mod hit;
/// Import command module.
mod import;
/// Init command module.
mod init;
/// Show command module.
mod show;
/// Suggest command module.
mod suggest;

/// The CLI for the Sluice list store and admission gate.
///
/// This CLI provides commands to prepare store roots, inspect and move list
/// bundles, charge hits against the persisted token buckets, and manage the
/// suggestion file.
#[derive(Parser)]
#[command(name = "sluice")]
pub struct Cli {
    #[command(subcommand)]
    /// The subcommand to execute.
    pub command: Commands,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase verbosity (can be used multiple times: -v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Enumeration of all available CLI commands.
///
/// Each variant represents a different operation on the list store or the
/// admission gate.
#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a list store root at the specified path.
    ///
    /// This command creates the store directory and seeds an empty list index
    /// if none exists yet.
    Init(init::InitArgs),
    /// Show the list index and a summary of every referenced list.
    Show(show::ShowArgs),
    /// Export the index and referenced lists as a bundle file.
    ///
    /// The default format is the binary container; JSON is always available.
    Export(export::ExportArgs),
    /// Import a bundle file, replacing the index and the lists it carries.
    Import(import::ImportArgs),
    /// Charge one hit against a persisted token bucket and print the verdict.
    Hit(hit::HitArgs),
    /// Show or replace the suggestion list.
    Suggest(suggest::SuggestArgs),
}

/// Execute the specified CLI command.
///
/// This function dispatches to the appropriate command handler based on the
/// provided command variant, delegating the actual work to isolated modules.
///
/// # Arguments
/// * `cli` - The parsed CLI arguments.
///
/// # Returns
/// Returns `Ok(())` on success, or a `SluiceError` on failure.
pub async fn run_command(cli: Cli) -> sluice::Result<()> {
    match cli.command {
        Commands::Init(args) => init::run(args).await,
        Commands::Show(args) => show::run(args).await,
        Commands::Export(args) => export::run(args).await,
        Commands::Import(args) => import::run(args).await,
        Commands::Hit(args) => hit::run(args).await,
        Commands::Suggest(args) => suggest::run(args).await,
    }
}
