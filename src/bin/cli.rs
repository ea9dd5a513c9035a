//! jobdigest CLI
//!
//! Local execution entry point.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use jobdigest::{
    error::Result,
    models::{Config, Secrets},
    pipeline,
    storage::{LocalStorage, SnapshotStorage},
};

/// jobdigest - Job board digest mailer
#[derive(Parser, Debug)]
#[command(
    name = "jobdigest",
    version,
    about = "Collects fresh job postings and mails a digest"
)]
struct Cli {
    /// Path to the data directory containing config and snapshots
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the full pipeline: collect, snapshot, notify
    Run {
        /// Write the snapshot but skip sending the email
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate the configuration file
    Validate,

    /// Show current snapshot info
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    log::info!("jobdigest starting...");

    let config_path = cli.data_dir.join("config.toml");
    let config = Config::load_or_default(&config_path);

    match cli.command {
        Command::Run { dry_run } => {
            config.validate()?;

            let mut secrets = Secrets::from_env();
            secrets.dry_run = secrets.dry_run || dry_run;

            pipeline::run_pipeline(&config, &secrets, &cli.data_dir).await?;
            log::info!("Run complete!");
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }

            log::info!(
                "Config OK: {} keywords, {}h lookback",
                config.search.keywords.len(),
                config.search.lookback_hours
            );
            for (name, enabled) in [
                ("weworkremotely", config.sources.weworkremotely),
                ("remotive", config.sources.remotive),
                ("arbeitnow", config.sources.arbeitnow),
                ("reed", config.sources.reed),
                ("jooble", config.sources.jooble),
            ] {
                log::info!("  {}: {}", name, if enabled { "enabled" } else { "disabled" });
            }
        }

        Command::Info => {
            log::info!("Data directory: {}", cli.data_dir.display());

            let storage = LocalStorage::new(&cli.data_dir);
            match storage.load_snapshot().await? {
                Some(snapshot) => {
                    log::info!("Snapshot generated at: {}", snapshot.generated_at);
                    log::info!("Jobs in snapshot: {}", snapshot.count);
                }
                None => log::info!("No snapshot found yet."),
            }
        }
    }

    Ok(())
}
