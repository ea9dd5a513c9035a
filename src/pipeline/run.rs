// src/pipeline/run.rs

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;

use crate::error::Result;
use crate::models::{Config, Secrets};
use crate::report::Mailer;
use crate::sources::{SearchQuery, build_adapters};
use crate::storage::{LocalStorage, Snapshot, SnapshotStorage};
use crate::utils::http::Fetcher;

use super::aggregate::aggregate;

/// Run the full pipeline: collect, snapshot, notify.
///
/// Mail credentials are checked before anything touches the network,
/// so a misconfigured run stops without fetching or writing.
pub async fn run_pipeline(config: &Config, secrets: &Secrets, data_dir: &Path) -> Result<()> {
    let now = Utc::now();

    if !secrets.dry_run {
        secrets.require_mailer()?;
    }

    log::info!("[1/3] Collect - querying sources");
    let fetcher = Arc::new(Fetcher::new(&config.http)?);
    let adapters = build_adapters(config, secrets, fetcher);
    let query = SearchQuery::new(&config.search, now);
    let jobs = aggregate(&adapters, &query, config.search.lookback_hours).await;

    log::info!("[2/3] Snapshot - writing {} jobs", jobs.len());
    let storage = LocalStorage::new(data_dir);
    let snapshot = Snapshot::new(now, jobs);
    storage.write_snapshot(&snapshot).await?;

    log::info!("[3/3] Notify - sending digest");
    if secrets.dry_run {
        log::info!("Dry run: skipping email, {} jobs in snapshot", snapshot.count);
    } else {
        let mailer = Mailer::from_secrets(secrets)?;
        mailer
            .send_digest(&snapshot.jobs, config.search.lookback_hours)
            .await?;
        log::info!("Digest sent: {} jobs", snapshot.count);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_credentials_abort_before_any_write() {
        let tmp = TempDir::new().unwrap();
        let mut config = Config::default();
        // No enabled source should ever be reached.
        config.sources = crate::models::SourcesConfig {
            weworkremotely: false,
            remotive: false,
            arbeitnow: false,
            reed: false,
            jooble: false,
        };
        let secrets = Secrets::default();

        let result = run_pipeline(&config, &secrets, tmp.path()).await;
        assert!(result.is_err());
        assert!(!tmp.path().join("latest_jobs.json").exists());
    }

    #[tokio::test]
    async fn dry_run_writes_snapshot_without_credentials() {
        let tmp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.sources = crate::models::SourcesConfig {
            weworkremotely: false,
            remotive: false,
            arbeitnow: false,
            reed: false,
            jooble: false,
        };
        let secrets = Secrets {
            dry_run: true,
            ..Secrets::default()
        };

        run_pipeline(&config, &secrets, tmp.path()).await.unwrap();

        let storage = LocalStorage::new(tmp.path());
        let snapshot = storage.load_snapshot().await.unwrap().unwrap();
        assert_eq!(snapshot.count, 0);
    }
}
