//! Storage abstractions for digest snapshots.
//!
//! Every run overwrites a single snapshot file with the jobs that
//! survived filtering:
//!
//! ```text
//! {data_dir}/
//! └── latest_jobs.json
//! ```

pub mod local;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::JobRecord;

pub use local::LocalStorage;

/// One run's worth of matching jobs, as persisted to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// When the run that produced this snapshot started
    pub generated_at: DateTime<Utc>,
    /// Number of jobs in the snapshot
    pub count: usize,
    /// The jobs, newest first
    pub jobs: Vec<JobRecord>,
}

impl Snapshot {
    pub fn new(generated_at: DateTime<Utc>, jobs: Vec<JobRecord>) -> Self {
        Self {
            generated_at,
            count: jobs.len(),
            jobs,
        }
    }
}

/// Trait for snapshot storage backends.
#[async_trait]
pub trait SnapshotStorage: Send + Sync {
    /// Persist the snapshot, replacing any previous one.
    async fn write_snapshot(&self, snapshot: &Snapshot) -> Result<()>;

    /// Load the most recent snapshot, if one exists.
    async fn load_snapshot(&self) -> Result<Option<Snapshot>>;
}
