//! Local filesystem snapshot storage.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::storage::{Snapshot, SnapshotStorage};

const SNAPSHOT_KEY: &str = "latest_jobs.json";

/// Local filesystem storage backend.
#[derive(Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Get the full path for a relative key.
    fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path(key);
        self.ensure_dir(&path).await?;

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Write JSON data.
    async fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.write_bytes(key, &bytes).await
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Read JSON data.
    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.read_bytes(key).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl SnapshotStorage for LocalStorage {
    async fn write_snapshot(&self, snapshot: &Snapshot) -> Result<()> {
        self.write_json(SNAPSHOT_KEY, snapshot).await?;
        log::info!(
            "Snapshot: {} jobs written to {}",
            snapshot.count,
            self.path(SNAPSHOT_KEY).display()
        );
        Ok(())
    }

    async fn load_snapshot(&self) -> Result<Option<Snapshot>> {
        self.read_json(SNAPSHOT_KEY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::JobRecord;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn job(link: &str) -> JobRecord {
        JobRecord {
            title: "Data Analyst".to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            link: link.to_string(),
            posted_at: Some("2026-08-05T10:00:00+00:00".to_string()),
            source: "remotive".to_string(),
        }
    }

    #[tokio::test]
    async fn test_write_and_read_bytes() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        storage.write_bytes("test.txt", b"hello").await.unwrap();
        let data = storage.read_bytes("test.txt").await.unwrap();
        assert_eq!(data, Some(b"hello".to_vec()));
    }

    #[tokio::test]
    async fn test_load_missing_snapshot() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        assert!(storage.load_snapshot().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_snapshot_round_trip() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        let now = Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap();
        let snapshot = Snapshot::new(now, vec![job("https://example.com/1")]);
        storage.write_snapshot(&snapshot).await.unwrap();

        let loaded = storage.load_snapshot().await.unwrap().unwrap();
        assert_eq!(loaded.count, 1);
        assert_eq!(loaded.generated_at, now);
        assert_eq!(loaded.jobs[0].link, "https://example.com/1");
    }

    #[tokio::test]
    async fn test_overwrite_replaces_previous_snapshot() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        let now = Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap();
        storage
            .write_snapshot(&Snapshot::new(now, vec![job("https://example.com/1")]))
            .await
            .unwrap();
        storage
            .write_snapshot(&Snapshot::new(now, Vec::new()))
            .await
            .unwrap();

        let loaded = storage.load_snapshot().await.unwrap().unwrap();
        assert_eq!(loaded.count, 0);
        assert!(loaded.jobs.is_empty());
    }
}
