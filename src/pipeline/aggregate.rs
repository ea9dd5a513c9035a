// src/pipeline/aggregate.rs

//! Collection, filtering, dedup, and ordering.
//!
//! Sources run strictly one after another. A failing source is logged
//! and contributes nothing; the run itself never fails here. Records
//! then pass through a single filtering pass:
//!
//! 1. resolve each posting time (absent means "collected now",
//!    unparsable means "too old to keep")
//! 2. keep records inside the trailing lookback window
//! 3. drop repeats of (title, company, link), first occurrence wins
//! 4. order newest first

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};

use crate::models::JobRecord;
use crate::sources::{SearchQuery, SourceAdapter};
use crate::utils::time::parse_posted_at;

/// Query every adapter in order and reduce the combined records.
pub async fn aggregate(
    adapters: &[Box<dyn SourceAdapter>],
    query: &SearchQuery,
    lookback_hours: i64,
) -> Vec<JobRecord> {
    let mut collected = Vec::new();

    for adapter in adapters {
        log::info!("Querying source: {}", adapter.name());
        match adapter.search(query).await {
            Ok(records) => collected.extend(records),
            Err(e) => log::warn!("Source {} failed, skipping: {e}", adapter.name()),
        }
    }

    let total = collected.len();
    let kept = reduce(collected, query.now, lookback_hours);
    log::info!(
        "Aggregated {} records into {} within the last {}h",
        total,
        kept.len(),
        lookback_hours
    );
    kept
}

/// Filter, dedup, and sort an already collected batch.
///
/// Records whose timestamp cannot be parsed are treated as arbitrarily
/// old and excluded. Records with no timestamp at all count as freshly
/// collected and always land inside the window.
fn reduce(records: Vec<JobRecord>, now: DateTime<Utc>, lookback_hours: i64) -> Vec<JobRecord> {
    let cutoff = now - Duration::hours(lookback_hours);
    let mut seen = HashSet::new();
    let mut kept: Vec<(DateTime<Utc>, JobRecord)> = Vec::new();

    for record in records {
        let resolved = match &record.posted_at {
            None => now,
            Some(raw) => match parse_posted_at(raw, now) {
                Some(ts) => ts,
                None => continue,
            },
        };
        if resolved < cutoff || resolved > now {
            continue;
        }
        if !seen.insert(record.dedup_key()) {
            continue;
        }
        kept.push((resolved, record));
    }

    // Stable sort keeps source order among equal timestamps.
    kept.sort_by(|a, b| b.0.cmp(&a.0));
    kept.into_iter().map(|(_, record)| record).collect()
}
