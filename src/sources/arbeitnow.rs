// src/sources/arbeitnow.rs

//! Arbeitnow source adapter.
//!
//! Single GET against the job-board API. `created_at` is a unix
//! timestamp in seconds and is converted to RFC 3339 here so the
//! aggregator sees one canonical shape.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use serde::Deserialize;

use crate::error::Result;
use crate::models::JobRecord;
use crate::sources::{SearchQuery, SourceAdapter};
use crate::utils::contains_any_keyword;
use crate::utils::http::Fetcher;

const API_URL: &str = "https://arbeitnow.com/api/job-board-api";

pub struct ArbeitnowSource {
    fetcher: Arc<Fetcher>,
}

#[derive(Debug, Deserialize)]
struct ArbeitnowResponse {
    #[serde(default)]
    data: Vec<ArbeitnowJob>,
}

#[derive(Debug, Deserialize)]
struct ArbeitnowJob {
    #[serde(default)]
    title: String,
    #[serde(default)]
    company_name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    remote: bool,
    #[serde(default)]
    created_at: Option<i64>,
}

impl ArbeitnowSource {
    pub fn new(fetcher: Arc<Fetcher>) -> Self {
        Self { fetcher }
    }

    fn matching_records(response: ArbeitnowResponse, keywords: &[String]) -> Vec<JobRecord> {
        response
            .data
            .into_iter()
            .filter(|job| {
                contains_any_keyword(&job.title, keywords)
                    || contains_any_keyword(&job.description, keywords)
            })
            .map(|job| {
                let location = if job.location.trim().is_empty() {
                    if job.remote { "Remote" } else { "N/A" }.to_string()
                } else {
                    job.location
                };
                JobRecord {
                    title: job.title,
                    company: if job.company_name.trim().is_empty() {
                        "N/A".to_string()
                    } else {
                        job.company_name
                    },
                    location,
                    link: job.url,
                    posted_at: job.created_at.and_then(unix_to_rfc3339),
                    source: "arbeitnow".to_string(),
                }
            })
            .collect()
    }
}

fn unix_to_rfc3339(secs: i64) -> Option<String> {
    Utc.timestamp_opt(secs, 0).single().map(|dt| dt.to_rfc3339())
}

#[async_trait::async_trait]
impl SourceAdapter for ArbeitnowSource {
    fn name(&self) -> &'static str {
        "arbeitnow"
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<JobRecord>> {
        let response = self.fetcher.get(API_URL, &[]).await?;
        let payload: ArbeitnowResponse = response.json().await?;

        let records = Self::matching_records(payload, &query.keywords);
        log::info!("Arbeitnow: {} matching jobs", records.len());
        Ok(records)
    }
}
