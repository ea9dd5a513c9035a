// src/sources/remotive.rs

//! Remotive source adapter.
//!
//! One bulk GET against the public API, then keyword matching against
//! title and description locally. `publication_date` is an ISO-8601
//! naive datetime and passes through as-is for the aggregator to parse.

use std::sync::Arc;

use serde::Deserialize;

use crate::error::Result;
use crate::models::JobRecord;
use crate::sources::{SearchQuery, SourceAdapter};
use crate::utils::contains_any_keyword;
use crate::utils::http::Fetcher;

const API_URL: &str = "https://remotive.com/api/remote-jobs";

pub struct RemotiveSource {
    fetcher: Arc<Fetcher>,
}

#[derive(Debug, Deserialize)]
struct RemotiveResponse {
    #[serde(default)]
    jobs: Vec<RemotiveJob>,
}

#[derive(Debug, Deserialize)]
struct RemotiveJob {
    #[serde(default)]
    title: String,
    #[serde(default)]
    company_name: String,
    #[serde(default)]
    candidate_required_location: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    publication_date: String,
    #[serde(default)]
    description: String,
}

impl RemotiveSource {
    pub fn new(fetcher: Arc<Fetcher>) -> Self {
        Self { fetcher }
    }

    fn matching_records(response: RemotiveResponse, keywords: &[String]) -> Vec<JobRecord> {
        response
            .jobs
            .into_iter()
            .filter(|job| {
                contains_any_keyword(&job.title, keywords)
                    || contains_any_keyword(&job.description, keywords)
            })
            .map(|job| JobRecord {
                title: job.title,
                company: non_empty_or(job.company_name, "N/A"),
                location: non_empty_or(job.candidate_required_location, "Remote"),
                link: job.url,
                posted_at: non_empty(job.publication_date),
                source: "remotive".to_string(),
            })
            .collect()
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() { None } else { Some(value) }
}

fn non_empty_or(value: String, fallback: &str) -> String {
    non_empty(value).unwrap_or_else(|| fallback.to_string())
}

#[async_trait::async_trait]
impl SourceAdapter for RemotiveSource {
    fn name(&self) -> &'static str {
        "remotive"
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<JobRecord>> {
        let response = self.fetcher.get(API_URL, &[]).await?;
        let payload: RemotiveResponse = response.json().await?;

        let records = Self::matching_records(payload, &query.keywords);
        log::info!("Remotive: {} matching jobs", records.len());
        Ok(records)
    }
}
