// src/sources/jooble.rs

//! Jooble source adapter.
//!
//! One POST per keyword against the Jooble search API. The key rides
//! in the JSON payload rather than a header. `updated` is whatever
//! date shape Jooble emits and passes through for the aggregator.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::JobRecord;
use crate::sources::{SearchQuery, SourceAdapter};
use crate::utils::http::Fetcher;

const API_URL: &str = "https://jooble.org/api";

pub struct JoobleSource {
    fetcher: Arc<Fetcher>,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct JoobleRequest<'a> {
    keywords: &'a str,
    location: &'a str,
    #[serde(rename = "apiKey")]
    api_key: &'a str,
}

#[derive(Debug, Deserialize)]
struct JoobleResponse {
    #[serde(default)]
    jobs: Vec<JoobleJob>,
}

#[derive(Debug, Deserialize)]
struct JoobleJob {
    #[serde(default)]
    title: String,
    #[serde(default)]
    company: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    updated: String,
}

impl JoobleSource {
    pub fn new(fetcher: Arc<Fetcher>, api_key: String) -> Self {
        Self { fetcher, api_key }
    }

    fn records(response: JoobleResponse) -> Vec<JobRecord> {
        response
            .jobs
            .into_iter()
            .filter(|job| !job.title.trim().is_empty() && !job.link.trim().is_empty())
            .map(|job| JobRecord {
                title: job.title,
                company: if job.company.trim().is_empty() {
                    "N/A".to_string()
                } else {
                    job.company
                },
                location: if job.location.trim().is_empty() {
                    "N/A".to_string()
                } else {
                    job.location
                },
                link: job.link,
                posted_at: if job.updated.trim().is_empty() {
                    None
                } else {
                    Some(job.updated)
                },
                source: "jooble".to_string(),
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl SourceAdapter for JoobleSource {
    fn name(&self) -> &'static str {
        "jooble"
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<JobRecord>> {
        let location = query.primary_location();
        let mut records = Vec::new();

        for keyword in &query.keywords {
            let body = JoobleRequest {
                keywords: keyword,
                location,
                api_key: &self.api_key,
            };
            let response = self.fetcher.post_json(API_URL, &body).await?;
            let payload: JoobleResponse = response.json().await?;
            records.extend(Self::records(payload));
        }

        log::info!("Jooble: {} matching jobs", records.len());
        Ok(records)
    }
}
