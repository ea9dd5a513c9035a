// src/sources/reed.rs

//! Reed source adapter.
//!
//! One GET per keyword against the Reed Jobs API, authenticated with
//! an `x-api-key` header. Reed returns no usable posting timestamp,
//! so records are stamped with the run's collection time.

use std::sync::Arc;

use serde::Deserialize;

use crate::error::Result;
use crate::models::JobRecord;
use crate::sources::{SearchQuery, SourceAdapter};
use crate::utils::contains_any_keyword;
use crate::utils::http::Fetcher;

const API_URL: &str = "https://www.reed.co.uk/api/1.0/jobs";
const PAGE_SIZE: &str = "25";

pub struct ReedSource {
    fetcher: Arc<Fetcher>,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct ReedResponse {
    #[serde(default)]
    results: Vec<ReedJob>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReedJob {
    #[serde(default)]
    job_title: String,
    #[serde(default)]
    employer_name: String,
    #[serde(default)]
    location_name: String,
    #[serde(default)]
    job_url: String,
    #[serde(default)]
    job_description: String,
}

impl ReedSource {
    pub fn new(fetcher: Arc<Fetcher>, api_key: String) -> Self {
        Self { fetcher, api_key }
    }

    fn matching_records(
        response: ReedResponse,
        keywords: &[String],
        collected_at: &str,
    ) -> Vec<JobRecord> {
        response
            .results
            .into_iter()
            .filter(|job| {
                contains_any_keyword(&job.job_title, keywords)
                    || contains_any_keyword(&job.job_description, keywords)
            })
            .map(|job| JobRecord {
                title: job.job_title,
                company: if job.employer_name.trim().is_empty() {
                    "N/A".to_string()
                } else {
                    job.employer_name
                },
                location: if job.location_name.trim().is_empty() {
                    "N/A".to_string()
                } else {
                    job.location_name
                },
                link: job.job_url,
                posted_at: Some(collected_at.to_string()),
                source: "reed".to_string(),
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl SourceAdapter for ReedSource {
    fn name(&self) -> &'static str {
        "reed"
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<JobRecord>> {
        let location = query.primary_location();
        let collected_at = query.now.to_rfc3339();
        let mut records = Vec::new();

        for keyword in &query.keywords {
            let response = self
                .fetcher
                .get_with_header(
                    API_URL,
                    &[
                        ("keywords", keyword.as_str()),
                        ("location", location),
                        ("resultsToTake", PAGE_SIZE),
                    ],
                    ("x-api-key", &self.api_key),
                )
                .await?;
            let payload: ReedResponse = response.json().await?;
            records.extend(Self::matching_records(
                payload,
                std::slice::from_ref(keyword),
                &collected_at,
            ));
        }

        log::info!("Reed: {} matching jobs", records.len());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "results": [
            {
                "jobTitle": "Data Analyst",
                "employerName": "Omega Ltd",
                "locationName": "London",
                "jobUrl": "https://www.reed.co.uk/jobs/data-analyst/1001",
                "jobDescription": "Reporting with SQL."
            },
            {
                "jobTitle": "Warehouse Operative",
                "employerName": "Depot",
                "locationName": "",
                "jobUrl": "https://www.reed.co.uk/jobs/warehouse/1002",
                "jobDescription": "Picking and packing. Data analyst tools not required."
            },
            {
                "jobTitle": "Driver",
                "employerName": "Vans",
                "locationName": "Leeds",
                "jobUrl": "https://www.reed.co.uk/jobs/driver/1003",
                "jobDescription": "Deliveries."
            }
        ]
    }"#;

    #[test]
    fn matches_title_or_description() {
        let payload: ReedResponse = serde_json::from_str(FIXTURE).unwrap();
        let records = ReedSource::matching_records(
            payload,
            &["data analyst".to_string()],
            "2026-08-06T12:00:00+00:00",
        );

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "Data Analyst");
        assert_eq!(records[1].title, "Warehouse Operative");
        assert_eq!(records[1].location, "N/A");
    }

    #[test]
    fn stamps_collection_time() {
        let payload: ReedResponse = serde_json::from_str(FIXTURE).unwrap();
        let records = ReedSource::matching_records(
            payload,
            &["data analyst".to_string()],
            "2026-08-06T12:00:00+00:00",
        );

        assert!(
            records
                .iter()
                .all(|r| r.posted_at.as_deref() == Some("2026-08-06T12:00:00+00:00"))
        );
        assert!(records.iter().all(|r| r.source == "reed"));
    }
}
