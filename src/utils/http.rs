// src/utils/http.rs

//! Retrying HTTP fetch helper.
//!
//! All network access goes through [`Fetcher`], which retries transient
//! failures with a linear backoff. Retries live here and nowhere else;
//! the pipeline above never re-invokes a failed source.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::models::HttpConfig;

/// HTTP client with bounded retries and linear backoff.
pub struct Fetcher {
    client: Client,
    max_retries: u32,
    backoff_base_ms: u64,
    backoff_step_ms: u64,
}

impl Fetcher {
    /// Create a configured fetcher.
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            max_retries: config.max_retries.max(1),
            backoff_base_ms: config.backoff_base_ms,
            backoff_step_ms: config.backoff_step_ms,
        })
    }

    /// GET a URL with optional query parameters.
    pub async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<Response> {
        self.execute(url, || self.client.get(url).query(query))
            .await
    }

    /// GET a URL with query parameters and one extra request header,
    /// for sources authenticated via an API-key header.
    pub async fn get_with_header(
        &self,
        url: &str,
        query: &[(&str, &str)],
        header: (&str, &str),
    ) -> Result<Response> {
        let (name, value) = (header.0.to_string(), header.1.to_string());
        self.execute(url, || {
            self.client
                .get(url)
                .query(query)
                .header(name.as_str(), value.as_str())
        })
        .await
    }

    /// POST a JSON body to a URL.
    pub async fn post_json<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<Response> {
        self.execute(url, || self.client.post(url).json(body)).await
    }

    /// Backoff sleep before a given attempt (0-based), growing linearly.
    fn backoff_delay(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.backoff_base_ms + u64::from(attempt) * self.backoff_step_ms)
    }

    /// Run a request up to `max_retries` times, sleeping before every
    /// attempt. A 403 response counts as transient like any network
    /// error: some boards reject the first request and accept a retry.
    /// The last observed error propagates once attempts are exhausted.
    async fn execute<F>(&self, url: &str, make_request: F) -> Result<Response>
    where
        F: Fn() -> reqwest::RequestBuilder,
    {
        let mut last_err: Option<AppError> = None;

        for attempt in 0..self.max_retries {
            tokio::time::sleep(self.backoff_delay(attempt)).await;

            match make_request().send().await {
                Ok(response) if response.status() == StatusCode::FORBIDDEN => {
                    last_err = Some(AppError::fetch(url, "403 Forbidden"));
                }
                Ok(response) => match response.error_for_status() {
                    Ok(response) => return Ok(response),
                    Err(e) => last_err = Some(AppError::Http(e)),
                },
                Err(e) => last_err = Some(AppError::Http(e)),
            }
        }

        Err(last_err.unwrap_or_else(|| AppError::fetch(url, "no attempts made")))
    }
}
