// src/sources/weworkremotely.rs

//! We Work Remotely source adapter.
//!
//! Two sub-sources behind one adapter: the remote-data-jobs RSS feed
//! and the HTML search pages (two pages per keyword). Either half may
//! fail on its own; the adapter logs and returns whatever the other
//! half produced. Records from both halves are deduplicated by link
//! before they leave the adapter.
//!
//! The feed is parsed with the same HTML parser used for the search
//! pages. That parser treats `<link>` as a void element and drops its
//! text, so the item URL is read from `<guid>` instead.

use std::collections::HashSet;
use std::sync::Arc;

use scraper::{Html, Selector};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::JobRecord;
use crate::sources::{SearchQuery, SourceAdapter};
use crate::utils::http::Fetcher;
use crate::utils::{contains_any_keyword, normalize_whitespace, resolve_url};

const FEED_URL: &str = "https://weworkremotely.com/categories/remote-data-jobs.rss";
const SEARCH_URL: &str = "https://weworkremotely.com/remote-jobs/search";
const BASE_URL: &str = "https://weworkremotely.com/";
const SEARCH_PAGES: u32 = 2;

pub struct WeWorkRemotelySource {
    fetcher: Arc<Fetcher>,
}

impl WeWorkRemotelySource {
    pub fn new(fetcher: Arc<Fetcher>) -> Self {
        Self { fetcher }
    }

    async fn fetch_feed(&self, query: &SearchQuery) -> Result<Vec<JobRecord>> {
        let response = self.fetcher.get(FEED_URL, &[]).await?;
        let body = response.text().await?;
        parse_feed(&body, &query.keywords)
    }

    async fn fetch_search(&self, query: &SearchQuery) -> Result<Vec<JobRecord>> {
        let base = Url::parse(BASE_URL)?;
        let collected_at = query.now.to_rfc3339();
        let mut records = Vec::new();

        for keyword in &query.keywords {
            for page in 1..=SEARCH_PAGES {
                let page_str = page.to_string();
                let response = self
                    .fetcher
                    .get(
                        SEARCH_URL,
                        &[("term", keyword.as_str()), ("page", page_str.as_str())],
                    )
                    .await?;
                let body = response.text().await?;
                records.extend(parse_search_page(&body, &base, &collected_at)?);
            }
        }

        Ok(records)
    }
}

#[async_trait::async_trait]
impl SourceAdapter for WeWorkRemotelySource {
    fn name(&self) -> &'static str {
        "weworkremotely"
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<JobRecord>> {
        let mut records = Vec::new();

        match self.fetch_feed(query).await {
            Ok(feed_records) => records.extend(feed_records),
            Err(e) => log::warn!("WWR feed failed: {e}"),
        }

        match self.fetch_search(query).await {
            Ok(search_records) => records.extend(search_records),
            Err(e) => log::warn!("WWR search failed: {e}"),
        }

        let records = dedup_by_link(records);
        log::info!("WWR: {} matching jobs", records.len());
        Ok(records)
    }
}

/// Parse the RSS feed body into matching records.
///
/// Feed titles carry the company prefix ("Company: Job Title"), which
/// is split off so the record fields line up with the other sources.
fn parse_feed(body: &str, keywords: &[String]) -> Result<Vec<JobRecord>> {
    let document = Html::parse_document(body);
    let item_sel = parse_selector("item")?;
    let title_sel = parse_selector("title")?;
    let guid_sel = parse_selector("guid")?;
    // html5ever lowercases tag names, so pubDate arrives as pubdate.
    let date_sel = parse_selector("pubdate")?;
    let desc_sel = parse_selector("description")?;

    let mut records = Vec::new();
    for item in document.select(&item_sel) {
        let raw_title = first_text(&item, &title_sel);
        let link = first_text(&item, &guid_sel);
        if raw_title.is_empty() || link.is_empty() {
            continue;
        }

        let description = first_text(&item, &desc_sel);
        if !contains_any_keyword(&raw_title, keywords)
            && !contains_any_keyword(&description, keywords)
        {
            continue;
        }

        let (company, title) = split_company_title(&raw_title);
        let posted_at = first_text(&item, &date_sel);

        records.push(JobRecord {
            title,
            company,
            location: "Remote".to_string(),
            link,
            posted_at: if posted_at.is_empty() {
                None
            } else {
                Some(posted_at)
            },
            source: "weworkremotely".to_string(),
        });
    }

    Ok(records)
}

/// Parse one HTML search results page.
///
/// Search results carry no posting date, so every record is stamped
/// with the run's collection time.
fn parse_search_page(body: &str, base: &Url, collected_at: &str) -> Result<Vec<JobRecord>> {
    let document = Html::parse_document(body);
    let link_sel = parse_selector("section.jobs li a[href*='/remote-jobs/']")?;
    let title_sel = parse_selector("span.title")?;
    let company_sel = parse_selector("span.company")?;

    let mut records = Vec::new();
    for anchor in document.select(&link_sel) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let title = first_text(&anchor, &title_sel);
        if title.is_empty() {
            continue;
        }
        let company = first_text(&anchor, &company_sel);

        records.push(JobRecord {
            title,
            company: if company.is_empty() {
                "N/A".to_string()
            } else {
                company
            },
            location: "Remote".to_string(),
            link: resolve_url(base, href),
            posted_at: Some(collected_at.to_string()),
            source: "weworkremotely".to_string(),
        });
    }

    Ok(records)
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| AppError::selector(selector, e.to_string()))
}

fn first_text(element: &scraper::ElementRef<'_>, selector: &Selector) -> String {
    element
        .select(selector)
        .next()
        .map(|e| normalize_whitespace(&e.text().collect::<String>()))
        .unwrap_or_default()
}

/// Split a feed title of the form "Company: Job Title".
///
/// Titles without a recognizable separator keep the whole text as the
/// job title with an unknown company.
fn split_company_title(raw: &str) -> (String, String) {
    for separator in [": ", " – ", " - "] {
        if let Some((company, title)) = raw.split_once(separator) {
            let company = company.trim();
            let title = title.trim();
            if !company.is_empty() && !title.is_empty() {
                return (company.to_string(), title.to_string());
            }
        }
    }
    ("N/A".to_string(), raw.trim().to_string())
}

fn dedup_by_link(records: Vec<JobRecord>) -> Vec<JobRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|r| seen.insert(r.link.clone()))
        .collect()
}
