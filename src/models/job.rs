//! Job record data structure.

use serde::{Deserialize, Serialize};

/// A job posting scraped from one of the sources.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JobRecord {
    /// Posting title
    pub title: String,

    /// Company name ("N/A" if the source does not expose one)
    pub company: String,

    /// Location label as reported by the source
    pub location: String,

    /// Full URL to the posting; primary external identity
    pub link: String,

    /// Best-effort posting timestamp text; None means unknown.
    ///
    /// Adapters store whatever the source reports (ISO-8601, RFC 2822,
    /// a bare date, or relative text like "2 days ago"). Normalization to
    /// an absolute instant happens in the aggregation pipeline.
    #[serde(rename = "posted_at_iso")]
    pub posted_at: Option<String>,

    /// Name of the adapter that produced this record
    pub source: String,
}

impl JobRecord {
    /// Deduplication key: case-insensitive on title and company,
    /// exact on link.
    pub fn dedup_key(&self) -> (String, String, String) {
        (
            self.title.to_lowercase(),
            self.company.to_lowercase(),
            self.link.clone(),
        )
    }

    /// Format this record as one multi-line block of the digest body.
    pub fn digest_block(&self) -> String {
        let posted = self.posted_at.as_deref().unwrap_or("unknown");
        format!(
            "{} — {} ({}) [{}]\n{}\nPosted: {}",
            self.title, self.company, self.location, self.source, self.link, posted
        )
    }
}
