//! Job-board source adapters.
//!
//! Each adapter wraps one external board behind [`SourceAdapter`] and
//! maps its payload into [`JobRecord`]s. Adapters never fail the run:
//! the pipeline logs an adapter error and moves on to the next source.

mod arbeitnow;
mod jooble;
mod reed;
mod remotive;
mod weworkremotely;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::{Config, JobRecord, SearchConfig, Secrets};
use crate::utils::http::Fetcher;

pub use arbeitnow::ArbeitnowSource;
pub use jooble::JoobleSource;
pub use reed::ReedSource;
pub use remotive::RemotiveSource;
pub use weworkremotely::WeWorkRemotelySource;

/// Search terms shared by every adapter in a run.
///
/// `now` is stamped once when the run starts; adapters that have no
/// posting timestamp use it as the collection time, which keeps every
/// stamped record inside the aggregator's recency window.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub keywords: Vec<String>,
    pub locations: Vec<String>,
    pub now: DateTime<Utc>,
}

impl SearchQuery {
    /// Build a query from the search config, anchored at `now`.
    pub fn new(search: &SearchConfig, now: DateTime<Utc>) -> Self {
        Self {
            keywords: search.keywords.clone(),
            locations: search.locations.clone(),
            now,
        }
    }

    /// First configured location, for sources that accept a single
    /// location parameter.
    pub fn primary_location(&self) -> &str {
        self.locations.first().map(String::as_str).unwrap_or("UK")
    }
}

/// A single job board.
///
/// `search` returns every matching record the source can provide;
/// recency filtering, dedup, and ordering happen in the aggregator.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Short name used in logs and in [`JobRecord::source`].
    fn name(&self) -> &'static str;

    /// Fetch and map all postings matching the query.
    async fn search(&self, query: &SearchQuery) -> crate::error::Result<Vec<JobRecord>>;
}

/// Build the enabled adapters in their fixed invocation order.
///
/// Key-authenticated sources are skipped with a log line when their
/// key is absent from the environment, so a partially configured
/// deployment still runs the open sources.
pub fn build_adapters(
    config: &Config,
    secrets: &Secrets,
    fetcher: Arc<Fetcher>,
) -> Vec<Box<dyn SourceAdapter>> {
    let mut adapters: Vec<Box<dyn SourceAdapter>> = Vec::new();

    if config.sources.weworkremotely {
        adapters.push(Box::new(WeWorkRemotelySource::new(Arc::clone(&fetcher))));
    }
    if config.sources.remotive {
        adapters.push(Box::new(RemotiveSource::new(Arc::clone(&fetcher))));
    }
    if config.sources.arbeitnow {
        adapters.push(Box::new(ArbeitnowSource::new(Arc::clone(&fetcher))));
    }
    if config.sources.reed {
        match &secrets.reed_api_key {
            Some(key) => {
                adapters.push(Box::new(ReedSource::new(Arc::clone(&fetcher), key.clone())))
            }
            None => log::info!("Reed disabled: REED_API_KEY is not set"),
        }
    }
    if config.sources.jooble {
        match &secrets.jooble_api_key {
            Some(key) => adapters.push(Box::new(JoobleSource::new(fetcher, key.clone()))),
            None => log::info!("Jooble disabled: JOOBLE_API_KEY is not set"),
        }
    }

    adapters
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HttpConfig;

    fn fetcher() -> Arc<Fetcher> {
        Arc::new(Fetcher::new(&HttpConfig::default()).unwrap())
    }

    fn query() -> SearchQuery {
        SearchQuery::new(&SearchConfig::default(), Utc::now())
    }

    #[test]
    fn primary_location_falls_back() {
        let mut q = query();
        assert_eq!(q.primary_location(), "London");
        q.locations.clear();
        assert_eq!(q.primary_location(), "UK");
    }

    #[test]
    fn build_adapters_skips_keyed_sources_without_keys() {
        let config = Config::default();
        let secrets = Secrets::default();
        let adapters = build_adapters(&config, &secrets, fetcher());

        let names: Vec<_> = adapters.iter().map(|a| a.name()).collect();
        assert_eq!(names, vec!["weworkremotely", "remotive", "arbeitnow"]);
    }

    #[test]
    fn build_adapters_includes_keyed_sources_with_keys() {
        let config = Config::default();
        let secrets = Secrets {
            reed_api_key: Some("k1".to_string()),
            jooble_api_key: Some("k2".to_string()),
            ..Secrets::default()
        };
        let adapters = build_adapters(&config, &secrets, fetcher());

        let names: Vec<_> = adapters.iter().map(|a| a.name()).collect();
        assert_eq!(
            names,
            vec!["weworkremotely", "remotive", "arbeitnow", "reed", "jooble"]
        );
    }

    #[test]
    fn build_adapters_honors_disable_switches() {
        let mut config = Config::default();
        config.sources.remotive = false;
        config.sources.arbeitnow = false;
        let adapters = build_adapters(&config, &Secrets::default(), fetcher());

        let names: Vec<_> = adapters.iter().map(|a| a.name()).collect();
        assert_eq!(names, vec!["weworkremotely"]);
    }
}
