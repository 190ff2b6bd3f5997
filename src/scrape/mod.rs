//! The scraping pipeline
//!
//! [`GraphFetcher`] is the seam between the HTTP layer and the browser
//! machinery: the real [`Scraper`] drives a fresh headless session per
//! request (validate happened upstream; acquire, navigate, extract,
//! release), while tests substitute an in-process fake. Stages run
//! strictly sequentially; there is no partial result, and the session
//! is released before the result is returned.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::BoxFuture;
use url::Url;

use crate::browser::{launcher_for, Session, SessionManager};
use crate::config::Config;
use crate::error::Result;
use crate::graph::GraphResponse;
use crate::request::GraphRequest;

pub mod extract;
pub mod navigate;

/// Abstraction over producing a contribution graph for a request.
///
/// The HTTP layer holds this as `Arc<dyn GraphFetcher>`, so endpoint
/// tests can swap in a fake without launching a browser.
#[async_trait]
pub trait GraphFetcher: Send + Sync {
    /// Fetch the contribution graph for a validated request.
    async fn fetch(&self, request: GraphRequest) -> Result<GraphResponse>;
}

/// The real pipeline: headless Chromium against the live profile site.
#[derive(Debug, Clone)]
pub struct Scraper {
    manager: SessionManager,
    base_url: String,
    navigation_timeout: Duration,
}

impl Scraper {
    /// Build the scraper from merged configuration.
    ///
    /// The launch strategy is resolved here, once, and injected into
    /// the session manager.
    pub fn new(config: &Config) -> Self {
        Self {
            manager: SessionManager::new(launcher_for(&config.browser)),
            base_url: config.scrape.base_url.clone(),
            navigation_timeout: Duration::from_secs(config.scrape.navigation_timeout_seconds),
        }
    }
}

#[async_trait]
impl GraphFetcher for Scraper {
    async fn fetch(&self, request: GraphRequest) -> Result<GraphResponse> {
        let url = navigate::profile_url(&self.base_url, &request)?;
        tracing::info!(handle = %request.handle, url = %url, "fetching contribution graph");

        let timeout = self.navigation_timeout;
        let graph = self
            .manager
            .with_session(|session| run_stages(session, url.clone(), timeout))
            .await?;

        tracing::debug!(
            handle = %request.handle,
            weeks = graph.weeks.len(),
            highest = graph.highest,
            "contribution graph extracted"
        );
        Ok(graph)
    }
}

/// Navigate-then-extract against one session.
///
/// Split out so `with_session` can release the session no matter which
/// stage fails.
fn run_stages(
    session: &Session,
    url: Url,
    timeout: Duration,
) -> BoxFuture<'_, Result<GraphResponse>> {
    Box::pin(async move {
        navigate::navigate(session, &url, timeout).await?;
        extract::extract(session).await
    })
}

/// Convenience constructor used by `main` for both serve and fetch.
pub fn scraper_from(config: &Config) -> Arc<dyn GraphFetcher> {
    Arc::new(Scraper::new(config))
}
