//! Target URL construction and page navigation
//!
//! The profile URL always selects the overview tab, where the
//! contribution calendar lives. The optional date range is appended
//! only when both endpoints are present; a lone endpoint is silently
//! dropped rather than rejected.

use std::time::Duration;

use url::Url;

use crate::browser::Session;
use crate::error::{Result, SkygraphError};
use crate::request::GraphRequest;

/// Build the profile URL for a validated request.
///
/// # Errors
///
/// Returns [`SkygraphError::Config`] if the configured base URL cannot
/// be parsed or joined; request data itself cannot fail here.
pub fn profile_url(base: &str, request: &GraphRequest) -> Result<Url> {
    let base = Url::parse(base)
        .map_err(|e| SkygraphError::Config(format!("invalid base URL {}: {}", base, e)))?;
    let mut url = base
        .join(&request.handle)
        .map_err(|e| SkygraphError::Config(format!("cannot join handle onto base URL: {}", e)))?;

    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("tab", "overview");
        if let Some((from, to)) = request.range() {
            pairs.append_pair("from", from);
            pairs.append_pair("to", to);
        }
    }

    Ok(url)
}

/// Drive the session's page to `url` and wait for the load to settle.
///
/// The whole load (initial request plus settling) is bounded by
/// `timeout`; a timeout produces a [`SkygraphError::Navigation`] with a
/// message distinct from transport failures so operators can tell slow
/// pages from unreachable ones.
pub async fn navigate(session: &Session, url: &Url, timeout: Duration) -> Result<()> {
    let page = session.page();

    let load = async {
        page.goto(url.as_str())
            .await
            .map_err(|e| SkygraphError::Navigation(format!("failed to load {}: {}", url, e)))?;
        page.wait_for_navigation()
            .await
            .map_err(|e| SkygraphError::Navigation(format!("page load did not settle: {}", e)))?;
        Ok::<_, SkygraphError>(())
    };

    match tokio::time::timeout(timeout, load).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(e.into()),
        Err(_) => Err(SkygraphError::Navigation(format!(
            "page load timed out after {}s",
            timeout.as_secs()
        ))
        .into()),
    }
}
