//! Browser session management
//!
//! One [`Session`] is one live Chromium process plus one open page,
//! owned by exactly one request. Sessions are never pooled or shared:
//! every request pays full launch cost in exchange for a guaranteed
//! fresh page state. The [`SessionManager`] is the only component that
//! creates or destroys sessions, and release runs on every exit path,
//! including cancellation of the owning request.

use chromiumoxide::browser::Browser;
use chromiumoxide::Page;
use futures::future::BoxFuture;
use futures::StreamExt;
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::error::{Result, SkygraphError};

pub mod launcher;

pub use launcher::{launcher_for, ExecutableLauncher, Launcher, SystemLauncher};

/// One live browser process and one open page, scoped to one request.
///
/// Dropping an unreleased session (a cancelled request) spawns a
/// detached close task so the browser process does not leak.
pub struct Session {
    browser: Option<Browser>,
    page: Page,
    handler_task: Option<JoinHandle<()>>,
}

impl Session {
    /// The session's single open page.
    pub fn page(&self) -> &Page {
        &self.page
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        let browser = self.browser.take();
        let task = self.handler_task.take();
        if browser.is_none() && task.is_none() {
            return;
        }
        // Normal release empties both fields first; reaching here means
        // the owning request was cancelled mid-flight.
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            handle.spawn(async move {
                if let Some(mut browser) = browser {
                    if let Err(e) = browser.close().await {
                        tracing::debug!(error = %e, "close from drop guard failed");
                    }
                }
                if let Some(task) = task {
                    task.abort();
                }
            });
        }
    }
}

/// Creates and destroys browser sessions.
///
/// The launch strategy is injected at construction (selected once at
/// process start); the manager itself holds no other state and is
/// shared freely across concurrent requests.
#[derive(Debug, Clone)]
pub struct SessionManager {
    launcher: Arc<dyn Launcher>,
}

impl SessionManager {
    /// Create a manager around an injected launch strategy.
    pub fn new(launcher: Arc<dyn Launcher>) -> Self {
        Self { launcher }
    }

    /// Launch a browser and open a blank page for it.
    ///
    /// A background task is spawned to drive the CDP event handler for
    /// the lifetime of the session.
    ///
    /// # Errors
    ///
    /// Returns [`SkygraphError::SessionAcquisition`] if the browser
    /// cannot be launched and [`SkygraphError::PageCreation`] if the
    /// page cannot be opened; in the latter case the half-open browser
    /// is torn down before the error is reported.
    pub async fn acquire(&self) -> Result<Session> {
        let (browser, mut handler) = self.launcher.launch().await?;
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!(error = %e, "CDP handler reported an error");
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                let mut browser = browser;
                if let Err(close_err) = browser.close().await {
                    tracing::warn!(error = %close_err, "failed to close browser after page creation failure");
                }
                handler_task.abort();
                return Err(SkygraphError::PageCreation(e.to_string()).into());
            }
        };

        Ok(Session {
            browser: Some(browser),
            page,
            handler_task: Some(handler_task),
        })
    }

    /// Destroy a session.
    ///
    /// Never fails: close errors are logged at WARN and swallowed so a
    /// release failure cannot shadow an earlier, more informative
    /// pipeline failure.
    pub async fn release(&self, mut session: Session) {
        if let Some(mut browser) = session.browser.take() {
            if let Err(e) = browser.close().await {
                tracing::warn!(error = %e, "failed to close browser during release");
            }
        }
        if let Some(task) = session.handler_task.take() {
            task.abort();
        }
    }

    /// Run `f` against a freshly acquired session, then release it.
    ///
    /// Release happens whether `f` succeeds or fails; if the whole
    /// future is dropped instead, the session's drop guard closes the
    /// browser from a detached task.
    pub async fn with_session<T, F>(&self, f: F) -> Result<T>
    where
        F: for<'a> FnOnce(&'a Session) -> BoxFuture<'a, Result<T>>,
    {
        let session = self.acquire().await?;
        let manager = self.clone();
        scoped(session, f, move |session| async move {
            manager.release(session).await;
            Ok(())
        })
        .await
    }
}

/// Run `f` against a resource, then release it unconditionally.
///
/// The resource outlives `f` on every path, and a release failure is
/// logged and swallowed so it can never shadow `f`'s own result.
async fn scoped<R, T, F, D, Fut>(resource: R, f: F, release: D) -> Result<T>
where
    F: for<'a> FnOnce(&'a R) -> BoxFuture<'a, Result<T>>,
    D: FnOnce(R) -> Fut,
    Fut: std::future::Future<Output = Result<()>>,
{
    let result = f(&resource).await;
    if let Err(e) = release(resource).await {
        tracing::warn!(error = %e, "release failed");
    }
    result
}
