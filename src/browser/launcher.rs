//! Chromium launch strategies
//!
//! The choice of how the browser binary is located is made once at
//! process start and injected into the session manager as a
//! [`Launcher`] trait object; per-request code never branches on the
//! deployment environment. Two strategies exist:
//!
//! - [`SystemLauncher`] -- let the CDP layer locate an installed
//!   Chrome/Chromium.
//! - [`ExecutableLauncher`] -- launch an explicitly configured binary
//!   (container images, vendored builds).

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig, BrowserConfigBuilder, HeadlessMode};
use chromiumoxide::handler::Handler;

use crate::config::BrowserSettings;
use crate::error::{Result, SkygraphError};

/// Launch flags shared by every strategy.
///
/// The target page blocks script-driven DOM inspection under its
/// default security posture, so web security is relaxed; certificate
/// errors are tolerated because scraping availability wins over strict
/// transport validation here. Scrollbars would perturb the fixed
/// viewport layout.
pub(crate) const CHROME_ARGS: &[&str] = &[
    "--hide-scrollbars",
    "--disable-web-security",
    "--ignore-certificate-errors",
    "--no-first-run",
    "--no-default-browser-check",
    "--no-sandbox",
];

/// Abstraction over the ways a Chromium process can be started.
///
/// Implementations build the launch configuration from
/// [`BrowserSettings`] and return the connected [`Browser`] together
/// with its CDP event [`Handler`], which the caller must drive.
#[async_trait]
pub trait Launcher: Send + Sync + std::fmt::Debug {
    /// Launch a browser process.
    ///
    /// # Errors
    ///
    /// Returns [`SkygraphError::SessionAcquisition`] if the launch
    /// configuration is invalid or the process cannot be started
    /// (missing executable, resource exhaustion).
    async fn launch(&self) -> Result<(Browser, Handler)>;
}

/// Launcher that relies on the CDP layer to find a system Chrome.
#[derive(Debug, Clone)]
pub struct SystemLauncher {
    settings: BrowserSettings,
}

impl SystemLauncher {
    pub fn new(settings: BrowserSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl Launcher for SystemLauncher {
    async fn launch(&self) -> Result<(Browser, Handler)> {
        launch_with(base_config(&self.settings)).await
    }
}

/// Launcher that starts an explicitly configured Chromium binary.
#[derive(Debug, Clone)]
pub struct ExecutableLauncher {
    path: PathBuf,
    settings: BrowserSettings,
}

impl ExecutableLauncher {
    pub fn new(path: PathBuf, settings: BrowserSettings) -> Self {
        Self { path, settings }
    }
}

#[async_trait]
impl Launcher for ExecutableLauncher {
    async fn launch(&self) -> Result<(Browser, Handler)> {
        launch_with(base_config(&self.settings).chrome_executable(&self.path)).await
    }
}

/// Select the launch strategy for this process.
///
/// Called once at startup; the returned trait object is injected into
/// [`crate::browser::SessionManager::new`].
pub fn launcher_for(settings: &BrowserSettings) -> Arc<dyn Launcher> {
    match &settings.executable {
        Some(path) => Arc::new(ExecutableLauncher::new(path.clone(), settings.clone())),
        None => Arc::new(SystemLauncher::new(settings.clone())),
    }
}

fn base_config(settings: &BrowserSettings) -> BrowserConfigBuilder {
    let builder = BrowserConfig::builder()
        .window_size(settings.viewport_width, settings.viewport_height)
        .args(CHROME_ARGS.iter().copied());
    if settings.headless {
        builder.headless_mode(HeadlessMode::New)
    } else {
        builder.with_head()
    }
}

async fn launch_with(builder: BrowserConfigBuilder) -> Result<(Browser, Handler)> {
    let config = builder
        .build()
        .map_err(|e| SkygraphError::SessionAcquisition(format!("invalid launch config: {}", e)))?;
    let (browser, handler) = Browser::launch(config).await.map_err(|e| {
        SkygraphError::SessionAcquisition(format!("failed to launch Chromium: {}", e))
    })?;
    Ok((browser, handler))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BrowserSettings;

    #[test]
    fn test_launch_args_relax_security_for_scraping() {
        assert!(CHROME_ARGS.contains(&"--disable-web-security"));
        assert!(CHROME_ARGS.contains(&"--ignore-certificate-errors"));
        assert!(CHROME_ARGS.contains(&"--hide-scrollbars"));
    }

    #[test]
    fn test_launcher_selection_follows_executable_setting() {
        let system = launcher_for(&BrowserSettings::default());
        assert!(format!("{:?}", system).contains("SystemLauncher"));

        let explicit = launcher_for(&BrowserSettings {
            executable: Some(PathBuf::from("/usr/bin/chromium")),
            ..BrowserSettings::default()
        });
        assert!(format!("{:?}", explicit).contains("ExecutableLauncher"));
    }

    #[test]
    fn test_base_config_builds_for_defaults() {
        // The builder must accept the default settings; an invalid
        // combination would only surface at request time otherwise.
        assert!(base_config(&BrowserSettings::default()).build().is_ok());
    }
}
