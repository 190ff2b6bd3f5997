//! Configuration management for Skygraph
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from a YAML file, environment variables, and CLI
//! overrides. Chrome location and launch mode are resolved here once
//! per process start; per-request code never consults the environment.

use crate::error::{Result, SkygraphError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for Skygraph
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Headless browser settings
    #[serde(default)]
    pub browser: BrowserSettings,
    /// Scrape target settings
    #[serde(default)]
    pub scrape: ScrapeConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind the listener to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Headless browser configuration
///
/// One browser process is launched per request from these settings; the
/// viewport is fixed so page layout is deterministic across requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserSettings {
    /// Explicit path to a Chrome/Chromium executable.
    ///
    /// When unset, the launcher lets the CDP layer locate a system
    /// installation.
    #[serde(default)]
    pub executable: Option<PathBuf>,

    /// Run the browser headless (disable only for local debugging)
    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Fixed viewport width in pixels
    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,

    /// Fixed viewport height in pixels
    #[serde(default = "default_viewport_height")]
    pub viewport_height: u32,
}

fn default_headless() -> bool {
    true
}

fn default_viewport_width() -> u32 {
    1280
}

fn default_viewport_height() -> u32 {
    800
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            executable: None,
            headless: default_headless(),
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
        }
    }
}

/// Scrape target configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// Base URL of the profile site the calendar is scraped from
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Upper bound on one page load settling, in seconds
    #[serde(default = "default_navigation_timeout")]
    pub navigation_timeout_seconds: u64,
}

fn default_base_url() -> String {
    "https://github.com".to_string()
}

fn default_navigation_timeout() -> u64 {
    30
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            navigation_timeout_seconds: default_navigation_timeout(),
        }
    }
}

impl Config {
    /// Load configuration with the standard precedence:
    /// file, then environment variables, then CLI overrides.
    ///
    /// A missing file is not an error; defaults are used and a warning
    /// is logged.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| SkygraphError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| SkygraphError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(host) = std::env::var("SKYGRAPH_HOST") {
            self.server.host = host;
        }

        if let Ok(port) = std::env::var("SKYGRAPH_PORT") {
            if let Ok(value) = port.parse() {
                self.server.port = value;
            } else {
                tracing::warn!("Invalid SKYGRAPH_PORT: {}", port);
            }
        }

        if let Ok(base_url) = std::env::var("SKYGRAPH_BASE_URL") {
            self.scrape.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("SKYGRAPH_NAV_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.scrape.navigation_timeout_seconds = value;
            } else {
                tracing::warn!("Invalid SKYGRAPH_NAV_TIMEOUT_SECONDS: {}", timeout);
            }
        }

        // SKYGRAPH_HEADFUL=true keeps a visible browser window for debugging.
        if let Ok(headful) = std::env::var("SKYGRAPH_HEADFUL") {
            match headful.parse::<bool>() {
                Ok(value) => self.browser.headless = !value,
                Err(_) => tracing::warn!("Invalid SKYGRAPH_HEADFUL: {}", headful),
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        // --chrome also honors SKYGRAPH_CHROME via clap's env support.
        if let Some(chrome) = &cli.chrome {
            self.browser.executable = Some(chrome.clone());
        }

        if let crate::cli::Commands::Serve { host, port } = &cli.command {
            if let Some(host) = host {
                self.server.host = host.clone();
            }
            if let Some(port) = port {
                self.server.port = *port;
            }
        }
    }

    /// Validate the merged configuration.
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(SkygraphError::Config("server.port must not be 0".to_string()).into());
        }

        if self.scrape.base_url.is_empty() {
            return Err(
                SkygraphError::Config("scrape.base_url cannot be empty".to_string()).into(),
            );
        }

        if url::Url::parse(&self.scrape.base_url).is_err() {
            return Err(SkygraphError::Config(format!(
                "scrape.base_url is not a valid URL: {}",
                self.scrape.base_url
            ))
            .into());
        }

        if self.scrape.navigation_timeout_seconds == 0 {
            return Err(SkygraphError::Config(
                "scrape.navigation_timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.browser.viewport_width == 0 || self.browser.viewport_height == 0 {
            return Err(SkygraphError::Config(
                "browser viewport dimensions must be greater than 0".to_string(),
            )
            .into());
        }

        Ok(())
    }
}
