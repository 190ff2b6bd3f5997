//! Error types for Skygraph
//!
//! This module defines all error types used throughout the service,
//! using `thiserror` for ergonomic error handling. The scrape-facing
//! variants mirror the pipeline stages: request validation, browser
//! session acquisition, navigation, and calendar extraction.

use thiserror::Error;

/// Main error type for Skygraph operations
///
/// Every pipeline stage either produces a typed result or one of these
/// classified failures. The HTTP layer translates the classification
/// into the external `{error: true}` contract; nothing else leaks.
#[derive(Error, Debug)]
pub enum SkygraphError {
    /// The account handle is missing or empty after normalization
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The headless browser process could not be launched
    #[error("Browser session acquisition failed: {0}")]
    SessionAcquisition(String),

    /// A page could not be opened inside an acquired browser
    #[error("Page creation failed: {0}")]
    PageCreation(String),

    /// The target page could not be loaded (transport failure or timeout)
    #[error("Navigation failed: {0}")]
    Navigation(String),

    /// The page loaded but the expected calendar structure is absent
    ///
    /// This is the dominant real-world failure mode: the target site
    /// changes its markup without notice, and private or nonexistent
    /// accounts serve pages with no calendar at all.
    #[error("Calendar markup not found: {0}")]
    MarkupNotFound(String),

    /// A day cell's attributes were present but not numeric
    #[error("Calendar parse error: {0}")]
    Parse(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl SkygraphError {
    /// Short classification tag for a failure.
    ///
    /// This is what callers see in the HTTP failure payload's `message`
    /// field and what operators grep logs for, so the tags are stable.
    /// Internal detail (the variant's message) stays in the logs.
    pub fn classification(&self) -> &'static str {
        match self {
            SkygraphError::InvalidRequest(_) => "InvalidRequest",
            SkygraphError::SessionAcquisition(_) => "SessionAcquisitionError",
            SkygraphError::PageCreation(_) => "PageCreationError",
            SkygraphError::Navigation(_) => "NavigationError",
            SkygraphError::MarkupNotFound(_) => "MarkupNotFoundError",
            SkygraphError::Parse(_) => "ParseError",
            SkygraphError::Config(_)
            | SkygraphError::Io(_)
            | SkygraphError::Serialization(_)
            | SkygraphError::Yaml(_) => "InternalError",
        }
    }
}

/// Result type alias for Skygraph operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
