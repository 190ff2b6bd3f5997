//! Skygraph - contribution calendar scraping service
//!
//! This library scrapes a public contribution-activity calendar with a
//! headless Chromium browser and exposes it as a JSON grid for a 3D
//! skyline renderer.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `request`: query parameter validation and handle normalization
//! - `browser`: browser session lifecycle and launch strategies
//! - `scrape`: target URL building, navigation, and grid extraction
//! - `graph`: the `GraphResponse` data model (the renderer contract)
//! - `server`: the axum HTTP entry point
//! - `config`: configuration management and validation
//! - `error`: error types and result aliases
//! - `cli`: command-line interface definition
//!
//! Each request runs the pipeline validate, acquire, navigate, extract,
//! release, respond; the browser session is released on every exit
//! path.

pub mod browser;
pub mod cli;
pub mod config;
pub mod error;
pub mod graph;
pub mod request;
pub mod scrape;
pub mod server;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, SkygraphError};
pub use graph::{DayRecord, GraphResponse, WeekRecord};
pub use request::GraphRequest;
pub use scrape::{GraphFetcher, Scraper};
