//! HTTP entry point
//!
//! One route: `GET /api/graph?name=<handle>[&from=<date>&to=<date>]`.
//! Success is a 200 with the [`GraphResponse`] JSON; every classified
//! failure is a 400 with `{"error": true, "message": "<classification>"}`.
//! The message carries the failure classification only, never internal
//! detail; that stays in the logs. Exactly one response is emitted per
//! request, and the browser session has already been released by the
//! time the fetcher returns.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{Result, SkygraphError};
use crate::request::GraphRequest;
use crate::scrape::GraphFetcher;

/// Shared state for the graph route.
#[derive(Clone)]
pub struct AppState {
    fetcher: Arc<dyn GraphFetcher>,
}

/// Raw query parameters before validation.
#[derive(Debug, Deserialize)]
pub struct GraphParams {
    name: Option<String>,
    from: Option<String>,
    to: Option<String>,
}

/// Failure payload: the whole external error contract.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// Build the service router around a fetcher implementation.
pub fn router(fetcher: Arc<dyn GraphFetcher>) -> Router {
    Router::new()
        .route("/api/graph", get(get_graph))
        .with_state(AppState { fetcher })
}

async fn get_graph(State(state): State<AppState>, Query(params): Query<GraphParams>) -> Response {
    // Validation failures never reach the fetcher, so an invalid
    // request cannot cost a browser launch.
    let request = match GraphRequest::from_params(params.name, params.from, params.to) {
        Ok(request) => request,
        Err(e) => return failure_response(&e),
    };

    match state.fetcher.fetch(request).await {
        Ok(graph) => (StatusCode::OK, Json(graph)).into_response(),
        Err(e) => failure_response(&e),
    }
}

fn failure_response(error: &anyhow::Error) -> Response {
    let classification = error
        .downcast_ref::<SkygraphError>()
        .map(SkygraphError::classification)
        .unwrap_or("InternalError");
    tracing::warn!(classification, error = %error, "graph request failed");

    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody {
            error: true,
            message: Some(classification.to_string()),
        }),
    )
        .into_response()
}

/// Bind the listener and serve until the process is stopped.
///
/// # Errors
///
/// Returns an error if the configured address is invalid or the
/// listener cannot be bound.
pub async fn serve(config: &Config, fetcher: Arc<dyn GraphFetcher>) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| SkygraphError::Config(format!("invalid listen address: {}", e)))?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "skygraph listening");
    axum::serve(listener, router(fetcher)).await?;
    Ok(())
}
