//! HTTP lookup service for tzfind
//!
//! One handler answers every path: it reads the optional `q` parameter,
//! filters the shared catalog and returns the matches as a JSON array.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{Query as QueryParams, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tokio::net::TcpListener;
use tzfind_core::catalog::Catalog;
use tzfind_core::query::Query;

/// Query string of a lookup request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LookupParams {
    /// Free-text search; absent or empty returns the whole catalog
    pub q: Option<String>,
}

impl LookupParams {
    /// The first `q` wins; repeats and other keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let q = pairs
            .into_iter()
            .find(|(key, _)| key == "q")
            .map(|(_, value)| value);
        Self { q }
    }
}

/// Bind `bind` and serve `catalog` until the process stops.
///
/// The catalog is moved into shared state here and never reloaded.
pub async fn serve(bind: &str, catalog: Catalog) -> Result<()> {
    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("binding HTTP server to {bind}"))?;

    tracing::info!(%bind, records = catalog.len(), "serving timezone lookups");

    axum::serve(listener, router(Arc::new(catalog)))
        .await
        .context("serving HTTP")?;
    Ok(())
}

/// Router with a single fallback handler, so every path gets a lookup.
pub fn router(catalog: Arc<Catalog>) -> Router {
    Router::new().fallback(lookup_handler).with_state(catalog)
}

async fn lookup_handler(
    State(catalog): State<Arc<Catalog>>,
    QueryParams(pairs): QueryParams<Vec<(String, String)>>,
) -> Response {
    let params = LookupParams::from_pairs(pairs);
    let query = params.q.as_deref().map(Query::parse).unwrap_or_default();
    let matches = catalog.search(&query);

    tracing::debug!(
        terms = query.terms().len(),
        hits = matches.len(),
        "lookup"
    );

    match serde_json::to_vec(&matches) {
        Ok(body) => (
            StatusCode::OK,
            [
                (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
                (header::ACCESS_CONTROL_ALLOW_METHODS, "GET"),
                (header::CONTENT_TYPE, "application/json"),
            ],
            body,
        )
            .into_response(),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("encoding results: {err}"),
        )
            .into_response(),
    }
}
