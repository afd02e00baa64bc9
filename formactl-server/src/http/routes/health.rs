//! Health check endpoint

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::http::server::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Seconds since the cached snapshot was fetched, if there is one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_age_secs: Option<u64>,
}

/// GET /health
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        cache_age_secs: state.cache.age().await.map(|age| age.as_secs()),
    })
}

/// Health routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::server::ServerConfig;
    use crate::reference::MemoryReferenceStore;

    #[tokio::test]
    async fn health_returns_ok() {
        let state = Arc::new(AppState::new(
            Arc::new(MemoryReferenceStore::with_sample_data()),
            &ServerConfig::default(),
        ));

        let Json(body) = health(State(Arc::clone(&state))).await;
        assert_eq!(body.status, "ok");
        assert!(body.cache_age_secs.is_none());

        state.cache.get(state.store.as_ref()).await.unwrap();
        let Json(body) = health(State(state)).await;
        assert_eq!(body.cache_age_secs, Some(0));
    }
}
