//! Reference data endpoint - all six collections in one cached payload
//!
//! GET /api/reference-data
//! POST /api/reference-data/invalidate

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::ReferenceSnapshot;

/// Reference data response
#[derive(Serialize)]
pub struct ReferenceDataResponse {
    pub success: bool,
    pub data: Arc<ReferenceSnapshot>,
    pub cached: bool,
}

/// Plain acknowledgement
#[derive(Serialize)]
pub struct AckResponse {
    pub success: bool,
}

/// GET /api/reference-data - consolidated snapshot, served from cache
/// for up to the configured TTL
async fn get_reference_data(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ReferenceDataResponse>, ApiError> {
    let lookup = state.cache.get(state.store.as_ref()).await?;

    Ok(Json(ReferenceDataResponse {
        success: true,
        data: lookup.snapshot,
        cached: lookup.cached,
    }))
}

/// POST /api/reference-data/invalidate - drop the cached snapshot
async fn invalidate_reference_data(State(state): State<Arc<AppState>>) -> Json<AckResponse> {
    state.cache.invalidate().await;
    Json(AckResponse { success: true })
}

/// Reference data routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/reference-data", get(get_reference_data))
        .route(
            "/api/reference-data/invalidate",
            post(invalidate_reference_data),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::server::ServerConfig;
    use crate::reference::MemoryReferenceStore;

    fn state(store: Arc<MemoryReferenceStore>) -> Arc<AppState> {
        Arc::new(AppState::new(store, &ServerConfig::default()))
    }

    #[tokio::test]
    async fn first_call_fetches_second_is_cached() {
        let store = Arc::new(MemoryReferenceStore::with_sample_data());
        let state = state(Arc::clone(&store));

        let Json(first) = get_reference_data(State(Arc::clone(&state))).await.unwrap();
        let Json(second) = get_reference_data(State(state)).await.unwrap();

        assert!(first.success && !first.cached);
        assert!(second.cached);
        assert_eq!(store.queries(), 6);
    }

    #[tokio::test]
    async fn invalidate_then_refetch() {
        let store = Arc::new(MemoryReferenceStore::with_sample_data());
        let state = state(Arc::clone(&store));

        get_reference_data(State(Arc::clone(&state))).await.unwrap();
        let Json(ack) = invalidate_reference_data(State(Arc::clone(&state))).await;
        assert!(ack.success);

        let Json(after) = get_reference_data(State(state)).await.unwrap();
        assert!(!after.cached);
        assert_eq!(store.queries(), 12);
    }

    #[tokio::test]
    async fn store_failure_maps_to_api_error() {
        let store = Arc::new(MemoryReferenceStore::with_sample_data());
        store.set_failing(true);

        let err = get_reference_data(State(state(store))).await.err().unwrap();
        assert!(matches!(err, ApiError::Refresh(_)));
    }
}
