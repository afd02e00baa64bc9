//! API error type with IntoResponse
//!
//! Store failures are logged with their cause and returned to the client
//! as a generic message; nothing from the database leaks into responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::reference::RefreshError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Snapshot or bounded read failed (500, logged)
    Refresh(RefreshError),

    /// No route matched (404)
    NotFound { path: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Refresh(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::Refresh(e) => {
                tracing::error!(collection = %e.collection(), "Reference data error: {}", e);
                "failed to load reference data".to_string()
            }
            Self::NotFound { path } => format!("route '{}' not found", path),
        };

        let body = Json(json!({
            "success": false,
            "error": message
        }));

        (status, body).into_response()
    }
}

impl From<RefreshError> for ApiError {
    fn from(e: RefreshError) -> Self {
        Self::Refresh(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbError;
    use crate::reference::Collection;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn refresh_error_is_generic_500() {
        let err = ApiError::Refresh(RefreshError::Store {
            collection: Collection::Cohorts,
            source: DbError::Unavailable("password authentication failed".into()),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "failed to load reference data");
        assert!(!body.to_string().contains("password"));
    }

    #[tokio::test]
    async fn not_found_is_404() {
        let err = ApiError::NotFound {
            path: "/api/nope".into(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "route '/api/nope' not found");
    }
}
