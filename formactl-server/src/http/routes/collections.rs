//! Per-collection listings
//!
//! Uncached, one bounded store read per request, same ordering as the
//! aggregate snapshot.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::{Cohort, DocumentType, Gender, Role, StudentState, TrainingProgram};
use crate::reference::aggregator::bounded;
use crate::reference::Collection;

/// List response
#[derive(Serialize)]
pub struct ListResponse<T> {
    pub success: bool,
    pub data: Vec<T>,
}

type ListResult<T> = Result<Json<ListResponse<T>>, ApiError>;

fn ok<T>(data: Vec<T>) -> ListResult<T> {
    Ok(Json(ListResponse {
        success: true,
        data,
    }))
}

/// GET /api/roles
async fn list_roles(State(state): State<Arc<AppState>>) -> ListResult<Role> {
    ok(bounded(Collection::Roles, state.query_timeout, state.store.roles()).await?)
}

/// GET /api/tipos-documento
async fn list_document_types(State(state): State<Arc<AppState>>) -> ListResult<DocumentType> {
    let rows = bounded(
        Collection::DocumentTypes,
        state.query_timeout,
        state.store.document_types(),
    )
    .await?;
    ok(rows)
}

/// GET /api/estados-estudiante
async fn list_student_states(State(state): State<Arc<AppState>>) -> ListResult<StudentState> {
    let rows = bounded(
        Collection::StudentStates,
        state.query_timeout,
        state.store.student_states(),
    )
    .await?;
    ok(rows)
}

/// GET /api/fichas
async fn list_cohorts(State(state): State<Arc<AppState>>) -> ListResult<Cohort> {
    ok(bounded(Collection::Cohorts, state.query_timeout, state.store.cohorts()).await?)
}

/// GET /api/generos
async fn list_genders(State(state): State<Arc<AppState>>) -> ListResult<Gender> {
    ok(bounded(Collection::Genders, state.query_timeout, state.store.genders()).await?)
}

/// GET /api/programas-formacion
async fn list_programs(State(state): State<Arc<AppState>>) -> ListResult<TrainingProgram> {
    ok(bounded(Collection::Programs, state.query_timeout, state.store.programs()).await?)
}

/// Collection routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/roles", get(list_roles))
        .route("/api/tipos-documento", get(list_document_types))
        .route("/api/estados-estudiante", get(list_student_states))
        .route("/api/fichas", get(list_cohorts))
        .route("/api/generos", get(list_genders))
        .route("/api/programas-formacion", get(list_programs))
}
