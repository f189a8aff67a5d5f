use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{CreateCandidateRequest, ListQuery},
    repo_types::Candidate,
    services,
};
use crate::{
    auth::extractors::AuthUser,
    error::AppResult,
    routes::{method_not_allowed, preflight},
    state::AppState,
};

pub fn candidate_routes() -> Router<AppState> {
    Router::new().route(
        "/candidates",
        get(list_candidates)
            .post(create_candidate)
            .options(preflight)
            .fallback(method_not_allowed),
    )
}

#[instrument(skip(state, query))]
pub async fn list_candidates(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> AppResult<Json<Vec<Candidate>>> {
    let Query(query) = query?;
    let page = services::page_from_query(query)?;
    let rows = services::list(&state, page).await?;
    Ok(Json(rows))
}

#[instrument(skip(state, payload))]
pub async fn create_candidate(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    payload: Result<Json<CreateCandidateRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Candidate>)> {
    let Json(payload) = payload?;
    let candidate = services::create(&state, user_id, payload).await?;
    Ok((StatusCode::CREATED, Json(candidate)))
}
