use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse},
    services,
};
use crate::{
    error::AppResult,
    routes::{method_not_allowed, preflight},
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/register",
            post(register).options(preflight).fallback(method_not_allowed),
        )
        .route(
            "/login",
            post(login).options(preflight).fallback(method_not_allowed),
        )
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    let Json(payload) = payload?;
    let user = services::register(&state, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User created successfully".into(),
            user,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<LoginResponse>> {
    let Json(payload) = payload?;
    let res = services::login(&state, payload).await?;
    Ok(Json(res))
}
