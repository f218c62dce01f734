//! Authentication routes
//!
//! `POST /auth/register`, `POST /auth/login`, `GET /auth/status`,
//! `POST /auth/logout`.

use crate::auth::BearerToken;
use crate::error::{ApiError, ApiResult};
use crate::services::AuthService;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use users_service_shared::{
    AuthResponse, LoginRequest, MessageResponse, RegisterRequest, StatusResponse,
};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/status", get(status))
        .route("/logout", post(logout))
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload
        .map(|Json(req)| req)
        .map_err(|rejection| ApiError::invalid_body(rejection.body_text()))
}

/// Register a new user
///
/// POST /auth/register
async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let req = body(payload)?;
    let token = AuthService::register(state.db(), state.jwt(), &req).await?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse::success("Successfully registered.", token)),
    ))
}

/// Login with email and password
///
/// POST /auth/login
///
/// Answers 201 because a new token is created.
async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let req = body(payload)?;
    let token = AuthService::login(state.db(), state.jwt(), &req).await?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse::success("Successfully logged in.", token)),
    ))
}

/// Profile of the bearer token's owner
///
/// GET /auth/status
async fn status(
    State(state): State<AppState>,
    token: BearerToken,
) -> ApiResult<Json<StatusResponse>> {
    let profile = AuthService::status(state.db(), state.jwt(), token.as_str()).await?;
    Ok(Json(StatusResponse::success(profile)))
}

/// Revoke the bearer token
///
/// POST /auth/logout
async fn logout(
    State(state): State<AppState>,
    token: BearerToken,
) -> ApiResult<Json<MessageResponse>> {
    AuthService::logout(state.db(), state.jwt(), token.as_str()).await?;
    Ok(Json(MessageResponse::success("Successfully logged out.")))
}
