//! User listing route

use crate::error::ApiResult;
use crate::services::UserService;
use crate::state::AppState;
use axum::{extract::State, Json};
use users_service_shared::UserProfile;

/// GET /users
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<UserProfile>>> {
    let users = UserService::list(state.db()).await?;
    Ok(Json(users))
}
