use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

pub async fn find_user(
    State(state): State<AppState>,
    Query(params): Query<FindUserParams>,
) -> Result<ApiSuccess<User>, ApiError> {
    let id = params
        .id
        .filter(|raw| !raw.is_empty())
        .ok_or_else(|| ApiError::BadRequest("id cannot be empty".to_string()))?;
    let user_id = id
        .parse::<UserId>()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .user_service
        .find_user(user_id)
        .await
        .map_err(ApiError::from)
        .map(|user| ApiSuccess::new(StatusCode::OK, user))
}

#[derive(Debug, Deserialize)]
pub struct FindUserParams {
    id: Option<String>,
}
