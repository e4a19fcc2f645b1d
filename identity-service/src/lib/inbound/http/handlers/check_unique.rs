use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

pub async fn check_username(
    State(state): State<AppState>,
    Query(params): Query<CheckUniqueParams>,
) -> Result<ApiSuccess<CheckUniqueResponseData>, ApiError> {
    let unique = state
        .user_service
        .check_unique_by_username(&params.value)
        .await?;

    Ok(CheckUniqueResponseData::success(unique))
}

pub async fn check_email(
    State(state): State<AppState>,
    Query(params): Query<CheckUniqueParams>,
) -> Result<ApiSuccess<CheckUniqueResponseData>, ApiError> {
    let unique = state
        .user_service
        .check_unique_by_email(&params.value)
        .await?;

    Ok(CheckUniqueResponseData::success(unique))
}

pub async fn check_phone_number(
    State(state): State<AppState>,
    Query(params): Query<CheckUniqueParams>,
) -> Result<ApiSuccess<CheckUniqueResponseData>, ApiError> {
    let unique = state
        .user_service
        .check_unique_by_phone_number(&params.value)
        .await?;

    Ok(CheckUniqueResponseData::success(unique))
}

#[derive(Debug, Deserialize)]
pub struct CheckUniqueParams {
    #[serde(default)]
    value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckUniqueResponseData {
    pub unique: bool,
}

impl CheckUniqueResponseData {
    fn success(unique: bool) -> ApiSuccess<Self> {
        ApiSuccess::new(StatusCode::OK, Self { unique })
    }
}
