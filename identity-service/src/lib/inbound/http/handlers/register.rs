use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<User>, ApiError> {
    let Json(body) = body?;

    state
        .user_service
        .register(body.into_command())
        .await
        .map_err(ApiError::from)
        .map(|user| ApiSuccess::new(StatusCode::CREATED, user))
}

/// HTTP request body for registering a user (raw JSON)
///
/// Missing string fields deserialize as empty so the service reports which
/// one is required.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequestBody {
    #[serde(default)]
    name: String,
    #[serde(default)]
    username: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone_number: Option<String>,
    #[serde(default)]
    password: String,
}

impl RegisterRequestBody {
    fn into_command(self) -> RegisterUserCommand {
        RegisterUserCommand::new(
            self.name,
            self.username,
            self.email,
            self.phone_number,
            self.password,
        )
    }
}
