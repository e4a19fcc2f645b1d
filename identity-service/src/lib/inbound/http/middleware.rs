use auth::TokenClaims;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use thiserror::Error;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Verified caller identity, stored in request extensions by [`authenticate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

impl From<TokenClaims> for AuthenticatedUser {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: UserId(claims.user_id),
        }
    }
}

/// Rejections of the authorization gate. All map to 401.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthorizationError {
    #[error("token not found")]
    MissingToken,

    #[error("invalid Authorization header format, expected: Bearer <token>")]
    MalformedHeader,

    #[error("invalid token")]
    InvalidToken,

    #[error("request is not authenticated")]
    NotAuthenticated,
}

impl IntoResponse for AuthorizationError {
    fn into_response(self) -> Response {
        ApiError::Unauthorized(self.to_string()).into_response()
    }
}

/// Middleware that validates bearer tokens and adds the caller to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthorizationError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    let token = extract_bearer_token(header).map_err(|e| {
        tracing::debug!(reason = %e, "Authorization header rejected");
        e
    })?;

    let claims = state.authenticator.validate_token(token).map_err(|e| {
        tracing::warn!(error = %e, "Token validation failed");
        AuthorizationError::InvalidToken
    })?;

    req.extensions_mut().insert(AuthenticatedUser::from(claims));

    Ok(next.run(req).await)
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
///
/// The value must split on single spaces into exactly two parts.
pub fn extract_bearer_token(header: Option<&str>) -> Result<&str, AuthorizationError> {
    let value = header
        .filter(|value| !value.is_empty())
        .ok_or(AuthorizationError::MissingToken)?;

    let parts: Vec<&str> = value.split(' ').collect();
    match parts.as_slice() {
        [scheme, token] if scheme.eq_ignore_ascii_case("bearer") => {
            if token.is_empty() {
                Err(AuthorizationError::MissingToken)
            } else {
                Ok(token)
            }
        }
        _ => Err(AuthorizationError::MalformedHeader),
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthorizationError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .copied()
            .ok_or(AuthorizationError::NotAuthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(
            extract_bearer_token(Some("Bearer abc.def.ghi")),
            Ok("abc.def.ghi")
        );
        assert_eq!(
            extract_bearer_token(Some("bearer abc.def.ghi")),
            Ok("abc.def.ghi")
        );
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(
            extract_bearer_token(None),
            Err(AuthorizationError::MissingToken)
        );
        assert_eq!(
            extract_bearer_token(Some("")),
            Err(AuthorizationError::MissingToken)
        );
    }

    #[test]
    fn test_missing_scheme() {
        assert_eq!(
            extract_bearer_token(Some("abc.def.ghi")),
            Err(AuthorizationError::MalformedHeader)
        );
    }

    #[test]
    fn test_wrong_part_count() {
        assert_eq!(
            extract_bearer_token(Some("Bearer abc def")),
            Err(AuthorizationError::MalformedHeader)
        );
        assert_eq!(
            extract_bearer_token(Some("Bearer  abc")),
            Err(AuthorizationError::MalformedHeader)
        );
    }

    #[test]
    fn test_empty_token_segment() {
        assert_eq!(
            extract_bearer_token(Some("Bearer ")),
            Err(AuthorizationError::MissingToken)
        );
    }

    #[test]
    fn test_other_scheme() {
        assert_eq!(
            extract_bearer_token(Some("Basic dXNlcjpwYXNz")),
            Err(AuthorizationError::MalformedHeader)
        );
    }

    #[tokio::test]
    async fn test_extractor_requires_gate() {
        let (mut parts, _) = axum::http::Request::new(()).into_parts();

        let result = AuthenticatedUser::from_request_parts(&mut parts, &()).await;
        assert_eq!(result, Err(AuthorizationError::NotAuthenticated));

        let claims = TokenClaims {
            user_id: 9,
            iat: 0,
            exp: i64::MAX,
        };
        parts.extensions.insert(AuthenticatedUser::from(claims));

        let caller = AuthenticatedUser::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(caller.user_id, UserId(9));
    }
}
