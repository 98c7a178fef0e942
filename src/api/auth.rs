use axum::{
    Extension, Json,
    extract::{Request, State},
    http::{HeaderMap, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{Engine, engine::general_purpose::STANDARD};
use std::sync::Arc;

use super::{ApiError, AppState};
use crate::db::User;
use crate::services::{AuthError, IssuedToken};

/// The user resolved from a bearer token, stored in request extensions.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials | AuthError::InvalidToken => {
                Self::unauthorized(err.to_string())
            }
            AuthError::Conflict(msg) => Self::Conflict(msg),
            AuthError::Database(msg) => Self::DatabaseError(msg),
            AuthError::Internal(msg) => Self::internal(msg),
        }
    }
}

// ============================================================================
// Middleware
// ============================================================================

/// Rejects the request unless it carries `Authorization: Bearer <token>`
/// for a live token. The owner is handed to handlers as [`CurrentUser`].
pub async fn require_bearer(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(request.headers())
        .ok_or_else(|| ApiError::from(AuthError::InvalidToken))?;

    let user = state.auth_service().resolve_token(&token).await?;

    tracing::Span::current().record("user_id", user.id);
    request.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(request).await)
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}

/// Decodes `Authorization: Basic base64(username:password)`.
fn extract_basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;

    Some((username.to_string(), password.to_string()))
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /token
/// Exchange basic credentials for a bearer token
pub async fn get_token(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<IssuedToken>, ApiError> {
    let (username, password) = extract_basic_credentials(&headers)
        .ok_or_else(|| ApiError::from(AuthError::InvalidCredentials))?;

    let user = state
        .auth_service()
        .authenticate(&username, &password)
        .await?;

    tracing::Span::current().record("user_id", user.id);

    let issued = state.auth_service().issue_token(&user).await?;
    Ok(Json(issued))
}

/// DELETE /token
/// Expire the caller's token
pub async fn revoke_token(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<impl IntoResponse, ApiError> {
    state.auth_service().revoke_token(&user).await?;
    tracing::info!(user_id = user.id, "Token revoked");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn authorization(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(
            extract_bearer_token(&authorization("Bearer abc+/=")).as_deref(),
            Some("abc+/=")
        );
        assert_eq!(
            extract_bearer_token(&authorization("bearer  abc ")).as_deref(),
            Some("abc")
        );
        assert!(extract_bearer_token(&authorization("Basic abc")).is_none());
        assert!(extract_bearer_token(&authorization("Bearer ")).is_none());
        assert!(extract_bearer_token(&HeaderMap::new()).is_none());
    }

    #[test]
    fn test_extract_basic_credentials() {
        let encoded = STANDARD.encode("tenno:pw:with:colons");
        let credentials = extract_basic_credentials(&authorization(&format!("Basic {encoded}")));
        assert_eq!(
            credentials,
            Some(("tenno".to_string(), "pw:with:colons".to_string()))
        );

        assert!(extract_basic_credentials(&authorization("Basic !!!")).is_none());
        let no_colon = STANDARD.encode("tenno");
        assert!(extract_basic_credentials(&authorization(&format!("Basic {no_colon}"))).is_none());
        assert!(extract_basic_credentials(&authorization("Bearer abc")).is_none());
    }
}
