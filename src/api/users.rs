use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;

use super::validation::{JsonObject, require_fields, required_text};
use super::{ApiError, AppState, UserDto};
use crate::services::NewUser;

const REGISTRATION_FIELDS: [&str; 3] = ["username", "email", "password"];

/// POST /users
/// Register a new account
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    JsonObject(body): JsonObject,
) -> Result<(StatusCode, Json<UserDto>), ApiError> {
    require_fields(&body, &REGISTRATION_FIELDS)?;

    let new_user = NewUser {
        username: required_text(&body, "username")?,
        email: required_text(&body, "email")?,
        password: required_text(&body, "password")?,
    };

    let user = state.auth_service().register(new_user).await?;

    Ok((StatusCode::CREATED, Json(UserDto::from(user))))
}
