//! Build endpoints. Every route here sits behind the bearer token check.

use axum::{
    Extension, Json,
    extract::{Path, State, rejection::PathRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::{Map, Value};
use std::sync::Arc;

use super::auth::CurrentUser;
use super::validation::{JsonObject, optional_text, require_fields, validate_build_id};
use super::{ApiError, AppState};
use crate::constants::build::SLOT_NAMES;
use crate::models::build::{Build, BuildSlots};
use crate::services::BuildError;

impl From<BuildError> for ApiError {
    fn from(err: BuildError) -> Self {
        match err {
            BuildError::NotFound(id) => Self::not_found("Build", id),
            BuildError::Database(msg) => Self::DatabaseError(msg),
            BuildError::Internal(msg) => Self::internal(msg),
        }
    }
}

fn slots_from_body(body: &Map<String, Value>) -> Result<BuildSlots, ApiError> {
    let mut slots = BuildSlots::default();
    for name in SLOT_NAMES {
        if let Some(slot) = slots.slot_mut(name) {
            *slot = optional_text(body, name)?;
        }
    }
    Ok(slots)
}

/// POST /build
/// All ten slot keys must be present; values may be null.
pub async fn create_build(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    JsonObject(body): JsonObject,
) -> Result<(StatusCode, Json<Build>), ApiError> {
    require_fields(&body, &SLOT_NAMES)?;
    let slots = slots_from_body(&body)?;

    let build = state.build_service().create_build(user.id, slots).await?;
    tracing::info!(build_id = build.id, user_id = user.id, "Build created");

    Ok((StatusCode::CREATED, Json(build)))
}

/// GET /build
/// Builds owned by the caller
pub async fn list_builds(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Vec<Build>>, ApiError> {
    let builds = state.build_service().list_builds(user.id).await?;
    Ok(Json(builds))
}

/// GET /build/{id}
pub async fn get_build(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<Build>, ApiError> {
    let id = validate_build_id(path)?;
    let build = state.build_service().get_build(id).await?;
    Ok(Json(build))
}

/// PUT /build/{id}
/// Overwrites the slots named in the body. Other keys are ignored.
pub async fn update_build(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
    JsonObject(body): JsonObject,
) -> Result<Json<Build>, ApiError> {
    let id = validate_build_id(path)?;

    let changes = body
        .keys()
        .filter(|key| BuildSlots::is_slot(key))
        .map(|key| Ok((key.clone(), optional_text(&body, key)?)))
        .collect::<Result<Vec<_>, ApiError>>()?;

    let build = state.build_service().update_build(id, changes).await?;
    Ok(Json(build))
}

/// DELETE /build/{id}
pub async fn delete_build(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = validate_build_id(path)?;
    state.build_service().delete_build(id).await?;
    tracing::info!(build_id = id, "Build deleted");
    Ok(StatusCode::NO_CONTENT)
}
