use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiError, AppState, ModDto, WarframeDto, WeaponPrimaryDto};
use crate::services::CatalogError;

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Database(msg) => Self::DatabaseError(msg),
            CatalogError::Internal(msg) => Self::internal(msg),
        }
    }
}

/// GET /mod
pub async fn list_mods(State(state): State<Arc<AppState>>) -> Result<Json<Vec<ModDto>>, ApiError> {
    let mods = state.catalog_service().list_mods().await?;
    Ok(Json(mods.into_iter().map(ModDto::from).collect()))
}

/// GET /warframe
pub async fn list_warframes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<WarframeDto>>, ApiError> {
    let warframes = state.catalog_service().list_warframes().await?;
    Ok(Json(warframes.into_iter().map(WarframeDto::from).collect()))
}

/// GET /weapon/primary
pub async fn list_primary_weapons(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<WeaponPrimaryDto>>, ApiError> {
    let weapons = state.catalog_service().list_primary_weapons().await?;
    Ok(Json(weapons.into_iter().map(WeaponPrimaryDto::from).collect()))
}
