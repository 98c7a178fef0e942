//! Read access to the static catalog, plus seeding.

use async_trait::async_trait;
use thiserror::Error;

use crate::db::{Mod, Store, Warframe, WeaponPrimary};
use crate::models::catalog::{CatalogFile, ImportSummary};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for CatalogError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for CatalogError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Every mod, unfiltered and unpaginated.
    async fn list_mods(&self) -> Result<Vec<Mod>, CatalogError>;

    async fn list_warframes(&self) -> Result<Vec<Warframe>, CatalogError>;

    async fn list_primary_weapons(&self) -> Result<Vec<WeaponPrimary>, CatalogError>;

    async fn import(&self, catalog: &CatalogFile) -> Result<ImportSummary, CatalogError>;
}

pub struct SeaOrmCatalogService {
    store: Store,
}

impl SeaOrmCatalogService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CatalogService for SeaOrmCatalogService {
    async fn list_mods(&self) -> Result<Vec<Mod>, CatalogError> {
        Ok(self.store.list_mods().await?)
    }

    async fn list_warframes(&self) -> Result<Vec<Warframe>, CatalogError> {
        Ok(self.store.list_warframes().await?)
    }

    async fn list_primary_weapons(&self) -> Result<Vec<WeaponPrimary>, CatalogError> {
        Ok(self.store.list_primary_weapons().await?)
    }

    async fn import(&self, catalog: &CatalogFile) -> Result<ImportSummary, CatalogError> {
        Ok(self.store.import_catalog(catalog).await?)
    }
}
