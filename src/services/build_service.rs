//! Domain service for user builds.

use thiserror::Error;

use crate::models::build::{Build, BuildSlots};

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Build {0} not found")]
    NotFound(i32),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for BuildError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for BuildError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait BuildService: Send + Sync {
    /// Stores a new build owned by `owner_id`. Slot values are taken as-is.
    async fn create_build(&self, owner_id: i32, slots: BuildSlots) -> Result<Build, BuildError>;

    async fn get_build(&self, id: i32) -> Result<Build, BuildError>;

    async fn list_builds(&self, owner_id: i32) -> Result<Vec<Build>, BuildError>;

    /// Overwrites the named slots; names that are not slots are ignored.
    async fn update_build(
        &self,
        id: i32,
        changes: Vec<(String, Option<String>)>,
    ) -> Result<Build, BuildError>;

    /// Removes the build permanently.
    async fn delete_build(&self, id: i32) -> Result<(), BuildError>;
}
