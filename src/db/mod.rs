use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::SecurityConfig;
use crate::models::build::{Build, BuildSlots};
use crate::models::catalog::{CatalogFile, ImportSummary};

pub mod migrator;
pub mod repositories;

pub use crate::entities::mods::Model as Mod;
pub use crate::entities::warframes::Model as Warframe;
pub use crate::entities::weapon_primaries::Model as WeaponPrimary;
pub use repositories::user::User;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");

        if !in_memory {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.with_context(|| {
                    format!("Failed to create database directory {}", parent.display())
                })?;
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)
                    .with_context(|| format!("Failed to create database file {path_str}"))?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        if in_memory {
            // Each pooled connection to :memory: would open its own empty database.
            opt.max_connections(1).min_connections(1);
        } else {
            opt.max_connections(max_connections)
                .min_connections(min_connections)
                .idle_timeout(Duration::from_secs(300))
                .max_lifetime(Duration::from_secs(600));
        }
        opt.connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn build_repo(&self) -> repositories::build::BuildRepository {
        repositories::build::BuildRepository::new(self.conn.clone())
    }

    fn catalog_repo(&self) -> repositories::catalog::CatalogRepository {
        repositories::catalog::CatalogRepository::new(self.conn.clone())
    }

    // ========================================================================
    // Users & tokens
    // ========================================================================

    pub async fn user_exists(&self, username: &str, email: &str) -> Result<bool> {
        self.user_repo()
            .exists_with_username_or_email(username, email)
            .await
    }

    /// Hash `password` off the async runtime and insert the user.
    /// `Ok(None)` means a unique constraint rejected the row.
    pub async fn create_user(
        &self,
        username: &str,
        email: &str,
        password: &str,
        security: &SecurityConfig,
    ) -> Result<Option<User>> {
        let password = password.to_string();
        let security = security.clone();
        let password_hash = tokio::task::spawn_blocking(move || {
            repositories::user::hash_password(&password, &security)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Password hashing task panicked: {e}"))??;

        self.user_repo()
            .create(username, email, password_hash, Utc::now())
            .await
    }

    pub async fn get_user_by_id(&self, id: i32) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn get_user_by_token(&self, token: &str) -> Result<Option<User>> {
        self.user_repo().get_by_token(token).await
    }

    pub async fn verify_user_password(&self, username: &str, password: &str) -> Result<Option<User>> {
        self.user_repo().verify_password(username, password).await
    }

    /// Swap in a new token unless another request already replaced `expected`.
    pub async fn replace_user_token(
        &self,
        user_id: i32,
        expected: Option<&str>,
        token: &str,
        expiration: DateTime<Utc>,
    ) -> Result<bool> {
        self.user_repo()
            .replace_token(user_id, expected, token, expiration)
            .await
    }

    pub async fn set_user_token_expiration(
        &self,
        user_id: i32,
        expiration: DateTime<Utc>,
    ) -> Result<()> {
        self.user_repo()
            .set_token_expiration(user_id, expiration)
            .await
    }

    pub async fn count_users(&self) -> Result<u64> {
        self.user_repo().count().await
    }

    // ========================================================================
    // Builds
    // ========================================================================

    pub async fn create_build(&self, user_id: i32, slots: &BuildSlots) -> Result<Build> {
        self.build_repo().create(user_id, slots).await
    }

    pub async fn get_build(&self, id: i32) -> Result<Option<Build>> {
        self.build_repo().get(id).await
    }

    pub async fn list_builds_for_user(&self, user_id: i32) -> Result<Vec<Build>> {
        self.build_repo().list_for_user(user_id).await
    }

    pub async fn update_build_slots(&self, id: i32, slots: &BuildSlots) -> Result<Option<Build>> {
        self.build_repo().update_slots(id, slots).await
    }

    pub async fn delete_build(&self, id: i32) -> Result<bool> {
        self.build_repo().delete(id).await
    }

    pub async fn count_builds(&self) -> Result<u64> {
        self.build_repo().count().await
    }

    // ========================================================================
    // Catalog
    // ========================================================================

    pub async fn list_mods(&self) -> Result<Vec<Mod>> {
        self.catalog_repo().list_mods().await
    }

    pub async fn list_warframes(&self) -> Result<Vec<Warframe>> {
        self.catalog_repo().list_warframes().await
    }

    pub async fn list_primary_weapons(&self) -> Result<Vec<WeaponPrimary>> {
        self.catalog_repo().list_primary_weapons().await
    }

    pub async fn import_catalog(&self, catalog: &CatalogFile) -> Result<ImportSummary> {
        self.catalog_repo().import(catalog).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_store_creates_missing_directories() {
        let dir = std::env::temp_dir().join(format!("arsenal-{}", uuid::Uuid::new_v4()));
        let path = dir.join("nested").join("arsenal.db");

        let store = Store::new(&format!("sqlite:{}", path.display()))
            .await
            .unwrap();
        store.ping().await.unwrap();
        assert!(path.exists());

        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn test_unusable_database_directory_is_reported() {
        let blocker = std::env::temp_dir().join(format!("arsenal-{}", uuid::Uuid::new_v4()));
        std::fs::write(&blocker, b"not a directory").unwrap();
        let path = blocker.join("arsenal.db");

        let err = Store::new(&format!("sqlite:{}", path.display()))
            .await
            .err()
            .unwrap();
        assert!(
            err.to_string()
                .starts_with("Failed to create database directory"),
            "unexpected error: {err:#}"
        );

        std::fs::remove_file(blocker).ok();
    }
}
