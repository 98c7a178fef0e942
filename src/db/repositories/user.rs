use anyhow::{Context, Result};
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, Set, SqlErr, sea_query::Expr,
};
use tokio::task;

use crate::config::SecurityConfig;
use crate::entities::users;

/// User data returned from repository (without sensitive password hash)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub date_created: DateTime<Utc>,
    pub token: Option<String>,
    pub token_expiration: Option<DateTime<Utc>>,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            username: model.username,
            date_created: model.date_created,
            token: model.token,
            token_expiration: model.token_expiration,
        }
    }
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Whether any user already holds this username or this email.
    pub async fn exists_with_username_or_email(&self, username: &str, email: &str) -> Result<bool> {
        let count = users::Entity::find()
            .filter(
                Condition::any()
                    .add(users::Column::Username.eq(username))
                    .add(users::Column::Email.eq(email)),
            )
            .count(&self.conn)
            .await
            .context("Failed to query users by username or email")?;

        Ok(count > 0)
    }

    /// Insert a user with an already hashed password.
    ///
    /// Returns `Ok(None)` when the insert hits a unique constraint, which
    /// happens when another request registered the same username or email
    /// in between the duplicate check and this insert.
    pub async fn create(
        &self,
        username: &str,
        email: &str,
        password_hash: String,
        now: DateTime<Utc>,
    ) -> Result<Option<User>> {
        let active = users::ActiveModel {
            email: Set(email.to_string()),
            username: Set(username.to_string()),
            password_hash: Set(password_hash),
            date_created: Set(now),
            token: Set(None),
            token_expiration: Set(None),
            ..Default::default()
        };

        match active.insert(&self.conn).await {
            Ok(model) => Ok(Some(User::from(model))),
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Ok(None)
            }
            Err(err) => Err(anyhow::Error::new(err).context("Failed to insert user")),
        }
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i32) -> Result<Option<User>> {
        let user = users::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query user by ID")?;

        Ok(user.map(User::from))
    }

    /// Get the user currently holding `token`, expired or not.
    pub async fn get_by_token(&self, token: &str) -> Result<Option<User>> {
        let user = users::Entity::find()
            .filter(users::Column::Token.eq(token))
            .one(&self.conn)
            .await
            .context("Failed to query user by token")?;

        Ok(user.map(User::from))
    }

    pub async fn count(&self) -> Result<u64> {
        users::Entity::find()
            .count(&self.conn)
            .await
            .context("Failed to count users")
    }

    /// Verify password for a user and return the user on success.
    /// Note: This uses `spawn_blocking` because Argon2 hashing is CPU-intensive
    /// and would block the async runtime if run directly.
    pub async fn verify_password(&self, username: &str, password: &str) -> Result<Option<User>> {
        let user = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.conn)
            .await
            .context("Failed to query user for password verification")?;

        let Some(user) = user else {
            return Ok(None);
        };

        let password_hash = user.password_hash.clone();
        let password = password.to_string();

        let is_valid = task::spawn_blocking(move || verify_password_hash(&password, &password_hash))
            .await
            .context("Password verification task panicked")??;

        Ok(is_valid.then(|| User::from(user)))
    }

    /// Store a new token, but only if the user still holds `expected`.
    ///
    /// Returns `false` when another request replaced the token first.
    pub async fn replace_token(
        &self,
        user_id: i32,
        expected: Option<&str>,
        token: &str,
        expiration: DateTime<Utc>,
    ) -> Result<bool> {
        let current = match expected {
            Some(value) => users::Column::Token.eq(value),
            None => users::Column::Token.is_null(),
        };

        let result = users::Entity::update_many()
            .col_expr(users::Column::Token, Expr::value(token))
            .col_expr(users::Column::TokenExpiration, Expr::value(expiration))
            .filter(users::Column::Id.eq(user_id))
            .filter(current)
            .exec(&self.conn)
            .await
            .context("Failed to store token")?;

        Ok(result.rows_affected > 0)
    }

    /// Move the token expiration without touching the token value.
    pub async fn set_token_expiration(&self, user_id: i32, expiration: DateTime<Utc>) -> Result<()> {
        let user = users::Entity::find_by_id(user_id)
            .one(&self.conn)
            .await
            .context("Failed to query user for token expiration update")?
            .ok_or_else(|| anyhow::anyhow!("User not found: {user_id}"))?;

        let mut active: users::ActiveModel = user.into();
        active.token_expiration = Set(Some(expiration));
        active.update(&self.conn).await?;

        Ok(())
    }
}

/// Hash a password using Argon2id with the configured cost params.
pub fn hash_password(password: &str, config: &SecurityConfig) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let params = Params::new(
        config.argon2_memory_cost_kib,
        config.argon2_time_cost,
        config.argon2_parallelism,
        None,
    )
    .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    Ok(hash.to_string())
}

/// Check a password against a PHC-format hash. Params are read from the hash.
pub fn verify_password_hash(password: &str, password_hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| anyhow::anyhow!("Invalid password hash format: {e}"))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Store;

    fn fast_params() -> SecurityConfig {
        SecurityConfig {
            argon2_memory_cost_kib: 1024,
            argon2_time_cost: 1,
            argon2_parallelism: 1,
        }
    }

    async fn repo() -> UserRepository {
        let store = Store::new("sqlite::memory:").await.unwrap();
        UserRepository::new(store.conn.clone())
    }

    #[test]
    fn test_hash_password_round_trip() {
        let hash = hash_password("pw123", &fast_params()).unwrap();
        assert_ne!(hash, "pw123");
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password_hash("pw123", &hash).unwrap());
        assert!(!verify_password_hash("pw124", &hash).unwrap());
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let repo = repo().await;
        let hash = hash_password("pw123", &fast_params()).unwrap();

        let user = repo
            .create("tenno", "t@x.com", hash, Utc::now())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(user.username, "tenno");
        assert!(user.token.is_none());
        let fetched = repo.get_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(fetched.email, "t@x.com");
        assert_eq!(fetched.username, "tenno");
        assert!(repo.exists_with_username_or_email("tenno", "other@x.com").await.unwrap());
        assert!(repo.exists_with_username_or_email("other", "t@x.com").await.unwrap());
        assert!(!repo.exists_with_username_or_email("other", "other@x.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_email_insert_returns_none() {
        let repo = repo().await;
        let first = hash_password("a", &fast_params()).unwrap();
        let second = hash_password("b", &fast_params()).unwrap();

        assert!(repo.create("one", "dup@x.com", first, Utc::now()).await.unwrap().is_some());
        assert!(repo.create("two", "dup@x.com", second, Utc::now()).await.unwrap().is_none());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_username_insert_returns_none() {
        let repo = repo().await;
        let first = hash_password("a", &fast_params()).unwrap();
        let second = hash_password("b", &fast_params()).unwrap();

        assert!(repo.create("tenno", "a@x.com", first, Utc::now()).await.unwrap().is_some());
        assert!(repo.create("tenno", "b@x.com", second, Utc::now()).await.unwrap().is_none());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_verify_password() {
        let repo = repo().await;
        let hash = hash_password("pw123", &fast_params()).unwrap();
        repo.create("tenno", "t@x.com", hash, Utc::now()).await.unwrap();

        assert!(repo.verify_password("tenno", "pw123").await.unwrap().is_some());
        assert!(repo.verify_password("tenno", "wrong").await.unwrap().is_none());
        assert!(repo.verify_password("nobody", "pw123").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_token_storage() {
        let repo = repo().await;
        let hash = hash_password("pw", &fast_params()).unwrap();
        let user = repo
            .create("tenno", "t@x.com", hash, Utc::now())
            .await
            .unwrap()
            .unwrap();

        let expiration = Utc::now() + chrono::Duration::hours(1);
        assert!(repo.replace_token(user.id, None, "abc", expiration).await.unwrap());
        assert!(!repo.replace_token(user.id, None, "xyz", expiration).await.unwrap());
        assert!(!repo.replace_token(user.id, Some("stale"), "xyz", expiration).await.unwrap());
        assert!(repo.get_by_token("xyz").await.unwrap().is_none());

        let found = repo.get_by_token("abc").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);

        let past = Utc::now() - chrono::Duration::seconds(1);
        repo.set_token_expiration(user.id, past).await.unwrap();
        let found = repo.get_by_token("abc").await.unwrap().unwrap();
        assert_eq!(found.token.as_deref(), Some("abc"));
        assert!(found.token_expiration.unwrap() < Utc::now());
    }
}
