//! `SeaORM` implementation of the `AuthService` trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::config::{SecurityConfig, TokenConfig};
use crate::db::{Store, User};
use crate::services::auth_service::{AuthError, AuthService, IssuedToken, NewUser};
use crate::services::token;

const DUPLICATE_USER_MESSAGE: &str = "User with this username and/or email already exists";
const MAX_TOKEN_ATTEMPTS: usize = 3;

pub struct SeaOrmAuthService {
    store: Store,
    security: SecurityConfig,
    tokens: TokenConfig,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig, tokens: TokenConfig) -> Self {
        Self {
            store,
            security,
            tokens,
        }
    }

    pub async fn issue_token_at(
        &self,
        user: &User,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, AuthError> {
        let mut current = user.clone();

        for _ in 0..MAX_TOKEN_ATTEMPTS {
            if let Some(issued) = self.reusable_token(&current, now) {
                debug!("Reusing live token for user {}", current.id);
                return Ok(issued);
            }

            let new_token = token::generate_token();
            let expiration = now + self.tokens.ttl();
            if self
                .store
                .replace_user_token(current.id, current.token.as_deref(), &new_token, expiration)
                .await?
            {
                info!("Issued new token for user {}", current.id);
                return Ok(IssuedToken {
                    token: new_token,
                    token_expiration: expiration,
                });
            }

            debug!("Token for user {} changed concurrently, re-reading", current.id);
            current = self
                .store
                .get_user_by_id(current.id)
                .await?
                .ok_or(AuthError::InvalidCredentials)?;
        }

        Err(AuthError::Internal(format!(
            "Token for user {} kept changing while issuing",
            user.id
        )))
    }

    fn reusable_token(&self, user: &User, now: DateTime<Utc>) -> Option<IssuedToken> {
        if !token::can_reuse_token(
            user.token.as_deref(),
            user.token_expiration,
            now,
            self.tokens.reuse_threshold(),
        ) {
            return None;
        }

        match (&user.token, user.token_expiration) {
            (Some(current), Some(expiration)) => Some(IssuedToken {
                token: current.clone(),
                token_expiration: expiration,
            }),
            _ => None,
        }
    }

    pub async fn revoke_token_at(&self, user: &User, now: DateTime<Utc>) -> Result<(), AuthError> {
        self.store
            .set_user_token_expiration(user.id, token::revoked_expiration(now))
            .await?;

        info!("Revoked token for user {}", user.id);
        Ok(())
    }

    pub async fn resolve_token_at(
        &self,
        bearer: &str,
        now: DateTime<Utc>,
    ) -> Result<User, AuthError> {
        let user = self
            .store
            .get_user_by_token(bearer)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        if !token::is_token_live(user.token_expiration, now) {
            return Err(AuthError::InvalidToken);
        }

        Ok(user)
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn register(&self, new_user: NewUser) -> Result<User, AuthError> {
        if self
            .store
            .user_exists(&new_user.username, &new_user.email)
            .await?
        {
            return Err(AuthError::Conflict(DUPLICATE_USER_MESSAGE.to_string()));
        }

        let user = self
            .store
            .create_user(
                &new_user.username,
                &new_user.email,
                &new_user.password,
                &self.security,
            )
            .await?
            .ok_or_else(|| AuthError::Conflict(DUPLICATE_USER_MESSAGE.to_string()))?;

        info!("Registered user {} ({})", user.id, user.username);
        Ok(user)
    }

    async fn authenticate(&self, username: &str, password: &str) -> Result<User, AuthError> {
        self.store
            .verify_user_password(username, password)
            .await?
            .ok_or(AuthError::InvalidCredentials)
    }

    async fn issue_token(&self, user: &User) -> Result<IssuedToken, AuthError> {
        self.issue_token_at(user, Utc::now()).await
    }

    async fn revoke_token(&self, user: &User) -> Result<(), AuthError> {
        self.revoke_token_at(user, Utc::now()).await
    }

    async fn resolve_token(&self, token: &str) -> Result<User, AuthError> {
        self.resolve_token_at(token, Utc::now()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::users;
    use chrono::Duration;
    use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
    use std::path::PathBuf;
    use std::sync::Arc;

    fn fast_security() -> SecurityConfig {
        SecurityConfig {
            argon2_memory_cost_kib: 1024,
            argon2_time_cost: 1,
            argon2_parallelism: 1,
        }
    }

    async fn service() -> SeaOrmAuthService {
        let store = Store::new("sqlite::memory:").await.unwrap();
        SeaOrmAuthService::new(store, fast_security(), TokenConfig::default())
    }

    /// Pooled connections only share state through a file, so races need one.
    async fn file_service() -> (Arc<SeaOrmAuthService>, PathBuf) {
        let path = std::env::temp_dir().join(format!("arsenal-{}.db", uuid::Uuid::new_v4()));
        let store = Store::new(&format!("sqlite:{}", path.display()))
            .await
            .unwrap();
        let service = SeaOrmAuthService::new(store, fast_security(), TokenConfig::default());
        (Arc::new(service), path)
    }

    fn tenno() -> NewUser {
        NewUser {
            username: "tenno".to_string(),
            email: "t@x.com".to_string(),
            password: "pw123".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let service = service().await;
        let user = service.register(tenno()).await.unwrap();

        assert_eq!(user.username, "tenno");
        let row = users::Entity::find()
            .filter(users::Column::Username.eq("tenno"))
            .one(&service.store.conn)
            .await
            .unwrap()
            .unwrap();
        assert_ne!(row.password_hash, "pw123");
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_username_or_email() {
        let service = service().await;
        service.register(tenno()).await.unwrap();

        let same_name = NewUser {
            email: "other@x.com".to_string(),
            ..tenno()
        };
        let same_email = NewUser {
            username: "other".to_string(),
            ..tenno()
        };

        assert!(matches!(
            service.register(same_name).await,
            Err(AuthError::Conflict(_))
        ));
        assert!(matches!(
            service.register(same_email).await,
            Err(AuthError::Conflict(_))
        ));
        assert_eq!(service.store.count_users().await.unwrap(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_register_same_username_keeps_one_account() {
        let (service, path) = file_service().await;

        let first = {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .register(NewUser {
                        email: "a@x.com".to_string(),
                        password: "pw1".to_string(),
                        ..tenno()
                    })
                    .await
            })
        };
        let second = {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .register(NewUser {
                        email: "b@x.com".to_string(),
                        password: "pw2".to_string(),
                        ..tenno()
                    })
                    .await
            })
        };

        let results = [first.await.unwrap(), second.await.unwrap()];
        let winners = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(winners, 1);
        assert!(
            results
                .iter()
                .any(|r| matches!(r, Err(AuthError::Conflict(_))))
        );
        assert_eq!(service.store.count_users().await.unwrap(), 1);

        let password = if results[0].is_ok() { "pw1" } else { "pw2" };
        assert!(service.authenticate("tenno", password).await.is_ok());

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_authenticate() {
        let service = service().await;
        service.register(tenno()).await.unwrap();

        assert!(service.authenticate("tenno", "pw123").await.is_ok());
        assert!(matches!(
            service.authenticate("tenno", "nope").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            service.authenticate("ghost", "pw123").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_issue_token_reuses_within_window() {
        let service = service().await;
        let user = service.register(tenno()).await.unwrap();
        let t0 = Utc::now();

        let first = service.issue_token_at(&user, t0).await.unwrap();
        assert_eq!(first.token_expiration, t0 + Duration::seconds(3600));

        let user = service.store.get_user_by_id(user.id).await.unwrap().unwrap();
        let second = service
            .issue_token_at(&user, t0 + Duration::minutes(58))
            .await
            .unwrap();
        assert_eq!(first.token, second.token);
    }

    #[tokio::test]
    async fn test_issue_token_rotates_near_or_after_expiry() {
        let service = service().await;
        let user = service.register(tenno()).await.unwrap();
        let t0 = Utc::now();

        let first = service.issue_token_at(&user, t0).await.unwrap();

        let user = service.store.get_user_by_id(user.id).await.unwrap().unwrap();
        let near_expiry = service
            .issue_token_at(&user, t0 + Duration::seconds(3600 - 30))
            .await
            .unwrap();
        assert_ne!(first.token, near_expiry.token);

        let user = service.store.get_user_by_id(user.id).await.unwrap().unwrap();
        let after_expiry = service
            .issue_token_at(&user, t0 + Duration::hours(5))
            .await
            .unwrap();
        assert_ne!(near_expiry.token, after_expiry.token);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_issue_hands_out_one_token() {
        let (service, path) = file_service().await;
        let user = service.register(tenno()).await.unwrap();

        let handles: Vec<_> = (0..2)
            .map(|_| {
                let service = service.clone();
                let user = user.clone();
                tokio::spawn(async move { service.issue_token(&user).await })
            })
            .collect();

        let mut tokens = Vec::new();
        for handle in handles {
            tokens.push(handle.await.unwrap().unwrap().token);
        }

        assert_eq!(tokens[0], tokens[1]);
        let resolved = service.resolve_token(&tokens[0]).await.unwrap();
        assert_eq!(resolved.id, user.id);

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_issue_with_stale_user_returns_stored_token() {
        let service = service().await;
        let stale = service.register(tenno()).await.unwrap();

        let first = service.issue_token(&stale).await.unwrap();
        let second = service.issue_token(&stale).await.unwrap();

        assert_eq!(first.token, second.token);
        assert!(service.resolve_token(&first.token).await.is_ok());
    }

    #[tokio::test]
    async fn test_resolve_and_revoke() {
        let service = service().await;
        let user = service.register(tenno()).await.unwrap();
        let t0 = Utc::now();
        let issued = service.issue_token_at(&user, t0).await.unwrap();

        let resolved = service.resolve_token_at(&issued.token, t0).await.unwrap();
        assert_eq!(resolved.id, user.id);

        assert!(matches!(
            service.resolve_token_at("unknown", t0).await,
            Err(AuthError::InvalidToken)
        ));
        assert!(matches!(
            service
                .resolve_token_at(&issued.token, t0 + Duration::seconds(3600))
                .await,
            Err(AuthError::InvalidToken)
        ));

        service.revoke_token(&resolved).await.unwrap();
        assert!(matches!(
            service.resolve_token(&issued.token).await,
            Err(AuthError::InvalidToken)
        ));

        let revoked = service.store.get_user_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(revoked.token.as_deref(), Some(issued.token.as_str()));
    }

    #[tokio::test]
    async fn test_issue_after_revoke_rotates() {
        let service = service().await;
        let user = service.register(tenno()).await.unwrap();
        let first = service.issue_token(&user).await.unwrap();

        service.revoke_token(&user).await.unwrap();
        let user = service.store.get_user_by_id(user.id).await.unwrap().unwrap();
        let second = service.issue_token(&user).await.unwrap();

        assert_ne!(first.token, second.token);
        assert!(service.resolve_token(&second.token).await.is_ok());
    }
}
