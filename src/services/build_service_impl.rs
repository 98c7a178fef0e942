//! `SeaORM` implementation of the `BuildService` trait.

use async_trait::async_trait;
use tracing::debug;

use crate::db::Store;
use crate::models::build::{Build, BuildSlots};
use crate::services::build_service::{BuildError, BuildService};

pub struct SeaOrmBuildService {
    store: Store,
}

impl SeaOrmBuildService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BuildService for SeaOrmBuildService {
    async fn create_build(&self, owner_id: i32, slots: BuildSlots) -> Result<Build, BuildError> {
        Ok(self.store.create_build(owner_id, &slots).await?)
    }

    async fn get_build(&self, id: i32) -> Result<Build, BuildError> {
        self.store
            .get_build(id)
            .await?
            .ok_or(BuildError::NotFound(id))
    }

    async fn list_builds(&self, owner_id: i32) -> Result<Vec<Build>, BuildError> {
        Ok(self.store.list_builds_for_user(owner_id).await?)
    }

    async fn update_build(
        &self,
        id: i32,
        changes: Vec<(String, Option<String>)>,
    ) -> Result<Build, BuildError> {
        let mut build = self.get_build(id).await?;
        let applied = build.slots.apply(changes);
        debug!("Updating {} slot(s) of build {}", applied, id);

        self.store
            .update_build_slots(id, &build.slots)
            .await?
            .ok_or(BuildError::NotFound(id))
    }

    async fn delete_build(&self, id: i32) -> Result<(), BuildError> {
        if self.store.delete_build(id).await? {
            Ok(())
        } else {
            Err(BuildError::NotFound(id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SecurityConfig;

    async fn setup() -> (SeaOrmBuildService, i32) {
        let store = Store::new("sqlite::memory:").await.unwrap();
        let security = SecurityConfig {
            argon2_memory_cost_kib: 1024,
            argon2_time_cost: 1,
            argon2_parallelism: 1,
        };
        let user = store
            .create_user("tenno", "t@x.com", "pw", &security)
            .await
            .unwrap()
            .unwrap();
        (SeaOrmBuildService::new(store), user.id)
    }

    #[tokio::test]
    async fn test_update_build_overwrites_known_slots_only() {
        let (service, owner) = setup().await;
        let build = service
            .create_build(
                owner,
                BuildSlots {
                    aura: Some("Steel Charge".to_string()),
                    mod2: Some("Intensify".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let updated = service
            .update_build(
                build.id,
                vec![
                    ("mod2".to_string(), None),
                    ("exilus".to_string(), Some("Handspring".to_string())),
                    ("owner".to_string(), Some("someone".to_string())),
                ],
            )
            .await
            .unwrap();

        assert_eq!(updated.slots.aura.as_deref(), Some("Steel Charge"));
        assert_eq!(updated.slots.mod2, None);
        assert_eq!(updated.slots.exilus.as_deref(), Some("Handspring"));
        assert_eq!(updated.user_id, owner);

        let stored = service.get_build(build.id).await.unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn test_missing_build_is_not_found() {
        let (service, _) = setup().await;

        assert!(matches!(service.get_build(99).await, Err(BuildError::NotFound(99))));
        assert!(matches!(
            service.update_build(99, vec![]).await,
            Err(BuildError::NotFound(99))
        ));
        assert!(matches!(service.delete_build(99).await, Err(BuildError::NotFound(99))));
    }

    #[tokio::test]
    async fn test_delete_build() {
        let (service, owner) = setup().await;
        let build = service
            .create_build(owner, BuildSlots::default())
            .await
            .unwrap();

        service.delete_build(build.id).await.unwrap();
        assert!(service.list_builds(owner).await.unwrap().is_empty());
    }
}
