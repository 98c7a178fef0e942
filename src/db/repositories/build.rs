use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::info;

use crate::entities::{builds, prelude::*};
use crate::models::build::{Build, BuildSlots};

/// Repository for build operations
pub struct BuildRepository {
    conn: DatabaseConnection,
}

impl BuildRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn write_slots(active: &mut builds::ActiveModel, slots: &BuildSlots) {
        active.aura = Set(slots.aura.clone());
        active.exilus = Set(slots.exilus.clone());
        active.mod1 = Set(slots.mod1.clone());
        active.mod2 = Set(slots.mod2.clone());
        active.mod3 = Set(slots.mod3.clone());
        active.mod4 = Set(slots.mod4.clone());
        active.mod5 = Set(slots.mod5.clone());
        active.mod6 = Set(slots.mod6.clone());
        active.mod7 = Set(slots.mod7.clone());
        active.mod8 = Set(slots.mod8.clone());
    }

    pub async fn create(&self, user_id: i32, slots: &BuildSlots) -> Result<Build> {
        let mut active = builds::ActiveModel {
            user_id: Set(user_id),
            ..Default::default()
        };
        Self::write_slots(&mut active, slots);

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert build")?;

        info!("Created build {} for user {}", model.id, user_id);
        Ok(Build::from(model))
    }

    pub async fn get(&self, id: i32) -> Result<Option<Build>> {
        let model = Builds::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query build")?;

        Ok(model.map(Build::from))
    }

    pub async fn list_for_user(&self, user_id: i32) -> Result<Vec<Build>> {
        let rows = Builds::find()
            .filter(builds::Column::UserId.eq(user_id))
            .order_by_asc(builds::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list builds")?;

        Ok(rows.into_iter().map(Build::from).collect())
    }

    /// Replace all ten slots of a build. Returns `None` if the build is gone.
    pub async fn update_slots(&self, id: i32, slots: &BuildSlots) -> Result<Option<Build>> {
        let Some(model) = Builds::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query build for update")?
        else {
            return Ok(None);
        };

        let mut active: builds::ActiveModel = model.into();
        Self::write_slots(&mut active, slots);
        let updated = active
            .update(&self.conn)
            .await
            .context("Failed to update build")?;

        Ok(Some(Build::from(updated)))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Builds::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete build")?;

        if result.rows_affected > 0 {
            info!("Deleted build {}", id);
        }
        Ok(result.rows_affected > 0)
    }

    pub async fn count(&self) -> Result<u64> {
        Builds::find()
            .count(&self.conn)
            .await
            .context("Failed to count builds")
    }
}
