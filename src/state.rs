use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AuthService, BuildService, CatalogService, SeaOrmAuthService, SeaOrmBuildService,
    SeaOrmCatalogService,
};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub auth_service: Arc<dyn AuthService>,

    pub build_service: Arc<dyn BuildService>,

    pub catalog_service: Arc<dyn CatalogService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Ok(Self::with_store(config, store))
    }

    /// Wires the services around an already opened store.
    #[must_use]
    pub fn with_store(config: Config, store: Store) -> Self {
        let auth_service = Arc::new(SeaOrmAuthService::new(
            store.clone(),
            config.security.clone(),
            config.tokens.clone(),
        )) as Arc<dyn AuthService>;

        let build_service = Arc::new(SeaOrmBuildService::new(store.clone()))
            as Arc<dyn BuildService>;

        let catalog_service = Arc::new(SeaOrmCatalogService::new(store.clone()))
            as Arc<dyn CatalogService>;

        Self {
            config: Arc::new(config),
            store,
            auth_service,
            build_service,
            catalog_service,
        }
    }
}
