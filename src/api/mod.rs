use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{delete, get, post},
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::Store;
use crate::services::{AuthService, BuildService, CatalogService};
use crate::state::SharedState;

pub mod auth;
mod builds;
mod catalog;
mod error;
mod observability;
mod system;
mod types;
mod users;
pub mod validation;

pub use auth::CurrentUser;
pub use error::ApiError;
pub use types::*;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &Store {
        &self.shared.store
    }

    #[must_use]
    pub fn auth_service(&self) -> &Arc<dyn AuthService> {
        &self.shared.auth_service
    }

    #[must_use]
    pub fn build_service(&self) -> &Arc<dyn BuildService> {
        &self.shared.build_service
    }

    #[must_use]
    pub fn catalog_service(&self) -> &Arc<dyn CatalogService> {
        &self.shared.catalog_service
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = &state.config().server.cors_allowed_origins;
    let cors_layer = if cors_origins.iter().any(|origin| origin == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .merge(create_public_router())
        .merge(create_protected_router(state.clone()))
        .route_layer(middleware::from_fn(observability::logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .with_state(state)
}

fn create_public_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/token", get(auth::get_token))
        .route("/users", post(users::create_user))
        .route("/mod", get(catalog::list_mods))
        .route("/warframe", get(catalog::list_warframes))
        .route("/weapon/primary", get(catalog::list_primary_weapons))
        .route("/health", get(system::health))
        .route("/metrics", get(observability::get_metrics))
}

fn create_protected_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/token", delete(auth::revoke_token))
        .route("/build", get(builds::list_builds).post(builds::create_build))
        .route(
            "/build/{id}",
            get(builds::get_build)
                .put(builds::update_build)
                .delete(builds::delete_build),
        )
        .route_layer(middleware::from_fn_with_state(state, auth::require_bearer))
}
