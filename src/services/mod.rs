pub mod auth_service;
pub use auth_service::{AuthError, AuthService, IssuedToken, NewUser};

pub mod auth_service_impl;
pub use auth_service_impl::SeaOrmAuthService;

pub mod build_service;
pub use build_service::{BuildError, BuildService};

pub mod build_service_impl;
pub use build_service_impl::SeaOrmBuildService;

pub mod catalog_service;
pub use catalog_service::{CatalogError, CatalogService, SeaOrmCatalogService};

pub mod token;
