// Service exports
pub mod cache;
pub mod catalog;
pub mod postgres;
pub mod rest;

pub use cache::{CacheError, CacheKey, CacheManager, CachedCatalog};
pub use catalog::{group_by_type, CatalogError, CatalogProvider, InMemoryCatalog};
pub use postgres::{PostgresCatalog, PostgresError};
pub use rest::{RestCatalogClient, RestError};
