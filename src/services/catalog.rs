use async_trait::async_trait;
use std::collections::BTreeSet;
use thiserror::Error;
use crate::models::{Catalog, ClubRecord, ClubType};
use crate::services::cache::CacheError;
use crate::services::postgres::PostgresError;
use crate::services::rest::RestError;

/// Errors that can occur while loading the club catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Postgres catalog error: {0}")]
    Postgres(#[from] PostgresError),

    #[error("REST catalog error: {0}")]
    Rest(#[from] RestError),

    #[error("Catalog cache error: {0}")]
    Cache(#[from] CacheError),
}

/// Source of active clubs, grouped by type
///
/// Implementations return one key per requested type, with an empty list
/// when no active club of that type exists. Ordering within a list is not
/// guaranteed.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn fetch_by_type(&self, types: &BTreeSet<ClubType>) -> Result<Catalog, CatalogError>;

    /// Whether the backing store is reachable
    async fn health_check(&self) -> bool {
        true
    }

    /// Drop any cached catalog data so the next fetch reads the store.
    /// Uncached providers have nothing to drop.
    async fn invalidate(&self) -> Result<(), CatalogError> {
        Ok(())
    }
}

/// Group clubs under the requested types, dropping clubs of other types
pub fn group_by_type(types: &BTreeSet<ClubType>, clubs: Vec<ClubRecord>) -> Catalog {
    let mut catalog: Catalog = types.iter().map(|t| (*t, Vec::new())).collect();

    for club in clubs {
        if let Some(bucket) = catalog.get_mut(&club.club_type) {
            bucket.push(club);
        }
    }

    catalog
}

/// Catalog held in memory, used for fixtures and local runs
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    clubs: Vec<ClubRecord>,
}

impl InMemoryCatalog {
    pub fn new(clubs: Vec<ClubRecord>) -> Self {
        Self { clubs }
    }
}

#[async_trait]
impl CatalogProvider for InMemoryCatalog {
    async fn fetch_by_type(&self, types: &BTreeSet<ClubType>) -> Result<Catalog, CatalogError> {
        Ok(group_by_type(types, self.clubs.clone()))
    }
}
