use async_trait::async_trait;
use redis::aio::ConnectionManager;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use crate::models::{Catalog, ClubRecord, ClubType};
use crate::services::catalog::{CatalogError, CatalogProvider};

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    RedisError(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Cache miss: {0}")]
    CacheMiss(String),
}

/// Multi-tier cache manager
///
/// L1 is an in-process moka cache. L2 is Redis, shared across instances,
/// and optional: without it the manager runs L1-only.
pub struct CacheManager {
    redis: Option<Arc<tokio::sync::Mutex<ConnectionManager>>>,
    l1_cache: moka::future::Cache<String, Vec<u8>>,
    ttl_secs: u64,
}

impl CacheManager {
    /// Create a cache manager, connecting to Redis when a URL is given
    pub async fn new(redis_url: Option<&str>, l1_size: u64, ttl_secs: u64) -> Result<Self, CacheError> {
        let redis = match redis_url {
            Some(url) => {
                let client = redis::Client::open(url)?;
                let manager = redis::aio::ConnectionManager::new(client).await?;
                Some(Arc::new(tokio::sync::Mutex::new(manager)))
            }
            None => None,
        };

        Ok(Self {
            redis,
            ..Self::l1_only(l1_size, ttl_secs)
        })
    }

    /// Create an in-process cache without Redis
    pub fn l1_only(l1_size: u64, ttl_secs: u64) -> Self {
        let l1_cache = moka::future::CacheBuilder::new(l1_size)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self {
            redis: None,
            l1_cache,
            ttl_secs,
        }
    }

    pub fn has_redis(&self) -> bool {
        self.redis.is_some()
    }

    /// Get a value from cache (L1 first, then L2)
    pub async fn get<T>(&self, key: &str) -> Result<T, CacheError>
    where
        T: for<'de> Deserialize<'de>,
    {
        if let Some(bytes) = self.l1_cache.get(key).await {
            tracing::trace!("L1 cache hit: {}", key);
            return Ok(serde_json::from_slice(&bytes)?);
        }

        if let Some(redis) = &self.redis {
            let mut conn = redis.lock().await;
            let value: Option<String> = redis::cmd("GET")
                .arg(key)
                .query_async(&mut *conn)
                .await?;
            drop(conn);

            if let Some(json) = value {
                tracing::trace!("L2 cache hit: {}", key);

                // Populate L1 cache
                self.l1_cache
                    .insert(key.to_string(), json.as_bytes().to_vec())
                    .await;

                return Ok(serde_json::from_str(&json)?);
            }
        }

        tracing::trace!("Cache miss: {}", key);
        Err(CacheError::CacheMiss(key.to_string()))
    }

    /// Set a value in both tiers
    pub async fn set<T>(&self, key: &str, value: &T) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        let json = serde_json::to_string(value)?;

        self.l1_cache
            .insert(key.to_string(), json.as_bytes().to_vec())
            .await;

        if let Some(redis) = &self.redis {
            let mut conn = redis.lock().await;
            redis::cmd("SETEX")
                .arg(key)
                .arg(self.ttl_secs)
                .arg(json)
                .query_async::<()>(&mut *conn)
                .await?;
        }

        tracing::trace!("Cache set: {}", key);
        Ok(())
    }

    /// Delete a value from both tiers
    pub async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.l1_cache.invalidate(key).await;

        if let Some(redis) = &self.redis {
            let mut conn = redis.lock().await;
            redis::cmd("DEL")
                .arg(key)
                .query_async::<()>(&mut *conn)
                .await?;
        }
        Ok(())
    }

    /// Drop every cached catalog entry
    pub async fn invalidate_catalog(&self) -> Result<(), CacheError> {
        for club_type in ClubType::ALL {
            self.delete(&CacheKey::catalog(club_type)).await?;
        }

        tracing::debug!("Invalidated catalog cache");
        Ok(())
    }
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key for the active clubs of one type
    pub fn catalog(club_type: ClubType) -> String {
        format!("catalog:{}", club_type)
    }
}

/// Catalog provider that serves club lists from cache, per type
///
/// Only the types missing from cache are fetched from the inner provider.
/// Cache read or write failures fall back to the inner provider.
pub struct CachedCatalog {
    inner: Arc<dyn CatalogProvider>,
    cache: Arc<CacheManager>,
}

impl CachedCatalog {
    pub fn new(inner: Arc<dyn CatalogProvider>, cache: Arc<CacheManager>) -> Self {
        Self { inner, cache }
    }
}

#[async_trait]
impl CatalogProvider for CachedCatalog {
    async fn fetch_by_type(&self, types: &BTreeSet<ClubType>) -> Result<Catalog, CatalogError> {
        let mut catalog = Catalog::new();
        let mut missing = BTreeSet::new();

        for club_type in types {
            match self.cache.get::<Vec<ClubRecord>>(&CacheKey::catalog(*club_type)).await {
                Ok(clubs) => {
                    catalog.insert(*club_type, clubs);
                }
                Err(CacheError::CacheMiss(_)) => {
                    missing.insert(*club_type);
                }
                Err(e) => {
                    tracing::warn!("Catalog cache read failed for {}: {}", club_type, e);
                    missing.insert(*club_type);
                }
            }
        }

        if missing.is_empty() {
            return Ok(catalog);
        }

        tracing::debug!("Catalog cache miss for {:?}", missing);

        let fetched = self.inner.fetch_by_type(&missing).await?;
        for (club_type, clubs) in fetched {
            if let Err(e) = self.cache.set(&CacheKey::catalog(club_type), &clubs).await {
                tracing::warn!("Failed to cache catalog for {}: {}", club_type, e);
            }
            catalog.insert(club_type, clubs);
        }

        Ok(catalog)
    }

    async fn health_check(&self) -> bool {
        self.inner.health_check().await
    }

    async fn invalidate(&self) -> Result<(), CatalogError> {
        self.cache.invalidate_catalog().await?;
        self.inner.invalidate().await
    }
}
