//! Cache layer
//!
//! Caches the catalog listings and the category aggregate. The in-memory
//! moka cache is the only backend; a TTL of zero disables caching.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ai_directory::cache::{create_cache, CacheLayer};
//! use ai_directory::config::CacheConfig;
//!
//! let cache = create_cache(&CacheConfig::default());
//! cache.set("category:list", &listing, cache.default_ttl()).await?;
//! ```

pub mod memory;

use anyhow::Result;
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::config::CacheConfig;

/// Cache layer trait
///
/// The generic methods keep this trait from being object safe; the `Cache`
/// enum provides runtime selection instead.
#[async_trait]
pub trait CacheLayer: Send + Sync {
    /// Get a value from cache
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>>;

    /// Set a value in cache with TTL
    async fn set<T: Serialize + Send + Sync>(&self, key: &str, value: &T, ttl: Duration)
        -> Result<()>;

    /// Delete a value from cache
    async fn delete(&self, key: &str) -> Result<()>;
}

pub use memory::MemoryCache;

/// Runtime-selected cache backend
#[derive(Debug)]
pub enum Cache {
    /// In-memory cache using moka
    Memory(MemoryCache),
    /// Every read misses and every write is dropped
    Disabled,
}

impl Cache {
    /// TTL services should store their entries with
    pub fn default_ttl(&self) -> Duration {
        match self {
            Cache::Memory(cache) => cache.default_ttl(),
            Cache::Disabled => Duration::ZERO,
        }
    }
}

#[async_trait]
impl CacheLayer for Cache {
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>> {
        match self {
            Cache::Memory(cache) => cache.get(key).await,
            Cache::Disabled => Ok(None),
        }
    }

    async fn set<T: Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> Result<()> {
        match self {
            Cache::Memory(cache) => cache.set(key, value, ttl).await,
            Cache::Disabled => Ok(()),
        }
    }

    async fn delete(&self, key: &str) -> Result<()> {
        match self {
            Cache::Memory(cache) => cache.delete(key).await,
            Cache::Disabled => Ok(()),
        }
    }
}

/// Create a cache instance based on configuration
pub fn create_cache(config: &CacheConfig) -> Arc<Cache> {
    if config.ttl_seconds == 0 {
        tracing::info!("Caching disabled");
        return Arc::new(Cache::Disabled);
    }

    tracing::info!("Using in-memory cache (ttl: {}s)", config.ttl_seconds);
    Arc::new(Cache::Memory(MemoryCache::new(Duration::from_secs(
        config.ttl_seconds,
    ))))
}
