use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Cache miss: {0}")]
    CacheMiss(String),
}

/// In-memory cache of evaluation results
///
/// Entries are keyed by a fingerprint of the evaluated records, so a changed
/// record never hits a stale entry; the TTL bounds how long a result computed
/// against an earlier `now` is served.
pub struct CacheManager {
    cache: moka::future::Cache<String, Vec<u8>>,
    ttl_secs: u64,
}

impl CacheManager {
    /// Create a new cache manager
    pub fn new(max_entries: u64, ttl_secs: u64) -> Self {
        let cache = moka::future::CacheBuilder::new(max_entries)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { cache, ttl_secs }
    }

    /// Get a value from cache
    pub async fn get<T>(&self, key: &str) -> Result<T, CacheError>
    where
        T: for<'de> Deserialize<'de>,
    {
        match self.cache.get(key).await {
            Some(bytes) => {
                tracing::trace!("Cache hit: {}", key);
                Ok(serde_json::from_slice(&bytes)?)
            }
            None => {
                tracing::trace!("Cache miss: {}", key);
                Err(CacheError::CacheMiss(key.to_string()))
            }
        }
    }

    /// Set a value in cache
    pub async fn set<T>(&self, key: &str, value: &T) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        let bytes = serde_json::to_vec(value)?;
        self.cache.insert(key.to_string(), bytes).await;

        tracing::trace!("Cache set: {}", key);
        Ok(())
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.cache.entry_count(),
            ttl_secs: self.ttl_secs,
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub entries: u64,
    pub ttl_secs: u64,
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key for a single job/nanny evaluation
    pub fn evaluation<T: Serialize>(
        job_id: i64,
        nanny_id: i64,
        inputs: &T,
        now: DateTime<Utc>,
    ) -> Result<String, CacheError> {
        Ok(format!("evaluation:{}:{}:{:016x}", job_id, nanny_id, fingerprint(inputs, now)?))
    }

    /// Build a cache key for a ranking of candidates for a job
    pub fn ranking<T: Serialize>(job_id: i64, inputs: &T, now: DateTime<Utc>) -> Result<String, CacheError> {
        Ok(format!("ranking:{}:{:016x}", job_id, fingerprint(inputs, now)?))
    }
}

/// Hash of the serialized inputs and the evaluation date
fn fingerprint<T: Serialize>(inputs: &T, now: DateTime<Utc>) -> Result<u64, CacheError> {
    let mut hasher = DefaultHasher::new();
    serde_json::to_vec(inputs)?.hash(&mut hasher);
    now.date_naive().hash(&mut hasher);
    Ok(hasher.finish())
}
