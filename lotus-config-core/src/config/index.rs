//! Content announcement to network indexers and the local DAG store

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::defaults::*;
use crate::duration::Duration;
use crate::error::{ConfigError, ConfigResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct IndexProviderConfig {
    /// Announce deal content to indexer nodes
    pub enable: bool,

    /// Advertisement entry chunks kept in the LRU cache
    pub entries_cache_capacity: u64,

    /// Multihashes per advertisement entry chunk
    pub entries_chunk_size: u64,

    /// Pubsub topic for announcements; empty derives it from the network name
    pub topic_name: String,

    /// Drop cached entry chunks on startup
    pub purge_cache_on_start: bool,
}

impl Default for IndexProviderConfig {
    fn default() -> Self {
        Self {
            enable: true,
            entries_cache_capacity: DEFAULT_ENTRIES_CACHE_CAPACITY,
            entries_chunk_size: DEFAULT_ENTRIES_CHUNK_SIZE,
            topic_name: String::new(),
            purge_cache_on_start: false,
        }
    }
}

impl IndexProviderConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.enable {
            return Ok(());
        }

        if self.entries_cache_capacity == 0 {
            return Err(ConfigError::validation(
                "IndexProvider.EntriesCacheCapacity",
                "must be at least 1",
            ));
        }

        if self.entries_chunk_size == 0 {
            return Err(ConfigError::validation(
                "IndexProvider.EntriesChunkSize",
                "must be at least 1",
            ));
        }

        if !self.entries_chunk_size.is_power_of_two() {
            warn!(
                chunk_size = self.entries_chunk_size,
                "IndexProvider.EntriesChunkSize is not a power of two"
            );
        }

        Ok(())
    }
}

/// Local store of unsealed piece indexes used to serve retrievals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DagStoreConfig {
    /// Empty places the store under the repo's `dagstore` directory
    pub root_dir: String,

    /// Shards indexed concurrently
    pub max_concurrent_index: u64,

    /// Fetches of unsealed pieces ready for serving; 0 is unlimited
    pub max_concurrent_ready_fetches: u64,

    pub max_concurrent_unseals: u64,

    /// Concurrent calls into the storage subsystem
    pub max_concurrency_storage_calls: u64,

    /// Interval between sweeps of unused transient copies
    #[serde(rename = "GCInterval")]
    pub gc_interval: Duration,
}

impl Default for DagStoreConfig {
    fn default() -> Self {
        Self {
            root_dir: String::new(),
            max_concurrent_index: DEFAULT_MAX_CONCURRENT_INDEX,
            max_concurrent_ready_fetches: 0,
            max_concurrent_unseals: DEFAULT_MAX_CONCURRENT_UNSEALS,
            max_concurrency_storage_calls: DEFAULT_MAX_CONCURRENCY_STORAGE_CALLS,
            gc_interval: DEFAULT_DAG_STORE_GC_INTERVAL,
        }
    }
}

impl DagStoreConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_concurrent_index == 0 {
            return Err(ConfigError::validation(
                "DAGStore.MaxConcurrentIndex",
                "must be at least 1",
            ));
        }
        if self.max_concurrency_storage_calls == 0 {
            return Err(ConfigError::validation(
                "DAGStore.MaxConcurrencyStorageCalls",
                "must be at least 1",
            ));
        }
        if !self.gc_interval.is_positive() {
            return Err(ConfigError::validation("DAGStore.GCInterval", "must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_provider_defaults() {
        let config = IndexProviderConfig::default();
        assert!(config.enable);
        assert_eq!(config.entries_cache_capacity, 1024);
        assert_eq!(config.entries_chunk_size, 16384);
        assert!(config.topic_name.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_disabled_index_provider_skips_checks() {
        let config = IndexProviderConfig {
            enable: false,
            entries_chunk_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_dag_store_defaults() {
        let config = DagStoreConfig::default();
        assert_eq!(config.gc_interval, Duration::from_mins(1));
        assert_eq!(config.max_concurrency_storage_calls, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_gc_interval_rejected() {
        let config = DagStoreConfig {
            gc_interval: Duration::ZERO,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("GCInterval"));
    }
}
