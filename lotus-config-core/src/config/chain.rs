//! Full-node sub-trees: message fee defaults, client transfers, chain
//! store layout and the FEVM/Ethereum RPC layer

use serde::{Deserialize, Serialize};

use super::defaults::*;
use crate::duration::Duration;
use crate::error::{ConfigError, ConfigResult};
use crate::token::TokenAmount;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct FeeConfig {
    /// Fee cap applied to outgoing messages that do not specify one
    pub default_max_fee: TokenAmount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ClientConfig {
    pub simultaneous_transfers_for_storage: u64,
    pub simultaneous_transfers_for_retrieval: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ChainstoreConfig {
    pub enable_splitstore: bool,
    pub splitstore: SplitstoreConfig,
}

/// Hot/cold chain store split
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct SplitstoreConfig {
    /// "discard", "messages" or "universal"
    pub cold_store_type: String,
    pub hot_store_type: String,
    pub mark_set_type: String,

    /// Run a full hot store GC every N compactions; 0 disables
    #[serde(rename = "HotStoreFullGCFrequency")]
    pub hot_store_full_gc_frequency: u64,

    /// Target hot store size in bytes; 0 disables size-based GC
    pub hot_store_max_space_target: u64,
    pub hot_store_max_space_threshold: u64,
    pub hotstore_max_space_safety_buffer: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct FevmConfig {
    #[serde(rename = "EnableEthRPC")]
    pub enable_eth_rpc: bool,

    /// Days to keep eth tx hash mappings; 0 keeps them forever
    pub eth_tx_hash_mapping_lifetime_days: i64,

    pub events: EventsConfig,
}

/// Actor event filters served over the eth RPC
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct EventsConfig {
    #[serde(rename = "DisableRealTimeFilterAPI")]
    pub disable_real_time_filter_api: bool,

    #[serde(rename = "DisableHistoricFilterAPI")]
    pub disable_historic_filter_api: bool,

    /// Idle filters are removed after this long
    #[serde(rename = "FilterTTL")]
    pub filter_ttl: Duration,

    pub max_filters: u64,
    pub max_filter_results: u64,
    pub max_filter_height_range: u64,
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            default_max_fee: DEFAULT_MAX_FEE,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            simultaneous_transfers_for_storage: DEFAULT_SIMULTANEOUS_TRANSFERS,
            simultaneous_transfers_for_retrieval: DEFAULT_SIMULTANEOUS_TRANSFERS,
        }
    }
}

impl Default for ChainstoreConfig {
    fn default() -> Self {
        Self {
            enable_splitstore: true,
            splitstore: SplitstoreConfig::default(),
        }
    }
}

impl Default for SplitstoreConfig {
    fn default() -> Self {
        Self {
            cold_store_type: "discard".to_string(),
            hot_store_type: "badger".to_string(),
            mark_set_type: "badger".to_string(),
            hot_store_full_gc_frequency: 20,
            hot_store_max_space_target: DEFAULT_HOT_STORE_MAX_SPACE_TARGET,
            hot_store_max_space_threshold: DEFAULT_HOT_STORE_MAX_SPACE_THRESHOLD,
            hotstore_max_space_safety_buffer: DEFAULT_HOT_STORE_MAX_SPACE_SAFETY_BUFFER,
        }
    }
}

impl Default for FevmConfig {
    fn default() -> Self {
        Self {
            enable_eth_rpc: false,
            eth_tx_hash_mapping_lifetime_days: 0,
            events: EventsConfig::default(),
        }
    }
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            disable_real_time_filter_api: false,
            disable_historic_filter_api: false,
            filter_ttl: DEFAULT_FILTER_TTL,
            max_filters: 100,
            max_filter_results: 10000,
            max_filter_height_range: DEFAULT_MAX_FILTER_HEIGHT_RANGE,
        }
    }
}

impl SplitstoreConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        match self.cold_store_type.as_str() {
            "discard" | "messages" | "universal" => {}
            other => {
                return Err(ConfigError::validation(
                    "Chainstore.Splitstore.ColdStoreType",
                    format!("unknown cold store type '{}'", other),
                ))
            }
        }

        if self.hot_store_max_space_target > 0
            && self.hot_store_max_space_threshold >= self.hot_store_max_space_target
        {
            return Err(ConfigError::validation(
                "Chainstore.Splitstore.HotStoreMaxSpaceThreshold",
                "must be smaller than HotStoreMaxSpaceTarget",
            ));
        }

        Ok(())
    }
}

impl FevmConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.eth_tx_hash_mapping_lifetime_days < 0 {
            return Err(ConfigError::validation(
                "Fevm.EthTxHashMappingLifetimeDays",
                "must not be negative",
            ));
        }

        if !self.events.filter_ttl.is_positive() {
            return Err(ConfigError::validation("Fevm.Events.FilterTTL", "must be positive"));
        }

        Ok(())
    }
}
