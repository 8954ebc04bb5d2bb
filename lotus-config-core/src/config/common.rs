//! Settings shared by every node role: API endpoint, logging, metadata
//! backup, libp2p host and pubsub

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::defaults::*;
use crate::duration::Duration;
use crate::error::{ConfigError, ConfigResult};

/// Block embedded at the top level of every role's tree
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CommonConfig {
    #[serde(rename = "API")]
    pub api: ApiConfig,
    pub backup: BackupConfig,
    pub logging: LoggingConfig,
    pub libp2p: Libp2pConfig,
    pub pubsub: PubsubConfig,
}

/// JSON-RPC API endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ApiConfig {
    /// Multiaddress the API server binds to
    pub listen_address: String,

    /// host:port used by remote workers to reach this node
    pub remote_listen_address: String,

    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct BackupConfig {
    /// Skip the metadata journal used for point-in-time backups
    pub disable_metadata_log: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct LoggingConfig {
    /// Log level per subsystem name, e.g. `{"chain": "WARN"}`
    pub subsystem_levels: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Libp2pConfig {
    pub listen_addresses: Vec<String>,
    pub announce_addresses: Vec<String>,
    pub no_announce_addresses: Vec<String>,

    /// Connection manager low watermark
    pub conn_mgr_low: u64,

    /// Connection manager high watermark; trimming starts above it
    pub conn_mgr_high: u64,

    /// New connections are exempt from trimming for this long
    pub conn_mgr_grace: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct PubsubConfig {
    pub bootstrapper: bool,
    pub direct_peers: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            listen_address: DEFAULT_FULL_NODE_API_LISTEN_ADDRESS.to_string(),
            remote_listen_address: String::new(),
            timeout: DEFAULT_API_TIMEOUT,
        }
    }
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            disable_metadata_log: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        let mut subsystem_levels = BTreeMap::new();
        subsystem_levels.insert("example-subsystem".to_string(), "INFO".to_string());
        Self { subsystem_levels }
    }
}

impl Default for Libp2pConfig {
    fn default() -> Self {
        Self {
            listen_addresses: string_list(DEFAULT_LISTEN_ADDRESSES),
            announce_addresses: Vec::new(),
            no_announce_addresses: Vec::new(),
            conn_mgr_low: DEFAULT_CONN_MGR_LOW,
            conn_mgr_high: DEFAULT_CONN_MGR_HIGH,
            conn_mgr_grace: DEFAULT_CONN_MGR_GRACE,
        }
    }
}

impl CommonConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.api.listen_address.is_empty() {
            return Err(ConfigError::validation("API.ListenAddress", "cannot be empty"));
        }

        if !self.api.timeout.is_positive() {
            return Err(ConfigError::validation("API.Timeout", "must be positive"));
        }

        if self.libp2p.conn_mgr_low > self.libp2p.conn_mgr_high {
            return Err(ConfigError::validation(
                "Libp2p.ConnMgrLow",
                format!(
                    "low watermark {} exceeds high watermark {}",
                    self.libp2p.conn_mgr_low, self.libp2p.conn_mgr_high
                ),
            ));
        }

        if self.libp2p.conn_mgr_grace.is_negative() {
            return Err(ConfigError::validation("Libp2p.ConnMgrGrace", "must not be negative"));
        }

        Ok(())
    }
}
