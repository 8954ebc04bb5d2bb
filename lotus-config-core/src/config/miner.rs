//! Storage-provider (miner) configuration root

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::common::CommonConfig;
use super::dealmaking::DealmakingConfig;
use super::defaults::*;
use super::fees::MinerFeeConfig;
use super::index::{DagStoreConfig, IndexProviderConfig};
use super::sealing::{ProvingConfig, SealingConfig};
use super::storage::SealerConfig;
use crate::error::{ConfigError, ConfigResult};
use crate::policy::{
    MainnetPolicy, NetworkVersion, ProtocolPolicy, DEFAULT_CC_LIFETIME_NETWORK_VERSION,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct StorageMiner {
    #[serde(flatten)]
    pub common: CommonConfig,

    pub subsystems: MinerSubsystemConfig,
    pub dealmaking: DealmakingConfig,
    pub index_provider: IndexProviderConfig,
    pub proving: ProvingConfig,
    pub sealing: SealingConfig,
    pub storage: SealerConfig,
    pub fees: MinerFeeConfig,
    pub addresses: MinerAddressConfig,

    #[serde(rename = "DAGStore")]
    pub dag_store: DagStoreConfig,
}

/// Which miner subsystems run in this process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct MinerSubsystemConfig {
    pub enable_mining: bool,
    pub enable_sealing: bool,
    pub enable_sector_storage: bool,
    pub enable_markets: bool,
}

impl Default for MinerSubsystemConfig {
    fn default() -> Self {
        Self {
            enable_mining: true,
            enable_sealing: true,
            enable_sector_storage: true,
            enable_markets: false,
        }
    }
}

/// Extra control addresses used to send specific message types
///
/// Empty lists fall back to the worker (and then owner) address unless the
/// fallbacks are disabled.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct MinerAddressConfig {
    pub pre_commit_control: Vec<String>,
    pub commit_control: Vec<String>,
    pub terminate_control: Vec<String>,
    pub deal_publish_control: Vec<String>,

    pub disable_owner_fallback: bool,
    pub disable_worker_fallback: bool,
}

impl MinerAddressConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        let lists = [
            ("Addresses.PreCommitControl", &self.pre_commit_control),
            ("Addresses.CommitControl", &self.commit_control),
            ("Addresses.TerminateControl", &self.terminate_control),
            ("Addresses.DealPublishControl", &self.deal_publish_control),
        ];

        for (field, addresses) in lists {
            if addresses.iter().any(|a| a.trim().is_empty()) {
                return Err(ConfigError::validation(field, "contains an empty address"));
            }
        }

        Ok(())
    }
}

impl StorageMiner {
    /// Storage-provider defaults sized against `policy` at network `version`
    ///
    /// Fails only if `policy` has no sector-expiration rule for `version`.
    pub fn defaults(policy: &dyn ProtocolPolicy, version: NetworkVersion) -> ConfigResult<Self> {
        debug!(%version, "Building storage miner defaults");

        let mut common = CommonConfig::default();
        common.api.listen_address = DEFAULT_MINER_API_LISTEN_ADDRESS.to_string();
        common.api.remote_listen_address = DEFAULT_MINER_REMOTE_LISTEN_ADDRESS.to_string();

        Ok(Self {
            common,
            subsystems: MinerSubsystemConfig::default(),
            dealmaking: DealmakingConfig::default(),
            index_provider: IndexProviderConfig::default(),
            proving: ProvingConfig::default(),
            sealing: SealingConfig::defaults(policy, version)?,
            storage: SealerConfig::default(),
            fees: MinerFeeConfig::default(),
            addresses: MinerAddressConfig::default(),
            dag_store: DagStoreConfig::default(),
        })
    }

    /// Validate every sub-tree, stopping at the first failure
    pub fn validate(&self, policy: &dyn ProtocolPolicy) -> ConfigResult<()> {
        self.common.validate()?;
        self.sealing.validate(policy)?;
        self.proving.validate()?;
        self.storage.validate()?;
        self.dealmaking.validate(policy)?;
        self.index_provider.validate()?;
        self.dag_store.validate()?;
        self.addresses.validate()
    }
}

impl Default for StorageMiner {
    fn default() -> Self {
        Self::defaults(&MainnetPolicy, DEFAULT_CC_LIFETIME_NETWORK_VERSION)
            .expect("mainnet policy covers the default network version")
    }
}
