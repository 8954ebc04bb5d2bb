//! Full-node configuration root

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::chain::{ChainstoreConfig, ClientConfig, FeeConfig, FevmConfig};
use super::cluster::UserRaftConfig;
use super::common::CommonConfig;
use crate::error::ConfigResult;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct FullNode {
    #[serde(flatten)]
    pub common: CommonConfig,

    pub client: ClientConfig,
    pub fees: FeeConfig,
    pub chainstore: ChainstoreConfig,
    pub cluster: UserRaftConfig,
    pub fevm: FevmConfig,
}

impl FullNode {
    pub fn defaults() -> Self {
        debug!("Building full node defaults");
        Self::default()
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.common.validate()?;
        self.chainstore.splitstore.validate()?;
        self.cluster.validate()?;
        self.fevm.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenAmount;

    #[test]
    fn test_full_node_defaults() {
        let config = FullNode::defaults();
        assert_eq!(config.common.api.listen_address, "/ip4/127.0.0.1/tcp/1234/http");
        assert!(config.common.api.remote_listen_address.is_empty());
        assert_eq!(config.fees.default_max_fee, TokenAmount::from_milli_fil(70));
        assert_eq!(config.client.simultaneous_transfers_for_storage, 20);
        assert_eq!(config.cluster, UserRaftConfig::defaults());
        assert!(!config.fevm.enable_eth_rpc);
        assert!(config.validate().is_ok());
    }
}
