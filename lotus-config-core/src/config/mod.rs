//! Default configuration trees for each node role
//!
//! Every role starts from a fully populated tree built here. User files only
//! need to name the settings they change; everything else keeps the value
//! below. Keys use the node's PascalCase layout.
//!
//! # Example Configuration
//!
//! ```toml
//! # Storage miner overrides
//! [API]
//! ListenAddress = "/ip4/0.0.0.0/tcp/2345/http"
//! Timeout = "1m0s"
//!
//! [Sealing]
//! MaxWaitDealsSectors = 4
//! CommitBatchWait = "12h0m0s"
//! CommitBatchSlack = "2h0m0s"
//!
//! [Storage]
//! Assigner = "spread"
//! ResourceFiltering = "disabled"
//!
//! [Dealmaking.RetrievalPricing]
//! Strategy = "external"
//!
//! [Dealmaking.RetrievalPricing.External]
//! Path = "/opt/lotus/retrieval-price.sh"
//!
//! [Fees.MaxCommitBatchGasFee]
//! Base = "0"
//! PerSector = "0.03 FIL"
//!
//! [DAGStore]
//! GCInterval = "5m0s"
//! ```

pub mod chain;
pub mod cluster;
pub mod common;
pub mod dealmaking;
pub mod defaults;
pub mod fees;
pub mod full_node;
pub mod index;
pub mod miner;
pub mod sealing;
pub mod storage;

pub use chain::{
    ChainstoreConfig, ClientConfig, EventsConfig, FeeConfig, FevmConfig, SplitstoreConfig,
};
pub use cluster::UserRaftConfig;
pub use common::{ApiConfig, BackupConfig, CommonConfig, Libp2pConfig, LoggingConfig, PubsubConfig};
pub use dealmaking::{
    ActiveRetrievalPricing, DealmakingConfig, RetrievalPricing, RetrievalPricingDefault,
    RetrievalPricingExternal, RetrievalPricingStrategy,
};
pub use fees::{BatchFeeConfig, MinerFeeConfig};
pub use full_node::FullNode;
pub use index::{DagStoreConfig, IndexProviderConfig};
pub use miner::{MinerAddressConfig, MinerSubsystemConfig, StorageMiner};
pub use sealing::{committed_capacity_sector_lifetime, ProvingConfig, SealingConfig};
pub use storage::{ResourceFilteringStrategy, SealerConfig};
