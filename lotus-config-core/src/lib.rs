//! Default configuration schema and policy for Lotus storage-provider nodes
//!
//! Builds the fully populated default trees for the full node, the storage
//! miner and the cluster follower, overlays user files onto them, and checks
//! the cross-field invariants the sealing and deal pipelines depend on.

pub mod config;
pub mod duration;
pub mod error;
pub mod loader;
pub mod policy;
pub mod token;
pub mod traversal;

pub use config::{
    BatchFeeConfig, FullNode, ResourceFilteringStrategy, RetrievalPricing,
    RetrievalPricingStrategy, StorageMiner, UserRaftConfig,
};
pub use duration::Duration;
pub use error::{ConfigError, ConfigResult};
pub use policy::{MainnetPolicy, NetworkVersion, ProtocolPolicy};
pub use token::TokenAmount;
pub use traversal::TraversalBudget;
