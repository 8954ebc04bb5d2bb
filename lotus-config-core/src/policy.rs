//! Protocol policy lookups consumed while building defaults
//!
//! The actor/state libraries own the real protocol constants. The builders
//! only see them through [`ProtocolPolicy`], so a different network (or a
//! test) can supply its own ceilings and expiration windows.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::duration::Duration;
use crate::error::{ConfigError, ConfigResult};

/// Chain height or span measured in epochs
pub type ChainEpoch = i64;

/// Network upgrade version tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetworkVersion(pub u32);

impl NetworkVersion {
    pub const V20: NetworkVersion = NetworkVersion(20);
    pub const V21: NetworkVersion = NetworkVersion(21);
    pub const V22: NetworkVersion = NetworkVersion(22);
    pub const V23: NetworkVersion = NetworkVersion(23);
}

impl fmt::Display for NetworkVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "nv{}", self.0)
    }
}

/// Network version whose sector-expiration policy sizes the default
/// committed-capacity sector lifetime. Bumping this to nv21 or later
/// stretches the default lifetime from 540 days to roughly 3.5 years.
pub const DEFAULT_CC_LIFETIME_NETWORK_VERSION: NetworkVersion = NetworkVersion::V20;

/// Source of protocol constants the default builders depend on
pub trait ProtocolPolicy {
    /// Longest allowed sector expiration extension, in epochs
    fn max_sector_expiration_extension(&self, version: NetworkVersion) -> ConfigResult<ChainEpoch>;

    /// Smallest batch for which proof aggregation is allowed
    fn min_aggregated_sectors(&self) -> u64;

    /// Largest number of proofs in one aggregate
    fn max_aggregated_sectors(&self) -> u64;

    /// Largest number of sectors in one precommit batch message
    fn pre_commit_sector_batch_max_size(&self) -> u64;

    /// Wall-clock length of one epoch
    fn epoch_duration_seconds(&self) -> u64;

    /// Epochs a precommit ticket stays valid before it expires
    fn max_pre_commit_randomness_lookback(&self) -> ChainEpoch;

    /// Convert an epoch count to wall-clock time; `None` on overflow
    fn epochs_to_duration(&self, epochs: ChainEpoch) -> Option<Duration> {
        let epoch_secs = i64::try_from(self.epoch_duration_seconds()).ok()?;
        Duration::checked_from_secs(epochs.checked_mul(epoch_secs)?)
    }

    /// Wall-clock window before a precommit ticket expires
    fn pre_commit_expiration_window(&self) -> Duration {
        self.epochs_to_duration(self.max_pre_commit_randomness_lookback())
            .unwrap_or(Duration::MAX)
    }
}

pub const EPOCH_DURATION_SECONDS: u64 = 30;
pub const EPOCHS_IN_DAY: ChainEpoch = 24 * 60 * 60 / EPOCH_DURATION_SECONDS as ChainEpoch;
pub const SEAL_RANDOMNESS_LOOKBACK: ChainEpoch = 900;
pub const MIN_AGGREGATED_SECTORS: u64 = 4;
pub const MAX_AGGREGATED_SECTORS: u64 = 819;
pub const PRE_COMMIT_SECTOR_BATCH_MAX_SIZE: u64 = 256;

/// Newest network version the mainnet policy knows about
pub const LATEST_NETWORK_VERSION: NetworkVersion = NetworkVersion::V23;

/// Mainnet protocol constants
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MainnetPolicy;

impl ProtocolPolicy for MainnetPolicy {
    fn max_sector_expiration_extension(&self, version: NetworkVersion) -> ConfigResult<ChainEpoch> {
        if version > LATEST_NETWORK_VERSION {
            return Err(ConfigError::UnsupportedNetworkVersion(version));
        }
        if version < NetworkVersion::V21 {
            Ok(540 * EPOCHS_IN_DAY)
        } else {
            Ok(1278 * EPOCHS_IN_DAY)
        }
    }

    fn min_aggregated_sectors(&self) -> u64 {
        MIN_AGGREGATED_SECTORS
    }

    fn max_aggregated_sectors(&self) -> u64 {
        MAX_AGGREGATED_SECTORS
    }

    fn pre_commit_sector_batch_max_size(&self) -> u64 {
        PRE_COMMIT_SECTOR_BATCH_MAX_SIZE
    }

    fn epoch_duration_seconds(&self) -> u64 {
        EPOCH_DURATION_SECONDS
    }

    fn max_pre_commit_randomness_lookback(&self) -> ChainEpoch {
        EPOCHS_IN_DAY + SEAL_RANDOMNESS_LOOKBACK
    }
}
