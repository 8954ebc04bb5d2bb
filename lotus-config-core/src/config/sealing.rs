//! Sector sealing pipeline and batching policy
//!
//! The batching knobs trade aggregation discounts against expiration risk
//! and fee exposure, so they are checked together:
//!
//! - `MinCommitBatch <= MaxCommitBatch <= policy max aggregated sectors`
//! - `MaxPreCommitBatch <= policy precommit batch ceiling`
//! - `*BatchSlack < *BatchWait < precommit expiration window`
//!
//! `BatchPreCommitAboveBaseFee` and `AggregateAboveBaseFee` are thresholds:
//! batching only kicks in while the network base fee is above them. The
//! sealing scheduler acts on that; nothing here enforces it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::defaults::*;
use crate::duration::Duration;
use crate::error::{ConfigError, ConfigResult};
use crate::policy::{
    MainnetPolicy, NetworkVersion, ProtocolPolicy, DEFAULT_CC_LIFETIME_NETWORK_VERSION,
};
use crate::token::TokenAmount;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct SealingConfig {
    /// Sectors that may sit in WaitDeals at once; 0 is unlimited
    pub max_wait_deals_sectors: u64,

    /// Concurrently sealing sectors, excluding WaitDeals; 0 is unlimited
    pub max_sealing_sectors: u64,

    /// Concurrently sealing deal sectors, including WaitDeals; 0 is unlimited
    pub max_sealing_sectors_for_deals: u64,

    /// Start sealing a partially filled deal sector after this long
    pub wait_deals_delay: Duration,

    pub always_keep_unsealed_copy: bool,

    /// Finalize sectors before they land on chain
    pub finalize_early: bool,

    pub make_new_sector_for_deals: bool,

    /// Pay sector collateral from the miner actor balance
    pub collateral_from_miner_balance: bool,

    /// Balance kept aside when collateral comes from the miner balance
    pub available_balance_buffer: TokenAmount,

    pub disable_collateral_fallback: bool,

    /// Sectors per PreCommitSectorBatch message
    pub max_pre_commit_batch: u64,

    /// Longest a sector waits in a precommit batch
    pub pre_commit_batch_wait: Duration,

    /// Submit the batch this long before any member's ticket or deal start
    /// would expire
    pub pre_commit_batch_slack: Duration,

    /// Lifetime requested for committed-capacity sectors
    pub committed_capacity_sector_lifetime: Duration,

    /// Aggregate ProveCommit proofs when the batch is large enough
    pub aggregate_commits: bool,

    /// Smallest batch worth aggregating
    pub min_commit_batch: u64,

    /// Largest aggregate
    pub max_commit_batch: u64,

    /// Longest a sector waits in a commit batch
    pub commit_batch_wait: Duration,

    /// Submit the batch this long before any member would expire
    pub commit_batch_slack: Duration,

    /// Batch precommits only while the base fee is above this
    pub batch_pre_commit_above_base_fee: TokenAmount,

    /// Aggregate commits only while the base fee is above this
    pub aggregate_above_base_fee: TokenAmount,

    pub terminate_batch_min: u64,
    pub terminate_batch_max: u64,
    pub terminate_batch_wait: Duration,

    /// Cap on individual ProveCommit messages per epoch; 0 is unlimited
    pub max_sector_prove_commits_submitted_per_epoch: u64,

    #[serde(rename = "UseSyntheticPoRep")]
    pub use_synthetic_po_rep: bool,
}

/// Window PoSt proving
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ProvingConfig {
    /// Sector files checked in parallel before proving
    pub parallel_check_limit: u64,

    /// Give up checking a whole partition after this long
    pub partition_check_timeout: Duration,

    /// Give up checking one sector after this long
    pub single_check_timeout: Duration,
}

impl SealingConfig {
    /// Sealing defaults sized against `policy` at network `version`
    pub fn defaults(policy: &dyn ProtocolPolicy, version: NetworkVersion) -> ConfigResult<Self> {
        let cc_lifetime = committed_capacity_sector_lifetime(policy, version)?;
        debug!(%version, lifetime = %cc_lifetime, "Resolved committed-capacity sector lifetime");

        Ok(Self {
            max_wait_deals_sectors: DEFAULT_MAX_WAIT_DEALS_SECTORS,
            max_sealing_sectors: 0,
            max_sealing_sectors_for_deals: 0,
            wait_deals_delay: DEFAULT_WAIT_DEALS_DELAY,
            always_keep_unsealed_copy: true,
            finalize_early: false,
            make_new_sector_for_deals: true,

            collateral_from_miner_balance: false,
            available_balance_buffer: TokenAmount::ZERO,
            disable_collateral_fallback: false,

            max_pre_commit_batch: policy.pre_commit_sector_batch_max_size(),
            pre_commit_batch_wait: DEFAULT_PRE_COMMIT_BATCH_WAIT,
            pre_commit_batch_slack: DEFAULT_PRE_COMMIT_BATCH_SLACK,

            committed_capacity_sector_lifetime: cc_lifetime,

            aggregate_commits: true,
            min_commit_batch: policy.min_aggregated_sectors(),
            max_commit_batch: policy.max_aggregated_sectors(),
            commit_batch_wait: DEFAULT_COMMIT_BATCH_WAIT,
            commit_batch_slack: DEFAULT_COMMIT_BATCH_SLACK,

            batch_pre_commit_above_base_fee: DEFAULT_BATCH_ABOVE_BASE_FEE,
            aggregate_above_base_fee: DEFAULT_BATCH_ABOVE_BASE_FEE,

            terminate_batch_min: DEFAULT_TERMINATE_BATCH_MIN,
            terminate_batch_max: DEFAULT_TERMINATE_BATCH_MAX,
            terminate_batch_wait: DEFAULT_TERMINATE_BATCH_WAIT,
            max_sector_prove_commits_submitted_per_epoch: DEFAULT_MAX_PROVE_COMMITS_PER_EPOCH,
            use_synthetic_po_rep: false,
        })
    }

    /// Check batching bounds against protocol ceilings and expiry windows
    pub fn validate(&self, policy: &dyn ProtocolPolicy) -> ConfigResult<()> {
        if self.min_commit_batch > self.max_commit_batch {
            return Err(ConfigError::validation(
                "Sealing.MinCommitBatch",
                format!(
                    "{} exceeds MaxCommitBatch {}",
                    self.min_commit_batch, self.max_commit_batch
                ),
            ));
        }

        if self.max_commit_batch > policy.max_aggregated_sectors() {
            return Err(ConfigError::validation(
                "Sealing.MaxCommitBatch",
                format!(
                    "{} exceeds the protocol aggregation limit {}",
                    self.max_commit_batch,
                    policy.max_aggregated_sectors()
                ),
            ));
        }

        if self.aggregate_commits && self.min_commit_batch < policy.min_aggregated_sectors() {
            return Err(ConfigError::validation(
                "Sealing.MinCommitBatch",
                format!(
                    "aggregation needs at least {} sectors",
                    policy.min_aggregated_sectors()
                ),
            ));
        }

        if self.max_pre_commit_batch == 0 {
            return Err(ConfigError::validation("Sealing.MaxPreCommitBatch", "must be at least 1"));
        }

        if self.max_pre_commit_batch > policy.pre_commit_sector_batch_max_size() {
            return Err(ConfigError::validation(
                "Sealing.MaxPreCommitBatch",
                format!(
                    "{} exceeds the protocol precommit batch limit {}",
                    self.max_pre_commit_batch,
                    policy.pre_commit_sector_batch_max_size()
                ),
            ));
        }

        let window = policy.pre_commit_expiration_window();
        check_batch_timing(
            "Sealing.PreCommitBatchWait",
            "Sealing.PreCommitBatchSlack",
            self.pre_commit_batch_wait,
            self.pre_commit_batch_slack,
            window,
        )?;
        check_batch_timing(
            "Sealing.CommitBatchWait",
            "Sealing.CommitBatchSlack",
            self.commit_batch_wait,
            self.commit_batch_slack,
            window,
        )?;

        if self.terminate_batch_min > self.terminate_batch_max {
            return Err(ConfigError::validation(
                "Sealing.TerminateBatchMin",
                "must not exceed TerminateBatchMax",
            ));
        }

        if !self.committed_capacity_sector_lifetime.is_positive() {
            return Err(ConfigError::validation(
                "Sealing.CommittedCapacitySectorLifetime",
                "must be positive",
            ));
        }

        Ok(())
    }
}

/// `slack < wait < window`, with a non-negative slack
fn check_batch_timing(
    wait_field: &str,
    slack_field: &str,
    wait: Duration,
    slack: Duration,
    window: Duration,
) -> ConfigResult<()> {
    if slack.is_negative() {
        return Err(ConfigError::validation(slack_field, "must not be negative"));
    }
    if slack >= wait {
        return Err(ConfigError::validation(
            slack_field,
            format!("{} must be shorter than the batch wait {}", slack, wait),
        ));
    }
    if wait >= window {
        return Err(ConfigError::validation(
            wait_field,
            format!("{} must be shorter than the precommit expiration window {}", wait, window),
        ));
    }
    Ok(())
}

/// Epoch duration times the policy's longest sector expiration extension
pub fn committed_capacity_sector_lifetime(
    policy: &dyn ProtocolPolicy,
    version: NetworkVersion,
) -> ConfigResult<Duration> {
    let extension = policy.max_sector_expiration_extension(version)?;
    policy
        .epochs_to_duration(extension)
        .ok_or(ConfigError::UnsupportedNetworkVersion(version))
}

impl Default for SealingConfig {
    fn default() -> Self {
        Self::defaults(&MainnetPolicy, DEFAULT_CC_LIFETIME_NETWORK_VERSION)
            .expect("mainnet policy covers the default network version")
    }
}

impl Default for ProvingConfig {
    fn default() -> Self {
        Self {
            parallel_check_limit: DEFAULT_PARALLEL_CHECK_LIMIT,
            partition_check_timeout: DEFAULT_PARTITION_CHECK_TIMEOUT,
            single_check_timeout: DEFAULT_SINGLE_CHECK_TIMEOUT,
        }
    }
}

impl ProvingConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.parallel_check_limit == 0 {
            return Err(ConfigError::validation("Proving.ParallelCheckLimit", "must be at least 1"));
        }
        if !self.single_check_timeout.is_positive() {
            return Err(ConfigError::validation("Proving.SingleCheckTimeout", "must be positive"));
        }
        if self.partition_check_timeout < self.single_check_timeout {
            return Err(ConfigError::validation(
                "Proving.PartitionCheckTimeout",
                "must not be shorter than SingleCheckTimeout",
            ));
        }
        Ok(())
    }
}
