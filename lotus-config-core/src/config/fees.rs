//! Gas fee caps for storage-provider messages
//!
//! Batched messages are capped with an affine model: a fixed overhead plus a
//! marginal cost per sector, matching how aggregated proof gas scales on
//! chain.

use serde::{Deserialize, Serialize};

use super::defaults::*;
use crate::token::TokenAmount;

/// Fee cap for a message carrying `n` sectors: `base + per_sector * n`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct BatchFeeConfig {
    pub base: TokenAmount,
    pub per_sector: TokenAmount,
}

impl BatchFeeConfig {
    pub const fn new(base: TokenAmount, per_sector: TokenAmount) -> Self {
        Self { base, per_sector }
    }

    /// Maximum fee for a batch of `sectors` sectors
    ///
    /// Exact integer arithmetic in attoFIL; saturates at `u128::MAX`, which
    /// no real batch comes near.
    pub const fn fee_for_sectors(&self, sectors: u64) -> TokenAmount {
        self.base.saturating_add(self.per_sector.saturating_mul(sectors))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct MinerFeeConfig {
    pub max_pre_commit_gas_fee: TokenAmount,
    pub max_commit_gas_fee: TokenAmount,

    pub max_pre_commit_batch_gas_fee: BatchFeeConfig,
    pub max_commit_batch_gas_fee: BatchFeeConfig,

    pub max_terminate_gas_fee: TokenAmount,

    #[serde(rename = "MaxWindowPoStGasFee")]
    pub max_window_post_gas_fee: TokenAmount,

    pub max_publish_deals_fee: TokenAmount,
    pub max_market_balance_add_fee: TokenAmount,

    /// Spend up to the WindowPoSt cap when the base fee spikes rather than
    /// risk a missed proof
    #[serde(rename = "MaximizeWindowPoStFeeCap")]
    pub maximize_window_post_fee_cap: bool,
}

impl Default for MinerFeeConfig {
    fn default() -> Self {
        Self {
            max_pre_commit_gas_fee: DEFAULT_MAX_PRE_COMMIT_GAS_FEE,
            max_commit_gas_fee: DEFAULT_MAX_COMMIT_GAS_FEE,
            max_pre_commit_batch_gas_fee: BatchFeeConfig::new(
                TokenAmount::ZERO,
                DEFAULT_PRE_COMMIT_BATCH_FEE_PER_SECTOR,
            ),
            max_commit_batch_gas_fee: BatchFeeConfig::new(
                TokenAmount::ZERO,
                DEFAULT_COMMIT_BATCH_FEE_PER_SECTOR,
            ),
            max_terminate_gas_fee: DEFAULT_MAX_TERMINATE_GAS_FEE,
            max_window_post_gas_fee: DEFAULT_MAX_WINDOW_POST_GAS_FEE,
            max_publish_deals_fee: DEFAULT_MAX_PUBLISH_DEALS_FEE,
            max_market_balance_add_fee: DEFAULT_MAX_MARKET_BALANCE_ADD_FEE,
            maximize_window_post_fee_cap: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_for_sectors_is_affine() {
        let fee = BatchFeeConfig::new(TokenAmount::ZERO, TokenAmount::from_atto(20_000_000_000));
        assert_eq!(fee.fee_for_sectors(6), TokenAmount::from_atto(120_000_000_000));
        assert_eq!(fee.fee_for_sectors(0), TokenAmount::ZERO);

        let with_base =
            BatchFeeConfig::new(TokenAmount::from_milli_fil(1), TokenAmount::from_milli_fil(2));
        assert_eq!(with_base.fee_for_sectors(3), TokenAmount::from_milli_fil(7));
    }

    #[test]
    fn test_default_batch_caps() {
        let fees = MinerFeeConfig::default();
        assert_eq!(
            fees.max_commit_batch_gas_fee.fee_for_sectors(6),
            TokenAmount::from_milli_fil(180)
        );
        assert_eq!(
            fees.max_pre_commit_batch_gas_fee.fee_for_sectors(256),
            TokenAmount::from_milli_fil(5120)
        );
    }

    #[test]
    fn test_fee_saturates() {
        let fee = BatchFeeConfig::new(TokenAmount::from_atto(1), TokenAmount::from_atto(u128::MAX));
        assert_eq!(fee.fee_for_sectors(u64::MAX), TokenAmount::from_atto(u128::MAX));
    }
}
