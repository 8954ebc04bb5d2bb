//! Deal acceptance, transfer limits and retrieval pricing

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::defaults::*;
use crate::duration::Duration;
use crate::error::{ConfigError, ConfigResult};
use crate::policy::ProtocolPolicy;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DealmakingConfig {
    pub consider_online_storage_deals: bool,
    pub consider_offline_storage_deals: bool,
    pub consider_online_retrieval_deals: bool,
    pub consider_offline_retrieval_deals: bool,
    pub consider_verified_storage_deals: bool,
    pub consider_unverified_storage_deals: bool,

    /// Piece CIDs this provider refuses to store
    pub piece_cid_blocklist: Vec<String>,

    /// Reject deals whose start epoch is further out than this
    pub max_deal_start_delay: Duration,

    /// Expected time from deal acceptance to a sealed sector
    pub expected_seal_duration: Duration,

    /// Collect deals for this long before publishing them together
    pub publish_msg_period: Duration,

    pub max_deals_per_publish_msg: u64,
    pub max_provider_collateral_multiplier: u64,

    pub simultaneous_transfers_for_storage: u64,

    /// Per-client cap on storage transfers; 0 means no per-client cap
    pub simultaneous_transfers_for_storage_per_client: u64,

    pub simultaneous_transfers_for_retrieval: u64,

    /// Epochs reserved between adding a deal to a sector and the deal's
    /// start epoch
    pub start_epoch_sealing_buffer: u64,

    pub retrieval_pricing: RetrievalPricing,
}

impl Default for DealmakingConfig {
    fn default() -> Self {
        Self {
            consider_online_storage_deals: true,
            consider_offline_storage_deals: true,
            consider_online_retrieval_deals: true,
            consider_offline_retrieval_deals: true,
            consider_verified_storage_deals: true,
            consider_unverified_storage_deals: true,
            piece_cid_blocklist: Vec::new(),
            max_deal_start_delay: DEFAULT_MAX_DEAL_START_DELAY,
            expected_seal_duration: DEFAULT_EXPECTED_SEAL_DURATION,
            publish_msg_period: DEFAULT_PUBLISH_MSG_PERIOD,
            max_deals_per_publish_msg: DEFAULT_MAX_DEALS_PER_PUBLISH_MSG,
            max_provider_collateral_multiplier: DEFAULT_MAX_PROVIDER_COLLATERAL_MULTIPLIER,
            simultaneous_transfers_for_storage: DEFAULT_SIMULTANEOUS_TRANSFERS,
            simultaneous_transfers_for_storage_per_client: 0,
            simultaneous_transfers_for_retrieval: DEFAULT_SIMULTANEOUS_TRANSFERS,
            start_epoch_sealing_buffer: DEFAULT_START_EPOCH_SEALING_BUFFER,
            retrieval_pricing: RetrievalPricing::default(),
        }
    }
}

impl DealmakingConfig {
    pub fn validate(&self, policy: &dyn ProtocolPolicy) -> ConfigResult<()> {
        let buffer = i64::try_from(self.start_epoch_sealing_buffer)
            .ok()
            .and_then(|epochs| policy.epochs_to_duration(epochs))
            .ok_or_else(|| {
                ConfigError::validation(
                    "Dealmaking.StartEpochSealingBuffer",
                    format!("{} epochs is out of range", self.start_epoch_sealing_buffer),
                )
            })?;
        if buffer >= self.expected_seal_duration {
            return Err(ConfigError::validation(
                "Dealmaking.StartEpochSealingBuffer",
                format!(
                    "{} epochs ({}) must be shorter than ExpectedSealDuration {}",
                    self.start_epoch_sealing_buffer, buffer, self.expected_seal_duration
                ),
            ));
        }

        if self.max_deal_start_delay < self.expected_seal_duration {
            return Err(ConfigError::validation(
                "Dealmaking.MaxDealStartDelay",
                "must not be shorter than ExpectedSealDuration",
            ));
        }

        if !self.publish_msg_period.is_positive() {
            return Err(ConfigError::validation("Dealmaking.PublishMsgPeriod", "must be positive"));
        }

        if self.max_deals_per_publish_msg == 0 {
            return Err(ConfigError::validation(
                "Dealmaking.MaxDealsPerPublishMsg",
                "must be at least 1",
            ));
        }

        self.retrieval_pricing.validate()
    }
}

/// Pricing mode tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RetrievalPricingStrategy {
    #[default]
    Default,
    External,
}

impl RetrievalPricingStrategy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            RetrievalPricingStrategy::Default => "default",
            RetrievalPricingStrategy::External => "external",
        }
    }
}

impl fmt::Display for RetrievalPricingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RetrievalPricingStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(RetrievalPricingStrategy::Default),
            "external" => Ok(RetrievalPricingStrategy::External),
            other => Err(ConfigError::UnknownRetrievalPricingStrategy(other.to_string())),
        }
    }
}

impl Serialize for RetrievalPricingStrategy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RetrievalPricingStrategy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct StrategyVisitor;

        impl<'de> Visitor<'de> for StrategyVisitor {
            type Value = RetrievalPricingStrategy;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("\"default\" or \"external\"")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                value.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(StrategyVisitor)
    }
}

/// Built-in pricing rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct RetrievalPricingDefault {
    /// Serve verified deal data without a transfer charge
    pub verified_deals_free_transfer: bool,
}

impl Default for RetrievalPricingDefault {
    fn default() -> Self {
        Self {
            verified_deals_free_transfer: true,
        }
    }
}

/// Pricing delegated to an operator-supplied script
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct RetrievalPricingExternal {
    /// Script invoked for each pricing decision; not checked for existence
    pub path: String,
}

/// Retrieval pricing settings
///
/// Both parameter blocks are always present and keep their values across
/// strategy changes; `strategy` alone decides which one is in force. Read
/// the active rule through [`RetrievalPricing::active`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct RetrievalPricing {
    pub strategy: RetrievalPricingStrategy,
    pub default: RetrievalPricingDefault,
    pub external: RetrievalPricingExternal,
}

/// The pricing rule currently in force
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveRetrievalPricing<'a> {
    Default(&'a RetrievalPricingDefault),
    External(&'a RetrievalPricingExternal),
}

impl RetrievalPricing {
    pub fn active(&self) -> ActiveRetrievalPricing<'_> {
        match self.strategy {
            RetrievalPricingStrategy::Default => ActiveRetrievalPricing::Default(&self.default),
            RetrievalPricingStrategy::External => ActiveRetrievalPricing::External(&self.external),
        }
    }

    pub fn set_strategy(&mut self, strategy: RetrievalPricingStrategy) {
        self.strategy = strategy;
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if let ActiveRetrievalPricing::External(external) = self.active() {
            if external.path.trim().is_empty() {
                return Err(ConfigError::validation(
                    "Dealmaking.RetrievalPricing.External.Path",
                    "required when Strategy is \"external\"",
                ));
            }
        }
        Ok(())
    }
}
