//! Local sector storage and worker task assignment

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::defaults::*;
use crate::error::{ConfigError, ConfigResult};

/// Whether the scheduler checks worker hardware before assigning tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResourceFilteringStrategy {
    /// Evaluate CPU, RAM, GPU and disk availability before dispatch
    #[default]
    Hardware,
    /// Dispatch any task to this worker
    Disabled,
}

impl ResourceFilteringStrategy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ResourceFilteringStrategy::Hardware => "hardware",
            ResourceFilteringStrategy::Disabled => "disabled",
        }
    }
}

impl fmt::Display for ResourceFilteringStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceFilteringStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hardware" => Ok(ResourceFilteringStrategy::Hardware),
            "disabled" => Ok(ResourceFilteringStrategy::Disabled),
            other => Err(ConfigError::UnknownResourceFilteringStrategy(other.to_string())),
        }
    }
}

impl Serialize for ResourceFilteringStrategy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ResourceFilteringStrategy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct StrategyVisitor;

        impl<'de> Visitor<'de> for StrategyVisitor {
            type Value = ResourceFilteringStrategy;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("\"hardware\" or \"disabled\"")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                value.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(StrategyVisitor)
    }
}

/// Which sealing tasks this node runs itself and how it hands out the rest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct SealerConfig {
    pub allow_sector_download: bool,
    pub allow_add_piece: bool,
    pub allow_pre_commit1: bool,
    pub allow_pre_commit2: bool,
    pub allow_commit: bool,
    pub allow_unseal: bool,
    pub allow_replica_update: bool,
    pub allow_prove_replica_update2: bool,
    pub allow_regen_sector_key: bool,

    /// Concurrent sector fetches from workers
    pub parallel_fetch_limit: u64,

    /// Task assigner: "utilization" or "spread"
    pub assigner: String,

    pub resource_filtering: ResourceFilteringStrategy,
}

const KNOWN_ASSIGNERS: &[&str] = &["utilization", "spread"];

impl Default for SealerConfig {
    fn default() -> Self {
        Self {
            allow_sector_download: true,
            allow_add_piece: true,
            allow_pre_commit1: true,
            allow_pre_commit2: true,
            allow_commit: true,
            allow_unseal: true,
            allow_replica_update: true,
            allow_prove_replica_update2: true,
            allow_regen_sector_key: true,
            parallel_fetch_limit: DEFAULT_PARALLEL_FETCH_LIMIT,
            assigner: DEFAULT_ASSIGNER.to_string(),
            resource_filtering: ResourceFilteringStrategy::Hardware,
        }
    }
}

impl SealerConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.parallel_fetch_limit == 0 {
            return Err(ConfigError::validation("Storage.ParallelFetchLimit", "must be at least 1"));
        }

        if !KNOWN_ASSIGNERS.contains(&self.assigner.as_str()) {
            return Err(ConfigError::validation(
                "Storage.Assigner",
                format!("unknown assigner '{}'", self.assigner),
            ));
        }

        Ok(())
    }
}
