//! Overlay user configuration files onto role defaults
//!
//! A user file only lists the settings it changes. The role's default tree is
//! converted to a generic value, the file is merged into it table by table
//! (scalars and lists replace, tables recurse), and the merged value is
//! decoded back into the typed tree and validated.
//!
//! Files ending in `.json` are read as JSON, everything else as TOML.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::config::{FullNode, StorageMiner, UserRaftConfig};
use crate::error::{ConfigError, ConfigResult};
use crate::policy::{
    MainnetPolicy, NetworkVersion, ProtocolPolicy, DEFAULT_CC_LIFETIME_NETWORK_VERSION,
};

/// Tables whose keys are user-chosen names rather than fixed settings
const FREE_FORM_TABLES: &[&str] = &["Logging.SubsystemLevels"];

/// On-disk encoding of an override file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideFormat {
    Toml,
    Json,
}

impl OverrideFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => OverrideFormat::Json,
            _ => OverrideFormat::Toml,
        }
    }
}

/// Parse override text into a generic value tree
pub fn parse_overrides(text: &str, format: OverrideFormat) -> ConfigResult<Value> {
    let value = match format {
        OverrideFormat::Toml => toml::from_str::<Value>(text)?,
        OverrideFormat::Json => serde_json::from_str::<Value>(text)?,
    };

    if !value.is_object() {
        return Err(ConfigError::Decode(
            "configuration root must be a table".to_string(),
        ));
    }

    Ok(value)
}

/// Read and parse an override file, picking the format from its extension
pub fn read_overrides(path: &Path) -> ConfigResult<Value> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    parse_overrides(&text, OverrideFormat::from_path(path))
}

/// Merge `overlay` into `base`, returning the dotted paths of keys that
/// `base` did not already have
pub fn merge_values(base: &mut Value, overlay: Value) -> Vec<String> {
    let mut unknown = Vec::new();
    merge_at(base, overlay, "", &mut unknown);
    unknown
}

fn merge_at(base: &mut Value, overlay: Value, prefix: &str, unknown: &mut Vec<String>) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            let free_form = FREE_FORM_TABLES.contains(&prefix);
            for (key, value) in overlay_map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };

                match base_map.get_mut(&key) {
                    Some(slot) => merge_at(slot, value, &path, unknown),
                    None => {
                        if !free_form {
                            unknown.push(path);
                        }
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

/// Apply `overrides` on top of `defaults` and decode the result
pub fn overlay<T>(defaults: &T, overrides: Value) -> ConfigResult<T>
where
    T: Serialize + DeserializeOwned,
{
    let mut merged = serde_json::to_value(defaults)?;

    for key in merge_values(&mut merged, overrides) {
        warn!(key = %key, "Ignoring unrecognized configuration key");
    }

    serde_json::from_value(merged).map_err(|e| ConfigError::Decode(e.to_string()))
}

/// Storage-miner config from `path`, using mainnet policy at the default
/// network version
pub fn load_storage_miner(path: impl AsRef<Path>) -> ConfigResult<StorageMiner> {
    load_storage_miner_with_policy(path, &MainnetPolicy, DEFAULT_CC_LIFETIME_NETWORK_VERSION)
}

pub fn load_storage_miner_with_policy(
    path: impl AsRef<Path>,
    policy: &dyn ProtocolPolicy,
    version: NetworkVersion,
) -> ConfigResult<StorageMiner> {
    let path = path.as_ref();
    info!(path = %path.display(), "Loading storage miner configuration");
    let overrides = read_overrides(path)?;
    storage_miner_from_value(overrides, policy, version)
}

pub fn storage_miner_from_toml_str(text: &str) -> ConfigResult<StorageMiner> {
    let overrides = parse_overrides(text, OverrideFormat::Toml)?;
    storage_miner_from_value(overrides, &MainnetPolicy, DEFAULT_CC_LIFETIME_NETWORK_VERSION)
}

fn storage_miner_from_value(
    overrides: Value,
    policy: &dyn ProtocolPolicy,
    version: NetworkVersion,
) -> ConfigResult<StorageMiner> {
    let defaults = StorageMiner::defaults(policy, version)?;
    let config = overlay(&defaults, overrides)?;
    config.validate(policy)?;
    debug!("Storage miner configuration validated");
    Ok(config)
}

pub fn load_full_node(path: impl AsRef<Path>) -> ConfigResult<FullNode> {
    let path = path.as_ref();
    info!(path = %path.display(), "Loading full node configuration");
    let overrides = read_overrides(path)?;
    full_node_from_value(overrides)
}

pub fn full_node_from_toml_str(text: &str) -> ConfigResult<FullNode> {
    full_node_from_value(parse_overrides(text, OverrideFormat::Toml)?)
}

fn full_node_from_value(overrides: Value) -> ConfigResult<FullNode> {
    let config = overlay(&FullNode::defaults(), overrides)?;
    config.validate()?;
    debug!("Full node configuration validated");
    Ok(config)
}

pub fn load_user_raft(path: impl AsRef<Path>) -> ConfigResult<UserRaftConfig> {
    let path = path.as_ref();
    info!(path = %path.display(), "Loading cluster follower configuration");
    let overrides = read_overrides(path)?;
    user_raft_from_value(overrides)
}

pub fn user_raft_from_toml_str(text: &str) -> ConfigResult<UserRaftConfig> {
    user_raft_from_value(parse_overrides(text, OverrideFormat::Toml)?)
}

fn user_raft_from_value(overrides: Value) -> ConfigResult<UserRaftConfig> {
    let config = overlay(&UserRaftConfig::defaults(), overrides)?;
    config.validate()?;
    Ok(config)
}

/// Render a configuration tree as TOML
pub fn to_toml_string<T: Serialize>(config: &T) -> ConfigResult<String> {
    Ok(toml::to_string_pretty(config)?)
}

/// Render a configuration tree as pretty JSON
pub fn to_json_string<T: Serialize>(config: &T) -> ConfigResult<String> {
    Ok(serde_json::to_string_pretty(config)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_replaces_scalars_and_recurses_tables() {
        let mut base = json!({
            "Sealing": { "MaxWaitDealsSectors": 2, "WaitDealsDelay": "6h0m0s" },
            "Libp2p": { "ListenAddresses": ["/ip4/0.0.0.0/tcp/0", "/ip6/::/tcp/0"] }
        });
        let overlay = json!({
            "Sealing": { "MaxWaitDealsSectors": 8 },
            "Libp2p": { "ListenAddresses": ["/ip4/10.0.0.1/tcp/24001"] }
        });

        let unknown = merge_values(&mut base, overlay);

        assert!(unknown.is_empty());
        assert_eq!(base["Sealing"]["MaxWaitDealsSectors"], 8);
        assert_eq!(base["Sealing"]["WaitDealsDelay"], "6h0m0s");
        assert_eq!(base["Libp2p"]["ListenAddresses"], json!(["/ip4/10.0.0.1/tcp/24001"]));
    }

    #[test]
    fn test_merge_reports_unknown_keys() {
        let mut base = json!({ "Sealing": { "MaxWaitDealsSectors": 2 } });
        let overlay = json!({ "Sealing": { "MaxWaitDeals": 4 }, "Bogus": 1 });
        let mut unknown = merge_values(&mut base, overlay);
        unknown.sort();
        assert_eq!(unknown, vec!["Bogus".to_string(), "Sealing.MaxWaitDeals".to_string()]);
        assert_eq!(base["Bogus"], 1);
    }

    #[test]
    fn test_free_form_tables_accept_new_keys() {
        let mut base = json!({ "Logging": { "SubsystemLevels": { "example-subsystem": "INFO" } } });
        let unknown = merge_values(
            &mut base,
            json!({ "Logging": { "SubsystemLevels": { "chain": "WARN" } } }),
        );
        assert!(unknown.is_empty());
        assert_eq!(base["Logging"]["SubsystemLevels"]["example-subsystem"], "INFO");
        assert_eq!(base["Logging"]["SubsystemLevels"]["chain"], "WARN");
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(OverrideFormat::from_path(Path::new("config.json")), OverrideFormat::Json);
        assert_eq!(OverrideFormat::from_path(Path::new("config.toml")), OverrideFormat::Toml);
        assert_eq!(OverrideFormat::from_path(Path::new("config")), OverrideFormat::Toml);
    }

    #[test]
    fn test_non_table_root_rejected() {
        assert!(parse_overrides("[1, 2]", OverrideFormat::Json).is_err());
    }
}
