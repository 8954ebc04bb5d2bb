use lotus_config_core::config::{ActiveRetrievalPricing, ResourceFilteringStrategy};
use lotus_config_core::loader;
use lotus_config_core::{ConfigError, Duration, StorageMiner, TokenAmount};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_partial_file_keeps_defaults() {
    let toml_content = r#"
[Sealing]
MaxWaitDealsSectors = 4
CommitBatchWait = "12h0m0s"

[Storage]
Assigner = "spread"
"#;

    let temp_file = NamedTempFile::new().unwrap();
    fs::write(temp_file.path(), toml_content).unwrap();

    let config = loader::load_storage_miner(temp_file.path()).unwrap();
    let defaults = StorageMiner::default();

    assert_eq!(config.sealing.max_wait_deals_sectors, 4);
    assert_eq!(config.sealing.commit_batch_wait, Duration::from_hours(12));
    assert_eq!(config.storage.assigner, "spread");

    // Untouched settings, including the miner's own API port
    assert_eq!(config.sealing.commit_batch_slack, defaults.sealing.commit_batch_slack);
    assert_eq!(config.common.api, defaults.common.api);
    assert_eq!(config.dealmaking, defaults.dealmaking);
    assert_eq!(config.fees, defaults.fees);
}

#[test]
fn test_empty_file_equals_defaults() {
    let config = loader::storage_miner_from_toml_str("").unwrap();
    assert_eq!(config, StorageMiner::default());

    let full = loader::full_node_from_toml_str("").unwrap();
    assert_eq!(full, lotus_config_core::FullNode::defaults());
}

#[test]
fn test_strategy_overrides() {
    let config = loader::storage_miner_from_toml_str(
        r#"
[Storage]
ResourceFiltering = "disabled"

[Dealmaking.RetrievalPricing]
Strategy = "external"

[Dealmaking.RetrievalPricing.External]
Path = "/opt/lotus/price.sh"
"#,
    )
    .unwrap();

    assert_eq!(config.storage.resource_filtering, ResourceFilteringStrategy::Disabled);
    match config.dealmaking.retrieval_pricing.active() {
        ActiveRetrievalPricing::External(external) => {
            assert_eq!(external.path, "/opt/lotus/price.sh")
        }
        other => panic!("unexpected active pricing {:?}", other),
    }
    // The inactive block keeps its defaults
    assert!(config.dealmaking.retrieval_pricing.default.verified_deals_free_transfer);
}

#[test]
fn test_unknown_pricing_strategy_rejected() {
    let err = loader::storage_miner_from_toml_str(
        r#"
[Dealmaking.RetrievalPricing]
Strategy = "auction"
"#,
    )
    .unwrap_err();

    assert!(matches!(err, ConfigError::Decode(_)));
    assert!(err.to_string().contains("auction"));
}

#[test]
fn test_unknown_resource_filtering_rejected() {
    let err = loader::storage_miner_from_toml_str(
        r#"
[Storage]
ResourceFiltering = "gpu-only"
"#,
    )
    .unwrap_err();

    assert!(err.to_string().contains("gpu-only"));
}

#[test]
fn test_external_pricing_without_path_rejected() {
    let err = loader::storage_miner_from_toml_str(
        r#"
[Dealmaking.RetrievalPricing]
Strategy = "external"
"#,
    )
    .unwrap_err();

    assert!(matches!(
        err,
        ConfigError::Validation { ref field, .. }
            if field == "Dealmaking.RetrievalPricing.External.Path"
    ));
}

#[test]
fn test_batch_invariants_enforced_on_load() {
    let err = loader::storage_miner_from_toml_str(
        r#"
[Sealing]
MinCommitBatch = 50
MaxCommitBatch = 10
"#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Validation { .. }));

    let err = loader::storage_miner_from_toml_str(
        r#"
[Sealing]
CommitBatchSlack = "30h0m0s"
"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("CommitBatchSlack"));
}

#[test]
fn test_huge_sealing_buffer_rejected_from_toml() {
    for epochs in ["400000000", "9223372036854775807"] {
        let text = format!("[Dealmaking]\nStartEpochSealingBuffer = {}\n", epochs);
        let err = loader::storage_miner_from_toml_str(&text).unwrap_err();
        assert!(
            matches!(
                err,
                ConfigError::Validation { ref field, .. }
                    if field == "Dealmaking.StartEpochSealingBuffer"
            ),
            "{} epochs gave {:?}",
            epochs,
            err
        );
    }
}

#[test]
fn test_huge_sealing_buffer_rejected_from_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    fs::write(
        &path,
        r#"{ "Dealmaking": { "StartEpochSealingBuffer": 18446744073709551615 } }"#,
    )
    .unwrap();

    let err = loader::load_storage_miner(&path).unwrap_err();
    assert!(err.to_string().contains("Dealmaking.StartEpochSealingBuffer"));
}

#[test]
fn test_calendar_duration_units_rejected() {
    for span in ["1month", "2days", "1h 30m"] {
        let text = format!("[Sealing]\nCommitBatchWait = \"{}\"\n", span);
        let err = loader::storage_miner_from_toml_str(&text).unwrap_err();
        assert!(matches!(err, ConfigError::Decode(_)), "{:?} gave {:?}", span, err);
    }
}

#[test]
fn test_malformed_values_rejected() {
    let bad_duration = loader::storage_miner_from_toml_str(
        r#"
[Sealing]
WaitDealsDelay = "6 fortnights"
"#,
    );
    assert!(bad_duration.is_err());

    let bad_amount = loader::storage_miner_from_toml_str(
        r#"
[Fees]
MaxCommitGasFee = "-1 FIL"
"#,
    );
    assert!(bad_amount.is_err());
}

#[test]
fn test_token_amount_units_on_load() {
    let config = loader::storage_miner_from_toml_str(
        r#"
[Fees.MaxCommitBatchGasFee]
Base = "1 mFIL"
PerSector = "0.04"
"#,
    )
    .unwrap();

    let fee = config.fees.max_commit_batch_gas_fee;
    assert_eq!(fee.base, TokenAmount::from_milli_fil(1));
    assert_eq!(fee.per_sector, TokenAmount::from_milli_fil(40));
    assert_eq!(fee.fee_for_sectors(10), TokenAmount::from_milli_fil(401));
}

#[test]
fn test_json_file_by_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    fs::write(
        &path,
        r#"{
            "Cluster": { "CommitRetries": 3, "InitPeersetMultiAddr": ["/ip4/10.0.0.1/tcp/4001"] }
        }"#,
    )
    .unwrap();

    let config = loader::load_full_node(&path).unwrap();
    assert_eq!(config.cluster.commit_retries, 3);
    assert_eq!(config.cluster.init_peerset_multi_addr, vec!["/ip4/10.0.0.1/tcp/4001".to_string()]);
    assert_eq!(config.cluster.network_timeout, Duration::from_secs(100));
}

#[test]
fn test_user_raft_overrides() {
    let config = loader::user_raft_from_toml_str(
        r#"
DataFolder = "/var/lib/lotus/raft"
WaitForLeaderTimeout = "30s"
"#,
    )
    .unwrap();
    assert_eq!(config.data_folder, "/var/lib/lotus/raft");
    assert_eq!(config.wait_for_leader_timeout, Duration::from_secs(30));

    let err = loader::user_raft_from_toml_str("CommitRetries = -1").unwrap_err();
    assert!(matches!(err, ConfigError::Validation { .. }));
}

#[test]
fn test_missing_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.toml");
    let err = loader::load_storage_miner(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFile { .. }));
    assert!(err.to_string().contains("missing.toml"));
}

#[test]
fn test_invalid_toml_rejected() {
    let err = loader::storage_miner_from_toml_str("[Sealing\nMaxWaitDealsSectors = 4").unwrap_err();
    assert!(matches!(err, ConfigError::TomlParse(_)));
}

#[test]
fn test_rendered_defaults_load_back() {
    let defaults = StorageMiner::default();
    let text = loader::to_toml_string(&defaults).unwrap();
    let loaded = loader::storage_miner_from_toml_str(&text).unwrap();
    assert_eq!(loaded, defaults);
}
