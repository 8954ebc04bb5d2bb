use lotus_config_core::config::{
    ActiveRetrievalPricing, DagStoreConfig, MinerFeeConfig, ResourceFilteringStrategy,
    RetrievalPricingStrategy,
};
use lotus_config_core::policy::{MainnetPolicy, NetworkVersion, ProtocolPolicy};
use lotus_config_core::{Duration, FullNode, StorageMiner, TokenAmount, UserRaftConfig};
use pretty_assertions::assert_eq;

fn miner() -> StorageMiner {
    StorageMiner::defaults(&MainnetPolicy, NetworkVersion::V20).unwrap()
}

#[test]
fn test_builders_are_deterministic() {
    assert_eq!(FullNode::defaults(), FullNode::defaults());
    assert_eq!(miner(), miner());
    assert_eq!(UserRaftConfig::defaults(), UserRaftConfig::defaults());
    assert_eq!(StorageMiner::default(), miner());
}

#[test]
fn test_commit_batch_bounds() {
    let config = miner();
    assert!(config.sealing.min_commit_batch <= config.sealing.max_commit_batch);
    assert_eq!(config.sealing.max_commit_batch, MainnetPolicy.max_aggregated_sectors());
    assert!(config.sealing.commit_batch_slack < config.sealing.commit_batch_wait);
}

#[test]
fn test_cc_lifetime_is_epoch_duration_times_extension() {
    let config = miner();
    let extension = MainnetPolicy
        .max_sector_expiration_extension(NetworkVersion::V20)
        .unwrap();
    assert_eq!(
        config.sealing.committed_capacity_sector_lifetime,
        Duration::from_secs(30 * extension)
    );
}

#[test]
fn test_retrieval_pricing_defaults() {
    let pricing = miner().dealmaking.retrieval_pricing;
    assert_eq!(pricing.strategy, RetrievalPricingStrategy::Default);
    match pricing.active() {
        ActiveRetrievalPricing::Default(rule) => assert!(rule.verified_deals_free_transfer),
        other => panic!("unexpected active pricing {:?}", other),
    }
}

#[test]
fn test_miner_sub_tree_defaults() {
    let config = miner();
    assert_eq!(config.storage.resource_filtering, ResourceFilteringStrategy::Hardware);
    assert_eq!(config.dag_store, DagStoreConfig::default());
    assert_eq!(config.fees, MinerFeeConfig::default());
    assert_eq!(config.fees.max_window_post_gas_fee, TokenAmount::from_whole_fil(5));
    assert_eq!(config.dealmaking.max_deal_start_delay, Duration::from_hours(336));
    assert!(config.index_provider.enable);
    assert!(config.addresses.pre_commit_control.is_empty());
}

#[test]
fn test_builder_durations_round_trip() {
    let config = miner();
    let spans = [
        config.common.api.timeout,
        config.common.libp2p.conn_mgr_grace,
        config.sealing.wait_deals_delay,
        config.sealing.pre_commit_batch_wait,
        config.sealing.pre_commit_batch_slack,
        config.sealing.committed_capacity_sector_lifetime,
        config.sealing.commit_batch_wait,
        config.sealing.commit_batch_slack,
        config.sealing.terminate_batch_wait,
        config.proving.partition_check_timeout,
        config.proving.single_check_timeout,
        config.dealmaking.max_deal_start_delay,
        config.dealmaking.expected_seal_duration,
        config.dealmaking.publish_msg_period,
        config.dag_store.gc_interval,
    ];

    let raft = UserRaftConfig::defaults();
    let full = FullNode::defaults();
    let more = [
        raft.wait_for_leader_timeout,
        raft.network_timeout,
        raft.commit_retry_delay,
        full.fevm.events.filter_ttl,
    ];

    for span in spans.iter().chain(more.iter()) {
        let text = span.to_string();
        assert_eq!(Duration::parse(&text).unwrap(), *span, "round trip of {}", text);
    }
}

#[test]
fn test_canonical_duration_text() {
    assert_eq!(Duration::from_hours(24).to_string(), "24h0m0s");
    assert_eq!(Duration::from_secs(100).to_string(), "1m40s");
    assert_eq!(Duration::from_millis(200).to_string(), "200ms");
}

#[test]
fn test_role_defaults_validate() {
    assert!(FullNode::defaults().validate().is_ok());
    assert!(miner().validate(&MainnetPolicy).is_ok());
    assert!(UserRaftConfig::defaults().validate().is_ok());

    let nv21 = StorageMiner::defaults(&MainnetPolicy, NetworkVersion::V21).unwrap();
    assert!(nv21.validate(&MainnetPolicy).is_ok());
}

#[test]
fn test_miner_serializes_with_node_keys() {
    let text = toml::to_string(&miner()).unwrap();
    assert!(text.contains("[API]"));
    assert!(text.contains("[DAGStore]"));
    assert!(text.contains("GCInterval = \"1m0s\""));
    assert!(text.contains("[Dealmaking.RetrievalPricing]"));
    assert!(text.contains("Strategy = \"default\""));
    assert!(text.contains("ResourceFiltering = \"hardware\""));
    assert!(text.contains("MaxWindowPoStGasFee = \"5 FIL\""));
}

#[test]
fn test_full_node_serializes_cluster_block() {
    let text = toml::to_string(&FullNode::defaults()).unwrap();
    assert!(text.contains("[Cluster]"));
    assert!(text.contains("WaitForLeaderTimeout = \"15s\""));
    assert!(text.contains("DefaultMaxFee = \"0.07 FIL\""));
}
