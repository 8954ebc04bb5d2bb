//! Default configuration values
//!
//! Literal defaults live here so they are easy to find and tune. Values that
//! depend on protocol policy (aggregation ceilings, sector lifetime) are
//! resolved by the role builders instead.

use crate::duration::Duration;
use crate::token::TokenAmount;

// API
pub const DEFAULT_FULL_NODE_API_LISTEN_ADDRESS: &str = "/ip4/127.0.0.1/tcp/1234/http";
pub const DEFAULT_MINER_API_LISTEN_ADDRESS: &str = "/ip4/127.0.0.1/tcp/2345/http";
pub const DEFAULT_MINER_REMOTE_LISTEN_ADDRESS: &str = "127.0.0.1:2345";
pub const DEFAULT_API_TIMEOUT: Duration = Duration::from_secs(30);

// Libp2p
pub const DEFAULT_LISTEN_ADDRESSES: &[&str] = &[
    "/ip4/0.0.0.0/tcp/0",
    "/ip6/::/tcp/0",
    "/ip4/0.0.0.0/udp/0/quic-v1",
    "/ip6/::/udp/0/quic-v1",
    "/ip4/0.0.0.0/udp/0/quic-v1/webtransport",
    "/ip6/::/udp/0/quic-v1/webtransport",
];
pub const DEFAULT_CONN_MGR_LOW: u64 = 150;
pub const DEFAULT_CONN_MGR_HIGH: u64 = 180;
pub const DEFAULT_CONN_MGR_GRACE: Duration = Duration::from_secs(20);

// Full node
pub const DEFAULT_MAX_FEE: TokenAmount = TokenAmount::from_milli_fil(70);
pub const DEFAULT_SIMULTANEOUS_TRANSFERS: u64 = 20;
pub const DEFAULT_HOT_STORE_MAX_SPACE_TARGET: u64 = 650_000_000_000;
pub const DEFAULT_HOT_STORE_MAX_SPACE_THRESHOLD: u64 = 150_000_000_000;
pub const DEFAULT_HOT_STORE_MAX_SPACE_SAFETY_BUFFER: u64 = 50_000_000_000;
pub const DEFAULT_FILTER_TTL: Duration = Duration::from_hours(24);
pub const DEFAULT_MAX_FILTER_HEIGHT_RANGE: u64 = 2880; // one day of epochs

// Cluster follower
pub const DEFAULT_RAFT_DATA_SUB_FOLDER: &str = "raft";
pub const DEFAULT_WAIT_FOR_LEADER_TIMEOUT: Duration = Duration::from_secs(15);
pub const DEFAULT_NETWORK_TIMEOUT: Duration = Duration::from_secs(100);
pub const DEFAULT_COMMIT_RETRIES: i64 = 1;
pub const DEFAULT_COMMIT_RETRY_DELAY: Duration = Duration::from_millis(200);
pub const DEFAULT_BACKUPS_ROTATE: i64 = 6;

// Sealing
pub const DEFAULT_MAX_WAIT_DEALS_SECTORS: u64 = 2; // 64G with 32G sectors
pub const DEFAULT_WAIT_DEALS_DELAY: Duration = Duration::from_hours(6);
pub const DEFAULT_PRE_COMMIT_BATCH_WAIT: Duration = Duration::from_hours(24);
pub const DEFAULT_PRE_COMMIT_BATCH_SLACK: Duration = Duration::from_hours(3);
pub const DEFAULT_COMMIT_BATCH_WAIT: Duration = Duration::from_hours(24);
pub const DEFAULT_COMMIT_BATCH_SLACK: Duration = Duration::from_hours(1);
pub const DEFAULT_BATCH_ABOVE_BASE_FEE: TokenAmount = TokenAmount::from_pico_fil(320);
pub const DEFAULT_TERMINATE_BATCH_MIN: u64 = 1;
pub const DEFAULT_TERMINATE_BATCH_MAX: u64 = 100;
pub const DEFAULT_TERMINATE_BATCH_WAIT: Duration = Duration::from_mins(5);
pub const DEFAULT_MAX_PROVE_COMMITS_PER_EPOCH: u64 = 20;

// Proving
pub const DEFAULT_PARALLEL_CHECK_LIMIT: u64 = 32;
pub const DEFAULT_PARTITION_CHECK_TIMEOUT: Duration = Duration::from_mins(20);
pub const DEFAULT_SINGLE_CHECK_TIMEOUT: Duration = Duration::from_mins(10);

// Sector storage; 10gbit / 1gbit
pub const DEFAULT_PARALLEL_FETCH_LIMIT: u64 = 10;
pub const DEFAULT_ASSIGNER: &str = "utilization";

// Dealmaking
pub const DEFAULT_MAX_DEAL_START_DELAY: Duration = Duration::from_hours(24 * 14);
pub const DEFAULT_EXPECTED_SEAL_DURATION: Duration = Duration::from_hours(24);
pub const DEFAULT_PUBLISH_MSG_PERIOD: Duration = Duration::from_hours(1);
pub const DEFAULT_MAX_DEALS_PER_PUBLISH_MSG: u64 = 8;
pub const DEFAULT_MAX_PROVIDER_COLLATERAL_MULTIPLIER: u64 = 2;
pub const DEFAULT_START_EPOCH_SEALING_BUFFER: u64 = 480; // 4 hours of epochs

// Index provider
pub const DEFAULT_ENTRIES_CACHE_CAPACITY: u64 = 1024;
pub const DEFAULT_ENTRIES_CHUNK_SIZE: u64 = 16384;

// DAG store
pub const DEFAULT_MAX_CONCURRENT_INDEX: u64 = 5;
pub const DEFAULT_MAX_CONCURRENCY_STORAGE_CALLS: u64 = 100;
pub const DEFAULT_MAX_CONCURRENT_UNSEALS: u64 = 5;
pub const DEFAULT_DAG_STORE_GC_INTERVAL: Duration = Duration::from_mins(1);

// Miner fee caps
pub const DEFAULT_MAX_PRE_COMMIT_GAS_FEE: TokenAmount = TokenAmount::from_milli_fil(25);
pub const DEFAULT_MAX_COMMIT_GAS_FEE: TokenAmount = TokenAmount::from_milli_fil(50);
pub const DEFAULT_PRE_COMMIT_BATCH_FEE_PER_SECTOR: TokenAmount = TokenAmount::from_milli_fil(20);
// Enough for 6 aggregated sectors at a 1 nFIL base fee
pub const DEFAULT_COMMIT_BATCH_FEE_PER_SECTOR: TokenAmount = TokenAmount::from_milli_fil(30);
pub const DEFAULT_MAX_TERMINATE_GAS_FEE: TokenAmount = TokenAmount::from_milli_fil(500);
pub const DEFAULT_MAX_WINDOW_POST_GAS_FEE: TokenAmount = TokenAmount::from_whole_fil(5);
pub const DEFAULT_MAX_PUBLISH_DEALS_FEE: TokenAmount = TokenAmount::from_milli_fil(50);
pub const DEFAULT_MAX_MARKET_BALANCE_ADD_FEE: TokenAmount = TokenAmount::from_milli_fil(7);

/// Owned copy of a static string list
pub(crate) fn string_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
