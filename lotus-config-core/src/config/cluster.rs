//! Consensus-cluster follower tuning

use serde::{Deserialize, Serialize};

use super::defaults::*;
use crate::duration::Duration;
use crate::error::{ConfigError, ConfigResult};

/// User-facing raft settings for a node following a consensus cluster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct UserRaftConfig {
    /// Raft state directory; empty means `<repo>/raft`
    pub data_folder: String,

    /// Peers to bootstrap the cluster with, in order
    pub init_peerset_multi_addr: Vec<String>,

    /// How long to wait for a leader before failing
    pub wait_for_leader_timeout: Duration,

    /// Timeout for network operations between peers
    pub network_timeout: Duration,

    /// Retries when committing an entry fails
    pub commit_retries: i64,

    /// Pause between commit retries
    pub commit_retry_delay: Duration,

    /// Number of state backups kept on disk
    pub backups_rotate: i64,
}

impl UserRaftConfig {
    /// Defaults for a cluster follower
    pub fn defaults() -> Self {
        Self {
            data_folder: String::new(),
            init_peerset_multi_addr: Vec::new(),
            wait_for_leader_timeout: DEFAULT_WAIT_FOR_LEADER_TIMEOUT,
            network_timeout: DEFAULT_NETWORK_TIMEOUT,
            commit_retries: DEFAULT_COMMIT_RETRIES,
            commit_retry_delay: DEFAULT_COMMIT_RETRY_DELAY,
            backups_rotate: DEFAULT_BACKUPS_ROTATE,
        }
    }

    /// Directory holding raft state, resolved against the node repo
    pub fn data_path(&self, repo: &std::path::Path) -> std::path::PathBuf {
        if self.data_folder.is_empty() {
            repo.join(DEFAULT_RAFT_DATA_SUB_FOLDER)
        } else {
            std::path::PathBuf::from(&self.data_folder)
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if !self.wait_for_leader_timeout.is_positive() {
            return Err(ConfigError::validation(
                "Cluster.WaitForLeaderTimeout",
                "must be positive",
            ));
        }

        if !self.network_timeout.is_positive() {
            return Err(ConfigError::validation("Cluster.NetworkTimeout", "must be positive"));
        }

        if self.commit_retries < 0 {
            return Err(ConfigError::validation("Cluster.CommitRetries", "must not be negative"));
        }

        if self.commit_retry_delay.is_negative() {
            return Err(ConfigError::validation("Cluster.CommitRetryDelay", "must not be negative"));
        }

        if self.backups_rotate < 0 {
            return Err(ConfigError::validation("Cluster.BackupsRotate", "must not be negative"));
        }

        Ok(())
    }
}

impl Default for UserRaftConfig {
    fn default() -> Self {
        Self::defaults()
    }
}
