//! DAG traversal link budget
//!
//! Bounds how many links are followed while computing piece commitments or
//! serving graphsync traversals. Read once from the environment at process
//! bootstrap and passed by value to the components that traverse DAGs.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Environment variable overriding the traversal budget
pub const MAX_TRAVERSAL_LINKS_ENV: &str = "LOTUS_MAX_TRAVERSAL_LINKS";

/// Built-in budget: 32Mi links
pub const DEFAULT_MAX_TRAVERSAL_LINKS: u64 = 32 * (1 << 20);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalBudget {
    max_links: u64,
}

impl Default for TraversalBudget {
    fn default() -> Self {
        Self {
            max_links: DEFAULT_MAX_TRAVERSAL_LINKS,
        }
    }
}

impl TraversalBudget {
    pub const fn new(max_links: u64) -> Self {
        Self { max_links }
    }

    pub const fn max_links(&self) -> u64 {
        self.max_links
    }

    /// Budget from `LOTUS_MAX_TRAVERSAL_LINKS`, falling back to the default
    /// when the variable is absent or not an unsigned 64-bit integer
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(MAX_TRAVERSAL_LINKS_ENV).ok().as_deref())
    }

    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            None => Self::default(),
            Some(raw) => match parse_link_count(raw) {
                Ok(max_links) => {
                    debug!(
                        max_links,
                        "Traversal budget overridden from {}", MAX_TRAVERSAL_LINKS_ENV
                    );
                    Self::new(max_links)
                }
                Err(e) => {
                    warn!(
                        value = raw,
                        error = %e,
                        "Ignoring malformed {}, using default traversal budget",
                        MAX_TRAVERSAL_LINKS_ENV
                    );
                    Self::default()
                }
            },
        }
    }
}

/// Unsigned decimal digits only; `u64::from_str` would also take a `+`
fn parse_link_count(raw: &str) -> Result<u64, String> {
    if raw.starts_with('+') {
        return Err("sign not allowed".to_string());
    }
    raw.parse::<u64>().map_err(|e| e.to_string())
}
