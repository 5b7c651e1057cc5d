use serde::{Deserialize, Serialize};

/// Capacities of the two cache tiers
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Maximum number of administrator records kept in the private store
    #[serde(default = "default_private_capacity")]
    pub private_capacity: usize,

    /// Total capacity of the public answer cache, split evenly across
    /// its 256 shards (floor division)
    #[serde(default = "default_public_capacity")]
    pub public_capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            private_capacity: default_private_capacity(),
            public_capacity: default_public_capacity(),
        }
    }
}

fn default_private_capacity() -> usize {
    10_000
}

fn default_public_capacity() -> usize {
    65_536
}
