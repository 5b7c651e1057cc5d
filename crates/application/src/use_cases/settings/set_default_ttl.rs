use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tracing::info;

/// Replaces the TTL stamped on locally generated SOA records.
pub struct SetDefaultTtlUseCase {
    ttl: Arc<AtomicU32>,
}

impl SetDefaultTtlUseCase {
    pub fn new(ttl: Arc<AtomicU32>) -> Self {
        Self { ttl }
    }

    /// Returns the previous value.
    pub fn execute(&self, ttl: u32) -> u32 {
        let previous = self.ttl.swap(ttl, Ordering::Relaxed);
        info!(previous, ttl, "Default TTL changed");
        previous
    }
}
