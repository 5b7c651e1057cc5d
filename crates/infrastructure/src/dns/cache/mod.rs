pub mod answer_set;
pub mod answer_shard;
pub mod private_store;
pub mod public_cache;

pub use answer_set::AnswerSet;
pub use answer_shard::AnswerShard;
pub use private_store::PrivateRecordStore;
pub use public_cache::{PublicAnswerCache, SHARD_COUNT};

use g53_domain::DomainError;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Invoked for every item that leaves a cache through capacity pressure or
/// explicit deletion, after the owning lock is released.
pub type EvictCallback<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Bound for an `LruCache`; zero is rejected.
pub(crate) fn lru_capacity(capacity: usize) -> Result<NonZeroUsize, DomainError> {
    NonZeroUsize::new(capacity).ok_or(DomainError::PositiveSizeRequired)
}
