use std::sync::Arc;
use tracing::info;

use crate::ports::AnswerCacheControl;

pub struct PurgeCacheUseCase {
    cache: Arc<dyn AnswerCacheControl>,
}

impl PurgeCacheUseCase {
    pub fn new(cache: Arc<dyn AnswerCacheControl>) -> Self {
        Self { cache }
    }

    pub fn execute(&self) -> usize {
        let dropped = self.cache.stats().entries;
        self.cache.purge();
        info!(dropped, "Answer cache purged");
        dropped
    }
}
