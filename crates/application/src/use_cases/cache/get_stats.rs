use std::sync::Arc;

use crate::ports::{AnswerCacheControl, CacheStats};

pub struct GetCacheStatsUseCase {
    cache: Arc<dyn AnswerCacheControl>,
}

impl GetCacheStatsUseCase {
    pub fn new(cache: Arc<dyn AnswerCacheControl>) -> Self {
        Self { cache }
    }

    pub fn execute(&self) -> CacheStats {
        self.cache.stats()
    }
}
