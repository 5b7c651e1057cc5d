mod answer_cache;
mod service_list;

pub use answer_cache::{AnswerCacheControl, CacheStats};
pub use service_list::ServiceListProvider;
