pub mod cache;
pub mod service;
pub mod settings;

pub use cache::{CacheStatsResponse, PurgeCacheResponse};
pub use service::{ServiceRequest, ServiceResponse, UpdateServiceRequest};
pub use settings::TtlResponse;
