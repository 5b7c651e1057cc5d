pub mod cache;
pub mod services;
pub mod settings;

pub use cache::{GetCacheStatsUseCase, PurgeCacheUseCase};
pub use services::{
    AddServiceUseCase, GetServicesUseCase, ListServicesUseCase, RemoveServiceUseCase,
    UpdateServiceUseCase,
};
pub use settings::SetDefaultTtlUseCase;
