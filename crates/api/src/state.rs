use g53_application::ports::{AnswerCacheControl, ServiceListProvider};
use g53_application::use_cases::{
    AddServiceUseCase, GetCacheStatsUseCase, GetServicesUseCase, ListServicesUseCase,
    PurgeCacheUseCase, RemoveServiceUseCase, SetDefaultTtlUseCase, UpdateServiceUseCase,
};
use std::sync::atomic::AtomicU32;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub add_service: Arc<AddServiceUseCase>,
    pub get_services: Arc<GetServicesUseCase>,
    pub list_services: Arc<ListServicesUseCase>,
    pub remove_service: Arc<RemoveServiceUseCase>,
    pub update_service: Arc<UpdateServiceUseCase>,
    pub get_cache_stats: Arc<GetCacheStatsUseCase>,
    pub purge_cache: Arc<PurgeCacheUseCase>,
    pub set_default_ttl: Arc<SetDefaultTtlUseCase>,
}

impl AppState {
    pub fn new(
        services: Arc<dyn ServiceListProvider>,
        cache: Arc<dyn AnswerCacheControl>,
        default_ttl: Arc<AtomicU32>,
    ) -> Self {
        Self {
            add_service: Arc::new(AddServiceUseCase::new(Arc::clone(&services))),
            get_services: Arc::new(GetServicesUseCase::new(Arc::clone(&services))),
            list_services: Arc::new(ListServicesUseCase::new(Arc::clone(&services))),
            remove_service: Arc::new(RemoveServiceUseCase::new(Arc::clone(&services))),
            update_service: Arc::new(UpdateServiceUseCase::new(services)),
            get_cache_stats: Arc::new(GetCacheStatsUseCase::new(Arc::clone(&cache))),
            purge_cache: Arc::new(PurgeCacheUseCase::new(cache)),
            set_default_ttl: Arc::new(SetDefaultTtlUseCase::new(default_ttl)),
        }
    }
}
