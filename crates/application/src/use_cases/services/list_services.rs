use g53_domain::ServiceRecord;
use std::sync::Arc;

use crate::ports::ServiceListProvider;

pub struct ListServicesUseCase {
    services: Arc<dyn ServiceListProvider>,
}

impl ListServicesUseCase {
    pub fn new(services: Arc<dyn ServiceListProvider>) -> Self {
        Self { services }
    }

    pub fn execute(&self) -> Vec<ServiceRecord> {
        self.services.get_all_services()
    }
}
