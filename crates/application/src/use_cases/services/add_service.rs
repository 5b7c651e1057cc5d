use g53_domain::{DomainError, ServiceRecord};
use std::sync::Arc;
use tracing::{info, instrument};

use super::canonical;
use crate::ports::ServiceListProvider;

pub struct AddServiceUseCase {
    services: Arc<dyn ServiceListProvider>,
}

impl AddServiceUseCase {
    pub fn new(services: Arc<dyn ServiceListProvider>) -> Self {
        Self { services }
    }

    #[instrument(skip(self), fields(alias = %record.alias))]
    pub fn execute(&self, record: ServiceRecord) -> Result<ServiceRecord, DomainError> {
        let record = canonical(record)?;
        self.services.add_service(record.clone());

        info!(
            alias = %record.alias,
            record_type = %record.record_type,
            value = %record.value,
            "Service registered"
        );

        Ok(record)
    }
}
