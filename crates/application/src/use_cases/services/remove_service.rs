use g53_domain::{fqdn, DomainError, ServiceRecord};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::ports::ServiceListProvider;

pub struct RemoveServiceUseCase {
    services: Arc<dyn ServiceListProvider>,
}

impl RemoveServiceUseCase {
    pub fn new(services: Arc<dyn ServiceListProvider>) -> Self {
        Self { services }
    }

    #[instrument(skip(self), fields(alias = %record.alias))]
    pub fn execute(&self, mut record: ServiceRecord) -> Result<(), DomainError> {
        record.alias = fqdn(&record.alias);
        self.services.remove_service(&record)?;

        info!(
            alias = %record.alias,
            record_type = %record.record_type,
            value = %record.value,
            "Service removed"
        );

        Ok(())
    }
}
