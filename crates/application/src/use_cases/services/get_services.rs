use g53_domain::{fqdn, DomainError, ServiceQuery, ServiceRecord, ServiceRecordType};
use std::sync::Arc;

use crate::ports::ServiceListProvider;

pub struct GetServicesUseCase {
    services: Arc<dyn ServiceListProvider>,
}

impl GetServicesUseCase {
    pub fn new(services: Arc<dyn ServiceListProvider>) -> Self {
        Self { services }
    }

    pub fn execute(
        &self,
        alias: &str,
        record_type: &str,
    ) -> Result<Vec<ServiceRecord>, DomainError> {
        let record_type = record_type
            .parse::<ServiceRecordType>()
            .map_err(DomainError::InvalidRecordType)?;
        let query = ServiceQuery::new(fqdn(alias), record_type);
        self.services.get_service(&query)
    }
}
