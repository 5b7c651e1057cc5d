use g53_domain::{fqdn, DomainError, ServiceRecord};
use std::sync::Arc;
use tracing::{info, instrument};

use super::canonical;
use crate::ports::ServiceListProvider;

pub struct UpdateServiceUseCase {
    services: Arc<dyn ServiceListProvider>,
}

impl UpdateServiceUseCase {
    pub fn new(services: Arc<dyn ServiceListProvider>) -> Self {
        Self { services }
    }

    #[instrument(skip(self), fields(alias = %original.alias))]
    pub fn execute(
        &self,
        mut original: ServiceRecord,
        modified: ServiceRecord,
    ) -> Result<ServiceRecord, DomainError> {
        original.alias = fqdn(&original.alias);
        let modified = canonical(modified)?;

        self.services.update_service(&original, &modified)?;

        info!(
            alias = %modified.alias,
            from = %original.value,
            to = %modified.value,
            "Service updated"
        );

        Ok(modified)
    }
}
