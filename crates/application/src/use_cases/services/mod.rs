mod add_service;
mod get_services;
mod list_services;
mod remove_service;
mod update_service;

pub use add_service::AddServiceUseCase;
pub use get_services::GetServicesUseCase;
pub use list_services::ListServicesUseCase;
pub use remove_service::RemoveServiceUseCase;
pub use update_service::UpdateServiceUseCase;

use g53_domain::{fqdn, validators, DomainError, ServiceRecord};

/// Validates the record shape and rewrites its alias to trailing-dot form.
fn canonical(mut record: ServiceRecord) -> Result<ServiceRecord, DomainError> {
    validators::validate_service(&record).map_err(DomainError::InvalidArgument)?;
    record.alias = fqdn(&record.alias);
    Ok(record)
}
