use g53_domain::{DomainError, ServiceQuery, ServiceRecord};

/// Access to administrator-registered service records.
///
/// Implemented by the in-memory record store and consumed by both the
/// resolution engine and the administrative API.
pub trait ServiceListProvider: Send + Sync {
    /// Registers a record. Records of a type the store cannot hold are
    /// logged and dropped.
    fn add_service(&self, record: ServiceRecord);

    /// Removes every record matching alias, type and value.
    ///
    /// # Errors
    ///
    /// * `DomainError::NotFound` - If nothing matched
    fn remove_service(&self, record: &ServiceRecord) -> Result<(), DomainError>;

    /// Returns all records registered under the query's alias and type.
    ///
    /// # Errors
    ///
    /// * `DomainError::NotFound` - If the alias or the type is absent
    fn get_service(&self, query: &ServiceQuery) -> Result<Vec<ServiceRecord>, DomainError>;

    /// All records, oldest first.
    fn get_all_services(&self) -> Vec<ServiceRecord>;

    /// Replaces the value and ttl of `original` with those of `modified`.
    ///
    /// # Errors
    ///
    /// * `DomainError::InvalidArgument` - If alias or type differ between the two
    /// * `DomainError::NotFound` - If `original` is not registered
    fn update_service(
        &self,
        original: &ServiceRecord,
        modified: &ServiceRecord,
    ) -> Result<(), DomainError>;
}
