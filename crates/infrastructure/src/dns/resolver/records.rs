use g53_domain::{fqdn, DomainError, ServiceRecord, ServiceRecordType};
use hickory_proto::rr::rdata::{A, CNAME};
use hickory_proto::rr::{Name, RData, Record};
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Wire record for a registered service, owned by `owner`.
pub fn service_record(owner: &Name, service: &ServiceRecord) -> Result<Record, DomainError> {
    let rdata = match service.record_type {
        ServiceRecordType::A => {
            let ip = Ipv4Addr::from_str(&service.value).map_err(|e| {
                DomainError::InvalidArgument(format!("'{}': {}", service.value, e))
            })?;
            RData::A(A(ip))
        }
        ServiceRecordType::CNAME => RData::CNAME(CNAME(target_name(&service.value)?)),
        other => return Err(DomainError::InvalidRecordType(other.to_string())),
    };
    Ok(Record::from_rdata(owner.clone(), service.ttl, rdata))
}

/// CNAME targets are stored without the trailing dot.
pub fn target_name(value: &str) -> Result<Name, DomainError> {
    let target = fqdn(value);
    Name::from_str(&target)
        .map_err(|e| DomainError::InvalidDomainName(format!("{}: {}", target, e)))
}
