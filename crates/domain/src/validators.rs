use crate::{ServiceRecord, ServiceRecordType};
use std::net::Ipv4Addr;

const MAX_NAME_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// Shape checks applied by the administrative layer before a record reaches
/// the store. The store itself only enforces the record type.
pub fn validate_service(record: &ServiceRecord) -> Result<(), String> {
    if record.alias.trim().is_empty() {
        return Err("Property \"alias\" is required".to_string());
    }
    if !is_host_name(&record.alias) {
        return Err(format!("Property \"alias\" is not a host name: {}", record.alias));
    }
    if record.ttl == 0 {
        return Err("Property \"ttl\" is required".to_string());
    }
    match record.record_type {
        ServiceRecordType::A => {
            if record.value.parse::<Ipv4Addr>().is_err() {
                return Err("Property \"value\" is NOT IP".to_string());
            }
        }
        ServiceRecordType::CNAME => {
            if !is_host_name(&record.value) {
                return Err("Property \"value\" is wrong".to_string());
            }
        }
        other => {
            return Err(format!("Property \"record_type\" is wrong: {}", other));
        }
    }
    Ok(())
}

/// RFC 1123 host name, optional trailing dot, at least two labels.
pub fn is_host_name(name: &str) -> bool {
    let name = name.strip_suffix('.').unwrap_or(name);
    if name.is_empty() || name.len() > MAX_NAME_LEN {
        return false;
    }
    let labels: Vec<&str> = name.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    labels.iter().all(|label| {
        !label.is_empty()
            && label.len() <= MAX_LABEL_LEN
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_a_record() {
        let record = ServiceRecord::new("web.local.", ServiceRecordType::A, "10.0.0.1", 60);
        assert!(validate_service(&record).is_ok());
    }

    #[test]
    fn test_a_record_requires_ipv4() {
        let record = ServiceRecord::new("web.local.", ServiceRecordType::A, "not-an-ip", 60);
        assert!(validate_service(&record).is_err());
    }

    #[test]
    fn test_cname_requires_host() {
        let ok = ServiceRecord::new("www.local.", ServiceRecordType::CNAME, "web.local", 60);
        assert!(validate_service(&ok).is_ok());

        let bad = ServiceRecord::new("www.local.", ServiceRecordType::CNAME, "web", 60);
        assert!(validate_service(&bad).is_err());
    }

    #[test]
    fn test_rejects_zero_ttl_and_empty_alias() {
        let zero_ttl = ServiceRecord::new("web.local.", ServiceRecordType::A, "10.0.0.1", 0);
        assert!(validate_service(&zero_ttl).is_err());

        let no_alias = ServiceRecord::new("", ServiceRecordType::A, "10.0.0.1", 60);
        assert!(validate_service(&no_alias).is_err());
    }

    #[test]
    fn test_rejects_unsupported_types() {
        let record = ServiceRecord::new("web.local.", ServiceRecordType::AAAA, "::1", 60);
        assert!(validate_service(&record).is_err());
    }

    #[test]
    fn test_host_names() {
        assert!(is_host_name("a.b"));
        assert!(is_host_name("my-host.example.com."));
        assert!(!is_host_name("-bad.example.com"));
        assert!(!is_host_name("bad..example.com"));
        assert!(!is_host_name("localhost"));
    }
}
