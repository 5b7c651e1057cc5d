use g53_domain::ServiceRecordType;
use hickory_proto::rr::RecordType;

pub struct RecordTypeMapper;

impl RecordTypeMapper {
    /// Convert service RecordType → hickory RecordType
    pub fn to_hickory(record_type: ServiceRecordType) -> RecordType {
        match record_type {
            ServiceRecordType::A => RecordType::A,
            ServiceRecordType::AAAA => RecordType::AAAA,
            ServiceRecordType::CNAME => RecordType::CNAME,
            ServiceRecordType::SOA => RecordType::SOA,
        }
    }

    /// Convert hickory RecordType → service RecordType (for incoming queries)
    ///
    /// Returns `None` for types that never have local data.
    pub fn from_hickory(record_type: RecordType) -> Option<ServiceRecordType> {
        match record_type {
            RecordType::A => Some(ServiceRecordType::A),
            RecordType::AAAA => Some(ServiceRecordType::AAAA),
            RecordType::CNAME => Some(ServiceRecordType::CNAME),
            RecordType::SOA => Some(ServiceRecordType::SOA),
            _ => None,
        }
    }
}
