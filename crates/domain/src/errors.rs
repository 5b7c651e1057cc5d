use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Must provide a positive size")]
    PositiveSizeRequired,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unsupported record type: {0}")]
    InvalidRecordType(String),

    #[error("Cached answer expired: {0}")]
    Expired(String),

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Timeout talking to {server}")]
    TransportTimeout { server: String },

    #[error("I/O error talking to {server}: {reason}")]
    TransportIo { server: String, reason: String },

    #[error("All nameservers exhausted")]
    AllNameserversExhausted,
}

impl DomainError {
    /// Errors that should move forwarding on to the next nameserver.
    pub fn is_exchange_failure(&self) -> bool {
        matches!(
            self,
            DomainError::TransportTimeout { .. }
                | DomainError::TransportIo { .. }
                | DomainError::InvalidDnsResponse(_)
        )
    }
}
