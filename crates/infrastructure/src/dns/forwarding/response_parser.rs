use g53_domain::DomainError;
use hickory_proto::op::{Message, MessageType, ResponseCode};
use hickory_proto::rr::Record;
use tracing::debug;

/// Sections of an upstream reply that are relayed to the client.
#[derive(Debug, Clone)]
pub struct UpstreamAnswer {
    pub rcode: ResponseCode,
    pub answers: Vec<Record>,
    pub authority: Vec<Record>,
    pub additionals: Vec<Record>,
}

impl UpstreamAnswer {
    /// Answer and additional records, the part kept in the public cache.
    pub fn cacheable(&self) -> Vec<Record> {
        self.answers
            .iter()
            .chain(self.additionals.iter())
            .cloned()
            .collect()
    }
}

pub struct ResponseParser;

impl ResponseParser {
    /// Parses an upstream reply, rejecting anything that does not answer
    /// the query with `expected_id`.
    pub fn parse(response_bytes: &[u8], expected_id: u16) -> Result<UpstreamAnswer, DomainError> {
        let mut message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        if message.id() != expected_id {
            return Err(DomainError::InvalidDnsResponse(format!(
                "Response id {} does not match query id {}",
                message.id(),
                expected_id
            )));
        }
        if message.message_type() != MessageType::Response {
            return Err(DomainError::InvalidDnsResponse(
                "Upstream sent a query instead of a response".to_string(),
            ));
        }

        let rcode = message.response_code();
        let truncated = message.truncated();
        let answer = UpstreamAnswer {
            rcode,
            answers: message.take_answers(),
            authority: message.take_name_servers(),
            additionals: message.take_additionals(),
        };

        debug!(
            rcode = Self::rcode_to_status(rcode),
            answers = answer.answers.len(),
            authority = answer.authority.len(),
            additionals = answer.additionals.len(),
            truncated,
            "DNS response parsed"
        );

        Ok(answer)
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> &'static str {
        match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::FormErr => "FORMERR",
            _ => "UNKNOWN",
        }
    }
}
