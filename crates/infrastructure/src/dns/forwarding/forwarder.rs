use super::message_builder::MessageBuilder;
use super::response_parser::{ResponseParser, UpstreamAnswer};
use crate::dns::cache::{AnswerSet, PublicAnswerCache};
use crate::dns::transport::{DnsTransport, UdpTransport};
use g53_domain::DomainError;
use hickory_proto::op::ResponseCode;
use hickory_proto::rr::{Record, RecordType};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Records to relay for a forwarded query, split by message section.
#[derive(Debug, Clone)]
pub struct ForwardedAnswer {
    pub rcode: ResponseCode,
    pub answers: Vec<Record>,
    pub authority: Vec<Record>,
    pub additionals: Vec<Record>,
    pub cache_hit: bool,
    pub upstream_server: Option<SocketAddr>,
}

impl ForwardedAnswer {
    /// Rebuilds message sections from a cached answer set.
    fn from_cache(records: Vec<Record>, query_type: RecordType) -> Self {
        let mut answers = Vec::new();
        let mut authority = Vec::new();
        let mut additionals = Vec::new();

        for record in records {
            let rtype = record.record_type();
            if rtype == RecordType::SOA && query_type != RecordType::SOA {
                authority.push(record);
            } else if rtype == query_type || rtype == RecordType::CNAME {
                answers.push(record);
            } else {
                additionals.push(record);
            }
        }

        Self {
            rcode: ResponseCode::NoError,
            answers,
            authority,
            additionals,
            cache_hit: true,
            upstream_server: None,
        }
    }

    fn from_upstream(answer: UpstreamAnswer, server: SocketAddr) -> Self {
        Self {
            rcode: answer.rcode,
            answers: answer.answers,
            authority: answer.authority,
            additionals: answer.additionals,
            cache_hit: false,
            upstream_server: Some(server),
        }
    }
}

/// Resolves names the local store does not know.
///
/// The public cache is consulted first; on a miss every nameserver is tried
/// in configured order until one returns a parseable reply.
pub struct Forwarder {
    cache: Arc<PublicAnswerCache>,
    upstreams: Vec<Arc<dyn DnsTransport>>,
    timeout: Duration,
}

impl Forwarder {
    pub fn new(
        cache: Arc<PublicAnswerCache>,
        upstreams: Vec<Arc<dyn DnsTransport>>,
        timeout: Duration,
    ) -> Self {
        Self {
            cache,
            upstreams,
            timeout,
        }
    }

    pub fn over_udp(
        cache: Arc<PublicAnswerCache>,
        nameservers: &[SocketAddr],
        timeout: Duration,
    ) -> Self {
        let upstreams = nameservers
            .iter()
            .map(|addr| Arc::new(UdpTransport::new(*addr)) as Arc<dyn DnsTransport>)
            .collect();
        Self::new(cache, upstreams, timeout)
    }

    /// `name` must already be canonical (lowercase, trailing dot).
    pub async fn forward(
        &self,
        name: &str,
        query_type: RecordType,
    ) -> Result<ForwardedAnswer, DomainError> {
        match self.cache.get(name, query_type) {
            Ok(records) => {
                debug!(domain = %name, record_type = %query_type, "Public cache hit");
                return Ok(ForwardedAnswer::from_cache(records, query_type));
            }
            Err(e) => debug!(domain = %name, reason = %e, "Public cache miss"),
        }

        for transport in &self.upstreams {
            let server = transport.server_addr();
            debug!(
                domain = %name,
                server = %server,
                protocol = transport.protocol_name(),
                "Forwarding query"
            );

            match self.exchange(transport.as_ref(), name, query_type).await {
                Ok(answer) => {
                    let cacheable = answer.cacheable();
                    if !cacheable.is_empty() {
                        self.cache
                            .add(AnswerSet::new(name, query_type, cacheable));
                    }
                    return Ok(ForwardedAnswer::from_upstream(answer, server));
                }
                Err(e) if e.is_exchange_failure() => {
                    warn!(
                        domain = %name,
                        server = %server,
                        error = %e,
                        "DNS forwarding failed: trying next nameserver"
                    );
                }
                Err(e) => {
                    error!(domain = %name, error = %e, "DNS forwarding aborted");
                    return Err(e);
                }
            }
        }

        warn!(domain = %name, "DNS forwarding failed: no more nameservers to try");
        Err(DomainError::AllNameserversExhausted)
    }

    async fn exchange(
        &self,
        transport: &dyn DnsTransport,
        name: &str,
        query_type: RecordType,
    ) -> Result<UpstreamAnswer, DomainError> {
        let (id, query) = MessageBuilder::build_query_with_id(name, query_type)?;
        let response = transport.send(&query, self.timeout).await?;
        ResponseParser::parse(&response.bytes, id)
    }
}
