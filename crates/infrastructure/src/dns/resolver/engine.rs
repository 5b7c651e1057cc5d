use super::records::{service_record, target_name};
use super::soa::SoaBuilder;
use crate::dns::cache::PrivateRecordStore;
use crate::dns::forwarding::{Forwarder, RecordTypeMapper};
use g53_domain::{fqdn, ServiceQuery, ServiceRecordType};
use hickory_proto::op::{Message, MessageType, Query, ResponseCode};
use hickory_proto::rr::{Name, Record, RecordType};
use std::sync::Arc;
use tracing::{debug, warn};

/// What a request asks for, decided before any lookup.
enum QueryKind<'a> {
    EmptyQuestion,
    SoaQuery,
    Lookup(&'a Query),
}

impl<'a> QueryKind<'a> {
    fn classify(request: &'a Message) -> Self {
        match request.queries().first() {
            None => QueryKind::EmptyQuestion,
            Some(q) if q.query_type() == RecordType::SOA => QueryKind::SoaQuery,
            Some(q) => QueryKind::Lookup(q),
        }
    }
}

/// Outcome of answering from registered services.
enum LocalAnswer {
    Records(Vec<Record>),
    /// The name is registered but never has data of the queried type.
    UnsupportedType,
}

/// Per-query decision logic: private store, then public cache and
/// upstream nameservers, then a refusal carrying our SOA.
pub struct ResolutionEngine {
    store: Arc<PrivateRecordStore>,
    forwarder: Forwarder,
    soa: SoaBuilder,
}

impl ResolutionEngine {
    pub fn new(store: Arc<PrivateRecordStore>, forwarder: Forwarder, soa: SoaBuilder) -> Self {
        Self {
            store,
            forwarder,
            soa,
        }
    }

    /// Builds the reply for `request`. Never fails: every error ends in a
    /// protocol-valid response.
    pub async fn handle(&self, request: &Message) -> Message {
        let mut response = reply_to(request);

        match QueryKind::classify(request) {
            QueryKind::EmptyQuestion => {
                response.add_name_server(self.soa.build());
            }
            QueryKind::SoaQuery => {
                response.add_answer(self.soa.build());
            }
            QueryKind::Lookup(query) => self.lookup(query, &mut response).await,
        }

        response
    }

    async fn lookup(&self, query: &Query, response: &mut Message) {
        let owner = query.name();
        let name = fqdn(&owner.to_ascii());
        let query_type = query.query_type();

        debug!(domain = %name, record_type = %query_type, "DNS request");

        if self.store.contains(&name) {
            match self.local_answer(owner, &name, query_type).await {
                LocalAnswer::Records(records) if !records.is_empty() => {
                    debug!(domain = %name, answers = records.len(), "Answered from local services");
                    response.add_answers(records);
                    return;
                }
                LocalAnswer::UnsupportedType => {
                    // RFC 4074 section 3: empty NOERROR for a name we own
                    response.add_name_server(self.soa.build());
                    response.set_authoritative(true);
                    return;
                }
                LocalAnswer::Records(_) => {}
            }
        }

        self.forward(&name, query_type, response).await;
    }

    async fn local_answer(&self, owner: &Name, name: &str, query_type: RecordType) -> LocalAnswer {
        match RecordTypeMapper::from_hickory(query_type) {
            Some(ServiceRecordType::CNAME) => {
                LocalAnswer::Records(self.local_records(owner, name, ServiceRecordType::CNAME))
            }
            Some(record_type) if record_type.is_address() => {
                let direct = self.local_records(owner, name, record_type);
                if !direct.is_empty() {
                    return LocalAnswer::Records(direct);
                }
                LocalAnswer::Records(self.chase_cname(owner, name, query_type).await)
            }
            _ => LocalAnswer::UnsupportedType,
        }
    }

    fn local_records(
        &self,
        owner: &Name,
        name: &str,
        record_type: ServiceRecordType,
    ) -> Vec<Record> {
        let Ok(services) = self.store.list(&ServiceQuery::new(name, record_type)) else {
            return Vec::new();
        };
        services
            .iter()
            .filter_map(|service| match service_record(owner, service) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(domain = %name, error = %e, "Skipping unusable service record");
                    None
                }
            })
            .collect()
    }

    /// Follows a local CNAME one hop for an address query.
    async fn chase_cname(&self, owner: &Name, name: &str, query_type: RecordType) -> Vec<Record> {
        let Ok(cname) = self
            .store
            .get(&ServiceQuery::new(name, ServiceRecordType::CNAME))
        else {
            return Vec::new();
        };

        let (cname_record, target) = match (service_record(owner, &cname), target_name(&cname.value)) {
            (Ok(record), Ok(target)) => (record, target),
            (Err(e), _) | (_, Err(e)) => {
                warn!(domain = %name, error = %e, "Skipping unusable CNAME service");
                return Vec::new();
            }
        };

        let mut answers = vec![cname_record];
        let target_key = fqdn(&target.to_ascii());

        let hop = RecordTypeMapper::from_hickory(query_type)
            .map(|t| self.local_records(&target, &target_key, t))
            .unwrap_or_default();

        if !hop.is_empty() {
            answers.extend(hop);
            return answers;
        }

        match self.forwarder.forward(&target_key, query_type).await {
            Ok(forwarded) => answers.extend(forwarded.answers),
            Err(e) => debug!(domain = %target_key, error = %e, "CNAME target unresolved"),
        }
        answers
    }

    async fn forward(&self, name: &str, query_type: RecordType, response: &mut Message) {
        match self.forwarder.forward(name, query_type).await {
            Ok(forwarded) => {
                debug!(
                    domain = %name,
                    cache_hit = forwarded.cache_hit,
                    upstream = ?forwarded.upstream_server,
                    rcode = ?forwarded.rcode,
                    "Forwarded answer"
                );
                response.set_response_code(forwarded.rcode);
                response.add_answers(forwarded.answers);
                response.add_name_servers(forwarded.authority);
                response.add_additionals(forwarded.additionals);
            }
            Err(e) => {
                warn!(domain = %name, error = %e, "Refusing query");
                response.set_response_code(ResponseCode::Refused);
                response.add_name_server(self.soa.build());
            }
        }
    }
}

fn reply_to(request: &Message) -> Message {
    let mut response = Message::new();
    response
        .set_id(request.id())
        .set_message_type(MessageType::Response)
        .set_op_code(request.op_code())
        .set_recursion_desired(request.recursion_desired())
        .set_recursion_available(true)
        .set_response_code(ResponseCode::NoError);
    response.add_queries(request.queries().iter().cloned());
    response
}
