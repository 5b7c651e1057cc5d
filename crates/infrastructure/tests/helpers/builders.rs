#![allow(dead_code)]
use g53_domain::{DomainSuffix, ServiceRecord, ServiceRecordType};
use g53_infrastructure::dns::{
    Forwarder, PrivateRecordStore, PublicAnswerCache, ResolutionEngine, SoaBuilder,
};
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{Name, RecordType};
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::atomic::AtomicU32;
use std::sync::Arc;
use std::time::Duration;

/// Per-nameserver timeout used by engine tests
pub const TEST_TIMEOUT: Duration = Duration::from_millis(250);

/// Engine over fresh stores, served domain "local", default TTL 0.
pub struct EngineFixture {
    pub store: Arc<PrivateRecordStore>,
    pub cache: Arc<PublicAnswerCache>,
    pub engine: ResolutionEngine,
}

impl EngineFixture {
    pub fn new(nameservers: &[SocketAddr]) -> Self {
        let store = Arc::new(PrivateRecordStore::new(64).unwrap());
        let cache = Arc::new(PublicAnswerCache::new(256 * 8).unwrap());
        let forwarder = Forwarder::over_udp(Arc::clone(&cache), nameservers, TEST_TIMEOUT);
        let soa = SoaBuilder::new(&DomainSuffix::new("local"), Arc::new(AtomicU32::new(0))).unwrap();
        let engine = ResolutionEngine::new(Arc::clone(&store), forwarder, soa);

        Self {
            store,
            cache,
            engine,
        }
    }

    pub fn with_service(self, alias: &str, record_type: ServiceRecordType, value: &str) -> Self {
        self.store
            .add(ServiceRecord::new(alias, record_type, value, 300));
        self
    }
}

pub fn query(name: &str, record_type: RecordType) -> Message {
    let mut message = Message::new();
    message
        .set_id(0x4242)
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(true);
    message.add_query(Query::query(Name::from_str(name).unwrap(), record_type));
    message
}

pub fn empty_query() -> Message {
    let mut message = Message::new();
    message
        .set_id(0x0101)
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Query);
    message
}
