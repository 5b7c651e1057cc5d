use g53_domain::{Config, ServiceRecord};
use g53_infrastructure::dns::cache::AnswerSet;
use g53_infrastructure::dns::{
    Forwarder, PrivateRecordStore, PublicAnswerCache, ResolutionEngine, SoaBuilder,
};
use std::net::SocketAddr;
use std::sync::atomic::AtomicU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Long-lived resolver components shared by the DNS listener and the API.
pub struct DnsServices {
    pub store: Arc<PrivateRecordStore>,
    pub cache: Arc<PublicAnswerCache>,
    pub default_ttl: Arc<AtomicU32>,
    pub engine: Arc<ResolutionEngine>,
}

impl DnsServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let store = Arc::new(PrivateRecordStore::with_evict_callback(
            config.cache.private_capacity,
            Arc::new(|record: &ServiceRecord| {
                debug!(
                    alias = %record.alias,
                    record_type = %record.record_type,
                    value = %record.value,
                    "Service record dropped"
                );
            }),
        )?);

        let cache = Arc::new(PublicAnswerCache::with_evict_callback(
            config.cache.public_capacity,
            Arc::new(|set: &AnswerSet| {
                debug!(domain = %set.name, record_type = %set.query_type, "Answer evicted");
            }),
        )?);

        let nameservers = config
            .dns
            .nameservers
            .iter()
            .map(|ns| ns.parse::<SocketAddr>())
            .collect::<Result<Vec<_>, _>>()?;

        let default_ttl = Arc::new(AtomicU32::new(config.dns.ttl));
        let forwarder = Forwarder::over_udp(
            Arc::clone(&cache),
            &nameservers,
            Duration::from_millis(config.dns.query_timeout),
        );
        let soa = SoaBuilder::new(&config.dns.effective_domain(), Arc::clone(&default_ttl))?;
        let engine = Arc::new(ResolutionEngine::new(Arc::clone(&store), forwarder, soa));

        Ok(Self {
            store,
            cache,
            default_ttl,
            engine,
        })
    }
}
