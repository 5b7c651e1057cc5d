use chrono::{DateTime, Utc};
use g53_domain::{DomainError, DomainSuffix};
use hickory_proto::rr::rdata::SOA;
use hickory_proto::rr::{Name, RData, Record};
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

const REFRESH: i32 = 28_800;
const RETRY: i32 = 7_200;
const EXPIRE: i32 = 604_800;

/// Builds the SOA record this resolver answers with for its own domain.
///
/// TTL and minimum TTL both follow the shared default TTL so that negative
/// answers are not cached for long.
pub struct SoaBuilder {
    owner: Name,
    mname: Name,
    rname: Name,
    ttl: Arc<AtomicU32>,
}

impl SoaBuilder {
    pub fn new(domain: &DomainSuffix, ttl: Arc<AtomicU32>) -> Result<Self, DomainError> {
        let owner = domain.fqdn();
        let parse = |s: &str| {
            Name::from_str(s)
                .map_err(|e| DomainError::InvalidDomainName(format!("{}: {}", s, e)))
        };

        Ok(Self {
            owner: parse(&owner)?,
            mname: parse(&format!("g53.{}", owner))?,
            rname: parse(&format!("g53.g53.{}", owner))?,
            ttl,
        })
    }

    pub fn ttl(&self) -> u32 {
        self.ttl.load(Ordering::Relaxed)
    }

    pub fn build(&self) -> Record {
        self.build_at(Utc::now())
    }

    pub fn build_at(&self, now: DateTime<Utc>) -> Record {
        let ttl = self.ttl();
        let soa = SOA::new(
            self.mname.clone(),
            self.rname.clone(),
            hour_serial(now),
            REFRESH,
            RETRY,
            EXPIRE,
            ttl,
        );
        Record::from_rdata(self.owner.clone(), ttl, RData::SOA(soa))
    }
}

/// Unix time truncated to the hour.
fn hour_serial(now: DateTime<Utc>) -> u32 {
    let secs = now.timestamp();
    (secs - secs.rem_euclid(3600)) as u32
}
