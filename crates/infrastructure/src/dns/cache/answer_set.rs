use hickory_proto::rr::{Record, RecordType};
use std::time::Instant;

/// Upstream records cached under one (name, query type) key.
#[derive(Debug, Clone)]
pub struct AnswerSet {
    /// Canonical (lowercase, trailing-dot) query name
    pub name: String,
    pub query_type: RecordType,
    pub records: Vec<Record>,
    pub inserted_at: Instant,
}

impl AnswerSet {
    pub fn new(name: impl Into<String>, query_type: RecordType, records: Vec<Record>) -> Self {
        Self {
            name: name.into(),
            query_type,
            records,
            inserted_at: Instant::now(),
        }
    }

    /// Copies of the records with TTLs reduced by the time spent in cache.
    ///
    /// Elapsed seconds are rounded half up. Returns `None` as soon as any
    /// record would be left with a TTL of 1 or less.
    pub fn aged(&self, now: Instant) -> Option<Vec<Record>> {
        let elapsed = now.saturating_duration_since(self.inserted_at).as_secs_f64();
        let spent = (elapsed + 0.5).floor() as i64;

        self.records
            .iter()
            .map(|record| {
                let remaining = i64::from(record.ttl()) - spent;
                if remaining <= 1 {
                    return None;
                }
                let mut copy = record.clone();
                copy.set_ttl(remaining as u32);
                Some(copy)
            })
            .collect()
    }
}
