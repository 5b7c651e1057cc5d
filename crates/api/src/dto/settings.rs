use serde::Serialize;

#[derive(Serialize, Debug, Clone)]
pub struct TtlResponse {
    pub previous: u32,
    pub ttl: u32,
}
