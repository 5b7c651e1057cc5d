//! Query resolution: the per-query engine plus the records it synthesizes.

pub mod engine;
pub mod records;
pub mod soa;

pub use engine::ResolutionEngine;
pub use soa::SoaBuilder;
