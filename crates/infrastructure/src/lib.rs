//! G53 Infrastructure Layer
pub mod dns;
