pub mod cache;
pub mod forwarding;
pub mod resolver;
pub mod server;
pub mod transport;

pub use cache::{PrivateRecordStore, PublicAnswerCache};
pub use forwarding::Forwarder;
pub use resolver::{ResolutionEngine, SoaBuilder};
pub use server::DnsListener;
