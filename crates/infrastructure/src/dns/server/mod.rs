pub mod listener;

pub use listener::DnsListener;
