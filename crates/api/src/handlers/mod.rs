pub mod cache;
pub mod health;
pub mod services;
pub mod settings;

pub use cache::{get_cache_stats, purge_cache};
pub use health::health_check;
pub use services::{add_service, get_services, list_services, remove_service, update_service};
pub use settings::set_default_ttl;
