mod set_default_ttl;

pub use set_default_ttl::SetDefaultTtlUseCase;
