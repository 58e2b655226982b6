//! Application layer with the relay cache and use cases.

/// Read-through entity and attachment cache.
pub mod cache;
/// Use case implementations.
pub mod use_cases;

pub use cache::{Cache, CacheCleaner, CacheConfig};
pub use use_cases::ResolveMessageUseCase;
