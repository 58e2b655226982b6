//! Domain error types.

mod cache_error;
mod fetch_error;
mod provider_error;

pub use cache_error::{CacheError, CacheResult};
pub use fetch_error::FetchError;
pub use provider_error::ProviderError;
