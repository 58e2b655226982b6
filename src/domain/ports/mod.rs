mod fetcher_port;
mod provider_port;

pub use fetcher_port::{AttachmentFetcher, FetchedContent};
pub use provider_port::Provider;
