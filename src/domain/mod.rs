//! Domain layer with core entities, errors, and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;

pub use entities::{Attachment, AttachmentDescriptor, Channel, Entity, EntityKind, Guild, User};
pub use errors::{CacheError, CacheResult, FetchError, ProviderError};
pub use ports::{AttachmentFetcher, FetchedContent, Provider};
