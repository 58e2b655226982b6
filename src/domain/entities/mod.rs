//! Domain entity definitions.

mod attachment;
mod channel;
mod guild;
mod kind;
mod message;
mod token;
mod user;

pub use attachment::{Attachment, AttachmentDescriptor, AttachmentMeta};
pub use channel::{Channel, ChannelKind};
pub use guild::Guild;
pub use kind::{Entity, EntityKind};
pub use message::{MessageEvent, ResolvedMessage};
pub use token::BotToken;
pub use user::User;
