//! Use case implementations.

mod resolve_message_use_case;

pub use resolve_message_use_case::ResolveMessageUseCase;
