//! Attachment descriptors and downloaded attachment content.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Attachment reference as carried by an inbound message event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentDescriptor {
    /// Source URL; doubles as the cache key.
    pub url: String,
    /// File name reported by Discord.
    pub filename: String,
    /// MIME type reported by Discord. May be empty.
    #[serde(default)]
    pub content_type: String,
}

impl AttachmentDescriptor {
    #[must_use]
    pub fn new(
        url: impl Into<String>,
        filename: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            filename: filename.into(),
            content_type: content_type.into(),
        }
    }
}

/// Name and type of an attachment, known before its content is downloaded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AttachmentMeta {
    pub name: String,
    pub content_type: String,
}

impl From<&AttachmentDescriptor> for AttachmentMeta {
    fn from(descriptor: &AttachmentDescriptor) -> Self {
        Self {
            name: descriptor.filename.clone(),
            content_type: descriptor.content_type.clone(),
        }
    }
}

/// A downloaded attachment.
///
/// `content` is reference counted, so clones handed out by the cache share the
/// same immutable buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    name: String,
    content_type: String,
    content: Bytes,
    last_reference: DateTime<Utc>,
}

impl Attachment {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        content: Bytes,
        last_reference: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            content,
            last_reference,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    #[must_use]
    pub fn content(&self) -> &Bytes {
        &self.content
    }

    /// Size of the downloaded body in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.content.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// When the cache last handed this attachment out.
    #[must_use]
    pub const fn last_reference(&self) -> DateTime<Utc> {
        self.last_reference
    }

    pub(crate) fn touch(&mut self, now: DateTime<Utc>) {
        self.last_reference = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_from_descriptor() {
        let descriptor =
            AttachmentDescriptor::new("https://cdn/a.png", "circuit_diagram.png", "image/png");
        let meta = AttachmentMeta::from(&descriptor);

        assert_eq!(meta.name, "circuit_diagram.png");
        assert_eq!(meta.content_type, "image/png");
    }

    #[test]
    fn test_empty_body_is_valid() {
        let attachment = Attachment::new("empty.txt", "text/plain", Bytes::new(), Utc::now());
        assert!(attachment.is_empty());
        assert_eq!(attachment.len(), 0);
    }
}
