//! Message normalization.
//!
//! Converts caller input into canonical messages and canonical messages
//! into wire messages. Pure functions; both session operations go through
//! here so a message has the same shape whichever way it was sent.

use crate::message::{
    Content, ContentPart, LmcMessage, MessageInput, OneOrMany, Role, WireMessage,
    DEFAULT_CONTENT_TYPE,
};
use crate::LlmError;

pub const DEFAULT_ATTACHMENT_TYPE: &str = "image_url";

/// How plain text is turned into a canonical message.
#[derive(Debug, Clone, PartialEq)]
pub struct LmcOptions {
    /// Attachment references (URLs or data URIs), in order.
    pub attachments: Option<OneOrMany>,
    /// One type per attachment, or a single type applied to all of them.
    pub attachment_types: OneOrMany,
    pub role: Role,
    pub author: Option<String>,
    /// Type tag of the primary text part, also stored as the message `type`.
    pub content_type: String,
}

impl Default for LmcOptions {
    fn default() -> Self {
        Self {
            attachments: None,
            attachment_types: OneOrMany::One(DEFAULT_ATTACHMENT_TYPE.to_string()),
            role: Role::User,
            author: None,
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
        }
    }
}

impl LmcOptions {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            ..Self::default()
        }
    }

    pub fn with_attachments(mut self, attachments: impl Into<OneOrMany>) -> Self {
        self.attachments = Some(attachments.into());
        self
    }

    pub fn with_attachment_types(mut self, types: impl Into<OneOrMany>) -> Self {
        self.attachment_types = types.into();
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }
}

/// Normalize `input` into a canonical message.
///
/// Canonical input passes through unchanged. Plain text becomes the message
/// content; with attachments, the content is a part list whose first part
/// holds the text and whose remaining parts pair each attachment with its
/// type. Fails with [`LlmError::Validation`] when the attachment and type
/// counts differ.
pub fn to_canonical(
    input: impl Into<MessageInput>,
    options: &LmcOptions,
) -> Result<LmcMessage, LlmError> {
    let text = match input.into() {
        MessageInput::Canonical(message) => return Ok(message),
        MessageInput::PlainText(text) => text,
    };

    let attachments = options
        .attachments
        .clone()
        .map(OneOrMany::into_vec)
        .unwrap_or_default();

    let content = if attachments.is_empty() {
        Content::Text(text)
    } else {
        let types = match &options.attachment_types {
            OneOrMany::One(kind) => vec![kind.clone(); attachments.len()],
            OneOrMany::Many(kinds) => kinds.clone(),
        };
        if types.len() != attachments.len() {
            return Err(LlmError::Validation(format!(
                "`attachments` and `attachment_types` must have the same length ({} != {})",
                attachments.len(),
                types.len()
            )));
        }

        let mut parts = Vec::with_capacity(attachments.len() + 1);
        parts.push(ContentPart::text(options.content_type.clone(), text));
        parts.extend(
            attachments
                .into_iter()
                .zip(types)
                .map(|(url, kind)| ContentPart::url(kind, url)),
        );
        Content::Parts(parts)
    };

    Ok(LmcMessage {
        role: options.role.clone(),
        content,
        author: options.author.clone(),
        kind: options.content_type.clone(),
    })
}

/// Render `input` for submission. Plain text is treated as a `user` message.
pub fn to_wire(input: &MessageInput) -> WireMessage {
    match input {
        MessageInput::Canonical(message) => message.to_wire(),
        MessageInput::PlainText(text) => LmcMessage::user(text.clone()).to_wire(),
    }
}
