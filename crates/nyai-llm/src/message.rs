//! Message shapes: caller input, canonical ("LMC") messages and the
//! transient wire form sent to the provider.

use std::fmt;

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const DEFAULT_CONTENT_TYPE: &str = "text";

/// Speaker role. Unknown provider roles round-trip through `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    System,
    User,
    Assistant,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Other(name) => name,
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.as_str() {
            "system" => Role::System,
            "user" => Role::User,
            "assistant" => Role::Assistant,
            _ => Role::Other(value),
        }
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        Role::from(value.to_string())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of one content part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PartPayload {
    Text(String),
    /// A referenced resource. Keys beside `url` (such as `detail`) are kept.
    Url {
        url: String,
        #[serde(flatten)]
        extra: serde_json::Map<String, serde_json::Value>,
    },
    Other(serde_json::Value),
}

/// One element of a multi-part message, serialized as
/// `{"type": kind, kind: payload}`.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentPart {
    pub kind: String,
    pub payload: PartPayload,
}

impl ContentPart {
    pub fn text(kind: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            payload: PartPayload::Text(text.into()),
        }
    }

    pub fn url(kind: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            payload: PartPayload::Url {
                url: url.into(),
                extra: serde_json::Map::new(),
            },
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.payload {
            PartPayload::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl Serialize for ContentPart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("type", &self.kind)?;
        map.serialize_entry(&self.kind, &self.payload)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for ContentPart {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut map = serde_json::Map::<String, serde_json::Value>::deserialize(deserializer)?;
        let kind = match map.remove("type") {
            Some(serde_json::Value::String(kind)) => kind,
            Some(_) => return Err(D::Error::custom("content part `type` must be a string")),
            None => return Err(D::Error::missing_field("type")),
        };
        let payload = map
            .remove(&kind)
            .ok_or_else(|| D::Error::custom(format!("content part is missing its `{kind}` payload")))?;
        let payload = PartPayload::deserialize(payload).map_err(D::Error::custom)?;
        Ok(Self { kind, payload })
    }
}

/// Message content: plain text, or a primary text part followed by attachments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    Text(String),
    Parts(Vec<ContentPart>),
}

impl Content {
    /// The primary text: the whole value, or the text of part 0.
    pub fn text(&self) -> Option<&str> {
        match self {
            Content::Text(text) => Some(text),
            Content::Parts(parts) => parts.first().and_then(ContentPart::as_text),
        }
    }

    /// Attachment parts (everything after the primary part).
    pub fn attachments(&self) -> &[ContentPart] {
        match self {
            Content::Text(_) => &[],
            Content::Parts(parts) => parts.get(1..).unwrap_or(&[]),
        }
    }

    fn prefixed(&self, prefix: &str) -> Content {
        match self {
            Content::Text(text) => Content::Text(format!("{prefix}{text}")),
            Content::Parts(parts) => {
                let mut parts = parts.clone();
                if let Some(PartPayload::Text(text)) = parts.first_mut().map(|p| &mut p.payload) {
                    text.insert_str(0, prefix);
                }
                Content::Parts(parts)
            }
        }
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Text(text)
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::Text(text.to_string())
    }
}

fn default_kind() -> String {
    DEFAULT_CONTENT_TYPE.to_string()
}

/// Canonical ("LMC") message as stored in a session history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LmcMessage {
    pub role: Role,
    pub content: Content,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
}

impl LmcMessage {
    /// A plain text message with no author.
    pub fn text(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            content: Content::Text(text.into()),
            author: None,
            kind: default_kind(),
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::text(Role::System, text)
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::text(Role::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::text(Role::Assistant, text)
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Render this message for the provider, folding the author into the
    /// primary text as `(name: {author}) `. `self` is left untouched.
    pub fn to_wire(&self) -> WireMessage {
        let content = match self.author.as_deref().filter(|a| !a.is_empty()) {
            Some(author) => self.content.prefixed(&format!("(name: {author}) ")),
            None => self.content.clone(),
        };
        WireMessage {
            role: self.role.clone(),
            content,
        }
    }
}

/// Caller input before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageInput {
    PlainText(String),
    Canonical(LmcMessage),
}

impl From<&str> for MessageInput {
    fn from(text: &str) -> Self {
        MessageInput::PlainText(text.to_string())
    }
}

impl From<String> for MessageInput {
    fn from(text: String) -> Self {
        MessageInput::PlainText(text)
    }
}

impl From<&String> for MessageInput {
    fn from(text: &String) -> Self {
        MessageInput::PlainText(text.clone())
    }
}

impl From<LmcMessage> for MessageInput {
    fn from(message: LmcMessage) -> Self {
        MessageInput::Canonical(message)
    }
}

/// Author-prefixed message as submitted to the provider. Built per request,
/// never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireMessage {
    pub role: Role,
    pub content: Content,
}

/// A single value or a list of values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        }
    }
}

impl From<&str> for OneOrMany {
    fn from(value: &str) -> Self {
        OneOrMany::One(value.to_string())
    }
}

impl From<String> for OneOrMany {
    fn from(value: String) -> Self {
        OneOrMany::One(value)
    }
}

impl From<Vec<String>> for OneOrMany {
    fn from(values: Vec<String>) -> Self {
        OneOrMany::Many(values)
    }
}

impl From<Vec<&str>> for OneOrMany {
    fn from(values: Vec<&str>) -> Self {
        OneOrMany::Many(values.into_iter().map(String::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for OneOrMany {
    fn from(values: [&str; N]) -> Self {
        OneOrMany::Many(values.iter().map(|v| v.to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn role_round_trips_known_and_custom_names() {
        assert_eq!(serde_json::to_value(Role::Assistant).unwrap(), json!("assistant"));
        let role: Role = serde_json::from_value(json!("tool")).unwrap();
        assert_eq!(role, Role::Other("tool".into()));
        assert_eq!(serde_json::to_value(role).unwrap(), json!("tool"));
        assert_eq!(Role::from("system"), Role::System);
    }

    #[test]
    fn canonical_text_message_shape() {
        let message = LmcMessage::user("Hi");
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({"role": "user", "content": "Hi", "author": null, "type": "text"})
        );
    }

    #[test]
    fn content_part_uses_kind_as_payload_key() {
        let part = ContentPart::url("image_url", "https://x/y.png");
        assert_eq!(
            serde_json::to_value(&part).unwrap(),
            json!({"type": "image_url", "image_url": {"url": "https://x/y.png"}})
        );
    }

    #[test]
    fn content_part_deserializes_from_provider_json() {
        let part: ContentPart =
            serde_json::from_value(json!({"type": "text", "text": "hello"})).unwrap();
        assert_eq!(part, ContentPart::text("text", "hello"));

        let part: ContentPart = serde_json::from_value(
            json!({"type": "input_audio", "input_audio": {"data": "AAA", "format": "wav"}}),
        )
        .unwrap();
        assert!(matches!(part.payload, PartPayload::Other(_)));
    }

    #[test]
    fn canonical_url_part_keeps_extra_keys_on_the_wire() {
        let message: LmcMessage = serde_json::from_value(json!({
            "role": "user",
            "content": [
                {"type": "text", "text": "look"},
                {"type": "image_url", "image_url": {"url": "u1", "detail": "high"}}
            ]
        }))
        .unwrap();

        let wire = serde_json::to_value(message.to_wire()).unwrap();
        assert_eq!(
            wire["content"][1],
            json!({"type": "image_url", "image_url": {"url": "u1", "detail": "high"}})
        );
    }

    #[test]
    fn content_part_without_payload_is_rejected() {
        let err = serde_json::from_value::<ContentPart>(json!({"type": "image_url"})).unwrap_err();
        assert!(err.to_string().contains("image_url"));
    }

    #[test]
    fn message_deserializes_with_defaults() {
        let message: LmcMessage =
            serde_json::from_value(json!({"role": "assistant", "content": "ok"})).unwrap();
        assert_eq!(message, LmcMessage::assistant("ok"));
    }

    #[test]
    fn attachments_skip_primary_part() {
        let content = Content::Parts(vec![
            ContentPart::text("text", "look"),
            ContentPart::url("image_url", "u1"),
        ]);
        assert_eq!(content.text(), Some("look"));
        assert_eq!(content.attachments().len(), 1);
        assert!(Content::from("plain").attachments().is_empty());
    }

    #[test]
    fn empty_author_adds_no_prefix() {
        let message = LmcMessage::user("Hi").with_author("");
        assert_eq!(message.to_wire().content, Content::from("Hi"));
    }

    #[test]
    fn one_or_many_conversions() {
        assert_eq!(OneOrMany::from("a").into_vec(), vec!["a"]);
        assert_eq!(OneOrMany::from(["a", "b"]).into_vec(), vec!["a", "b"]);
    }
}
