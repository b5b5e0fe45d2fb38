use std::collections::BTreeMap;
use std::fmt;

use bytes::Bytes;

/// Correlation token returned when a request is posted to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Seq(pub i64);

impl fmt::Display for Seq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Outbound request kinds used by chat event items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    /// Re-fetch chat info for a contact
    ChatInfoGet,
    /// Rename a group
    ModName,
    /// Change a group's description
    ModAbout,
    /// Change a group's rules
    ModRules,
    /// Upload a new avatar
    SetAvatar,
}

impl RequestKind {
    /// Wire name of the request.
    pub fn as_str(self) -> &'static str {
        match self {
            RequestKind::ChatInfoGet => "chats/info/get",
            RequestKind::ModName => "chats/mod/name",
            RequestKind::ModAbout => "chats/mod/about",
            RequestKind::ModRules => "chats/mod/rules",
            RequestKind::SetAvatar => "set_avatar",
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single payload field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadValue {
    Str(String),
    Int(i64),
    Stream(Bytes),
}

/// Flat, named-field request payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    fields: BTreeMap<String, PayloadValue>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_str(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_str(name, value);
        self
    }

    pub fn with_int(mut self, name: &str, value: i64) -> Self {
        self.fields.insert(name.to_string(), PayloadValue::Int(value));
        self
    }

    pub fn with_stream(mut self, name: &str, value: Bytes) -> Self {
        self.fields
            .insert(name.to_string(), PayloadValue::Stream(value));
        self
    }

    pub fn set_str(&mut self, name: &str, value: impl Into<String>) {
        self.fields
            .insert(name.to_string(), PayloadValue::Str(value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&PayloadValue> {
        self.fields.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        match self.fields.get(name) {
            Some(PayloadValue::Str(s)) => Some(s),
            _ => None,
        }
    }

    pub fn get_int(&self, name: &str) -> Option<i64> {
        match self.fields.get(name) {
            Some(PayloadValue::Int(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn get_stream(&self, name: &str) -> Option<&Bytes> {
        match self.fields.get(name) {
            Some(PayloadValue::Stream(b)) => Some(b),
            _ => None,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A request as handed to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    pub seq: Seq,
    pub kind: RequestKind,
    pub payload: Payload,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_kind_wire_names() {
        assert_eq!(RequestKind::ChatInfoGet.as_str(), "chats/info/get");
        assert_eq!(RequestKind::ModAbout.to_string(), "chats/mod/about");
        assert_eq!(RequestKind::SetAvatar.as_str(), "set_avatar");
    }

    #[test]
    fn test_payload_typed_getters() {
        let payload = Payload::new()
            .with_str("aimid", "123@chat.agent")
            .with_int("limit", 0)
            .with_stream("avatar", Bytes::from_static(b"png"));

        assert_eq!(payload.get_str("aimid"), Some("123@chat.agent"));
        assert_eq!(payload.get_int("limit"), Some(0));
        assert_eq!(payload.get_stream("avatar").map(|b| b.len()), Some(3));
        // Wrong type yields None rather than a coerced value
        assert_eq!(payload.get_int("aimid"), None);
        assert_eq!(payload.len(), 3);
    }
}
