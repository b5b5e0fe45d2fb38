//! Read-only views of the contact directory and the avatar store.

/// Chat metadata as known to the local contact list.
///
/// Missing values are returned as empty strings.
pub trait ContactDirectory: Send + Sync {
    /// Whether the current user administers the given chat.
    fn is_admin(&self, contact: &str) -> bool;

    fn chat_name(&self, contact: &str) -> String;

    fn chat_description(&self, contact: &str) -> String;

    fn chat_rules(&self, contact: &str) -> String;

    /// Opaque stamp identifying the chat on the backend.
    fn chat_stamp(&self, contact: &str) -> String;
}

/// Avatar cache lookups.
pub trait AvatarStore: Send + Sync {
    /// True while the contact still shows the generated placeholder avatar.
    fn is_default_avatar(&self, contact: &str) -> bool;
}
