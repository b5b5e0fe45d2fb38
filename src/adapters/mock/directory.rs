//! In-memory contact directory and avatar store.
//!
//! Both are shared through `Arc` clones; changes made through one handle are
//! visible through all of them, like the application-wide stores they stand
//! in for.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use crate::models::{OutboundRequest, RequestKind};
use crate::traits::{AvatarStore, ContactDirectory};

/// Everything the directory knows about one chat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatRecord {
    pub name: String,
    pub description: String,
    pub rules: String,
    pub stamp: String,
    pub is_admin: bool,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    chats: Arc<Mutex<HashMap<String, ChatRecord>>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chat(self, contact: &str, record: ChatRecord) -> Self {
        self.insert(contact, record);
        self
    }

    pub fn insert(&self, contact: &str, record: ChatRecord) {
        self.chats
            .lock()
            .unwrap()
            .insert(contact.to_string(), record);
    }

    pub fn get(&self, contact: &str) -> Option<ChatRecord> {
        self.chats.lock().unwrap().get(contact).cloned()
    }

    /// Mutate a chat record, creating it if needed.
    pub fn update(&self, contact: &str, f: impl FnOnce(&mut ChatRecord)) {
        let mut chats = self.chats.lock().unwrap();
        f(chats.entry(contact.to_string()).or_default());
    }

    pub fn set_admin(&self, contact: &str, is_admin: bool) {
        self.update(contact, |r| r.is_admin = is_admin);
    }

    pub fn set_description(&self, contact: &str, description: &str) {
        self.update(contact, |r| r.description = description.to_string());
    }

    /// Apply a `chats/mod/*` request the way the backend eventually would.
    ///
    /// Returns true if the request changed a record.
    pub fn apply(&self, request: &OutboundRequest) -> bool {
        let Some(contact) = request.payload.get_str("aimid") else {
            return false;
        };
        let (field, value) = match request.kind {
            RequestKind::ModName => ("name", request.payload.get_str("name")),
            RequestKind::ModAbout => ("about", request.payload.get_str("about")),
            RequestKind::ModRules => ("rules", request.payload.get_str("rules")),
            _ => return false,
        };
        let Some(value) = value.map(str::to_string) else {
            return false;
        };
        self.update(contact, |r| match field {
            "name" => r.name = value,
            "about" => r.description = value,
            _ => r.rules = value,
        });
        true
    }

    fn read<T>(&self, contact: &str, f: impl FnOnce(&ChatRecord) -> T) -> Option<T> {
        self.chats.lock().unwrap().get(contact).map(f)
    }
}

impl ContactDirectory for InMemoryDirectory {
    fn is_admin(&self, contact: &str) -> bool {
        self.read(contact, |r| r.is_admin).unwrap_or(false)
    }

    fn chat_name(&self, contact: &str) -> String {
        self.read(contact, |r| r.name.clone()).unwrap_or_default()
    }

    fn chat_description(&self, contact: &str) -> String {
        self.read(contact, |r| r.description.clone())
            .unwrap_or_default()
    }

    fn chat_rules(&self, contact: &str) -> String {
        self.read(contact, |r| r.rules.clone()).unwrap_or_default()
    }

    fn chat_stamp(&self, contact: &str) -> String {
        self.read(contact, |r| r.stamp.clone()).unwrap_or_default()
    }
}

/// Avatar store where every contact has the default avatar until told otherwise.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAvatars {
    custom: Arc<Mutex<HashSet<String>>>,
}

impl InMemoryAvatars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_custom(&self, contact: &str, custom: bool) {
        let mut set = self.custom.lock().unwrap();
        if custom {
            set.insert(contact.to_string());
        } else {
            set.remove(contact);
        }
    }
}

impl AvatarStore for InMemoryAvatars {
    fn is_default_avatar(&self, contact: &str) -> bool {
        !self.custom.lock().unwrap().contains(contact)
    }
}
