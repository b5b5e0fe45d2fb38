use serde::{Deserialize, Serialize};

/// Kind of chat system event.
///
/// Only [`ChatEventType::GroupInvite`] supports the action panel; every other
/// kind renders as plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatEventType {
    /// "You created a group / were invited" announcement
    GroupInvite,
    /// Members were added to a group
    AddMembers,
    /// Members were removed from a group
    DelMembers,
    /// A member left the group
    LeaveGroup,
    /// Group name changed
    NameChanged,
    /// Group description changed
    DescriptionChanged,
    /// Group rules changed
    RulesChanged,
    /// Any other event the client does not special-case
    #[default]
    #[serde(other)]
    Generic,
}

impl ChatEventType {
    /// Whether this event kind can offer quick-remediation buttons.
    pub fn supports_actions(self) -> bool {
        matches!(self, ChatEventType::GroupInvite)
    }
}

/// A mention link inside the formatted event text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberLink {
    /// Text as it appears in the formatted event (usually a display name)
    pub text: String,
    /// Identifier reported when the link is clicked
    pub target: String,
}

impl MemberLink {
    pub fn new(text: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            target: target.into(),
        }
    }
}

/// Immutable description of a system event, supplied by the history layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventInfo {
    pub event_type: ChatEventType,
    /// Pre-formatted display text
    pub text: String,
    /// Captcha events show auto-detected URLs as links
    #[serde(default)]
    pub captcha_present: bool,
    #[serde(default)]
    pub member_links: Vec<MemberLink>,
}

impl EventInfo {
    pub fn new(event_type: ChatEventType, text: impl Into<String>) -> Self {
        Self {
            event_type,
            text: text.into(),
            captcha_present: false,
            member_links: Vec::new(),
        }
    }

    pub fn with_captcha(mut self, present: bool) -> Self {
        self.captcha_present = present;
        self
    }

    pub fn with_member_link(mut self, link: MemberLink) -> Self {
        self.member_links.push(link);
        self
    }

    /// Text shown in the recents list for this event.
    pub fn format_event_text(&self) -> &str {
        &self.text
    }
}

/// Delivery status of a timeline item.
///
/// System events are never delivered or read, so only `None` is valid for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LastStatus {
    #[default]
    None,
    Pending,
    Delivered,
    Read,
}

/// Media classification used by the recents list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    NoMedia,
    Image,
    Video,
    File,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_group_invite_supports_actions() {
        assert!(ChatEventType::GroupInvite.supports_actions());
        assert!(!ChatEventType::AddMembers.supports_actions());
        assert!(!ChatEventType::Generic.supports_actions());
    }

    #[test]
    fn test_event_info_deserializes_unknown_type_as_generic() {
        let json = r#"{"event_type":"birthday","text":"Happy birthday"}"#;
        let info: EventInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.event_type, ChatEventType::Generic);
        assert!(!info.captcha_present);
        assert!(info.member_links.is_empty());
    }

    #[test]
    fn test_event_info_builder() {
        let info = EventInfo::new(ChatEventType::GroupInvite, "Alice created the group")
            .with_captcha(true)
            .with_member_link(MemberLink::new("Alice", "alice@uin"));
        assert!(info.captcha_present);
        assert_eq!(info.member_links[0].target, "alice@uin");
        assert_eq!(info.format_event_text(), "Alice created the group");
    }
}
