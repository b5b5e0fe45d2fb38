//! Unified error type for chat event items.

use thiserror::Error;

use super::channel::ChannelError;

#[derive(Debug, Error)]
pub enum ChatEventError {
    /// A request could not be handed to the backend.
    #[error("Failed to post {request}: {source}")]
    Channel {
        request: &'static str,
        #[source]
        source: ChannelError,
    },

    /// The selected avatar could not be encoded for upload.
    #[error("Failed to encode avatar: {0}")]
    AvatarEncode(#[from] image::ImageError),

    /// Configuration could not be parsed.
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// Configuration could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ChatEventError {
    pub fn channel(request: &'static str, source: ChannelError) -> Self {
        ChatEventError::Channel { request, source }
    }

    /// Check if the item can keep working after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ChatEventError::AvatarEncode(_))
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ChatEventError::Channel { .. } => "E_CHANNEL",
            ChatEventError::AvatarEncode(_) => "E_AVATAR_ENCODE",
            ChatEventError::Config(_) => "E_CONFIG",
            ChatEventError::Io(_) => "E_IO",
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            ChatEventError::Channel { .. } => {
                "Lost connection to the messaging service. Please restart the application."
                    .to_string()
            }
            ChatEventError::AvatarEncode(_) => {
                "The selected image could not be used as an avatar. Please pick another one."
                    .to_string()
            }
            ChatEventError::Config(e) => format!("Configuration file is invalid: {}", e),
            ChatEventError::Io(e) => format!("Could not read configuration: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_error_display_names_request() {
        let err = ChatEventError::channel("chats/mod/about", ChannelError::Closed);
        assert_eq!(
            err.to_string(),
            "Failed to post chats/mod/about: Messaging channel closed"
        );
        assert_eq!(err.error_code(), "E_CHANNEL");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_config_error_from_serde() {
        let err: ChatEventError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert_eq!(err.error_code(), "E_CONFIG");
        assert!(err.user_message().starts_with("Configuration file is invalid"));
    }
}
