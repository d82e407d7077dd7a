//! Outgoing notification types.

use serde::{Deserialize, Serialize};

/// Outgoing message to a channel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutgoingMessage {
    /// Destination channel id on the chat platform.
    pub thread_id: String,
    pub content: String,
    /// User the notification is about, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
}

impl OutgoingMessage {
    pub fn new(thread_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            thread_id: thread_id.into(),
            content: content.into(),
            user_id: None,
        }
    }

    /// Build a notification addressed to `user_id`, prefixed with a mention.
    pub fn for_user(thread_id: impl Into<String>, user_id: u64, body: &str) -> Self {
        let content = if body.is_empty() {
            mention(user_id)
        } else {
            format!("{} {body}", mention(user_id))
        };
        Self {
            thread_id: thread_id.into(),
            content,
            user_id: Some(user_id),
        }
    }
}

/// Chat-platform mention markup for a user id.
pub fn mention(user_id: u64) -> String {
    format!("<@{user_id}>")
}
