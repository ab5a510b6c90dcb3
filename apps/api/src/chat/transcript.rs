//! Chat transcript: ordered messages for one session.
//!
//! A transcript starts unrestored. Messages pushed before `restore` are held
//! back and land after the restored history once it arrives. Nothing is handed
//! out for persistence until the restore has happened, so a write can never
//! overtake or clobber stored history.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::warn;

use crate::models::page::PageRow;

pub const FOLLOW_UP_TEXT: &str =
    "You can now preview your website using the button above, or tell me what you'd like to change about it!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Text,
    Generation,
    Edit,
    Confirmation,
    Error,
}

impl MessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Text => "text",
            MessageType::Generation => "generation",
            MessageType::Edit => "edit",
            MessageType::Confirmation => "confirmation",
            MessageType::Error => "error",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("Unknown message type '{0}'")]
pub struct UnknownMessageType(pub String);

impl FromStr for MessageType {
    type Err = UnknownMessageType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(MessageType::Text),
            "generation" => Ok(MessageType::Generation),
            "edit" => Ok(MessageType::Edit),
            "confirmation" => Ok(MessageType::Confirmation),
            "error" => Ok(MessageType::Error),
            other => Err(UnknownMessageType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub message: String,
    pub is_user: bool,
    pub message_type: MessageType,
    #[serde(default)]
    pub metadata: Value,
}

impl ChatMessage {
    pub fn user(content: &str) -> Self {
        Self {
            message: content.to_string(),
            is_user: true,
            message_type: MessageType::Text,
            metadata: json!({}),
        }
    }

    pub fn assistant_text(content: &str) -> Self {
        Self {
            message: content.to_string(),
            is_user: false,
            message_type: MessageType::Text,
            metadata: json!({}),
        }
    }

    /// Announces a generated website. The page travels in the metadata.
    pub fn generation(website: &PageRow) -> Self {
        Self {
            message: format!(
                "Great! I've created a website for {}. The website includes a hero section, about section, services, and contact information - all tailored to your business.",
                website.business_name
            ),
            is_user: false,
            message_type: MessageType::Generation,
            metadata: json!({ "website": website }),
        }
    }

    pub fn error(reason: &str) -> Self {
        Self {
            message: format!(
                "I'm sorry, I encountered an error while generating your website: {reason}. Please try again with a different description."
            ),
            is_user: false,
            message_type: MessageType::Error,
            metadata: json!({}),
        }
    }
}

#[derive(Debug, Default)]
pub struct ChatTranscript {
    messages: Vec<ChatMessage>,
    /// Index of the first message not yet handed out for persistence.
    saved_len: usize,
    restored: bool,
}

impl ChatTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Installs stored history ahead of anything pushed so far.
    /// Only the first restore counts.
    pub fn restore(&mut self, history: Vec<ChatMessage>) {
        if self.restored {
            warn!("Ignoring repeated transcript restore ({} messages)", history.len());
            return;
        }

        let pending = std::mem::take(&mut self.messages);
        self.saved_len = history.len();
        self.messages = history;
        self.messages.extend(pending);
        self.restored = true;
    }

    /// Messages added since the last call, in order. Empty until restored.
    pub fn take_unsaved(&mut self) -> Vec<ChatMessage> {
        if !self.restored {
            return Vec::new();
        }

        let unsaved = self.messages[self.saved_len..].to_vec();
        self.saved_len = self.messages.len();
        unsaved
    }
}
