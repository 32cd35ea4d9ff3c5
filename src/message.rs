//! Conversation message model.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Greeting shown as the first message of every conversation.
pub const GREETING_TEXT: &str =
    "Hello! I'm your AI assistant powered by Gemini. How can I help you today?";

/// Fixed notice appended in place of a reply when a chat turn fails.
pub const ERROR_NOTICE_TEXT: &str =
    "Sorry, I'm having trouble connecting to the server. Please make sure the backend is running.";

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "bot")]
    Bot,
}

/// One conversation entry. Messages are append-only: once in the history
/// they are never mutated or removed except by a full-session reset.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Message {
    pub id: i64,
    pub text: String,
    pub sender: Sender,
    /// ISO-8601 creation time. For bot replies the server-provided value is
    /// used when present, local time otherwise.
    pub timestamp: String,
    /// Set only on synthesized failure notices, never on real replies.
    #[serde(default, skip_serializing_if = "std::ops::Not::not", rename = "isError")]
    pub is_error: bool,
}

impl Message {
    pub fn user(id: i64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            sender: Sender::User,
            timestamp: now_iso8601(),
            is_error: false,
        }
    }

    pub fn bot(id: i64, text: impl Into<String>, server_timestamp: Option<String>) -> Self {
        Self {
            id,
            text: text.into(),
            sender: Sender::Bot,
            timestamp: server_timestamp.unwrap_or_else(now_iso8601),
            is_error: false,
        }
    }

    pub fn greeting(id: i64) -> Self {
        Self {
            id,
            text: GREETING_TEXT.to_string(),
            sender: Sender::Bot,
            timestamp: now_iso8601(),
            is_error: false,
        }
    }

    pub fn error_notice(id: i64) -> Self {
        Self {
            id,
            text: ERROR_NOTICE_TEXT.to_string(),
            sender: Sender::Bot,
            timestamp: now_iso8601(),
            is_error: true,
        }
    }
}

pub fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Allocates message ids derived from creation time. Ids are unique and
/// strictly increasing in insertion order; when two allocations land on the
/// same millisecond the later one is bumped by a tick, which also gives a bot
/// reply an id one past its paired user message.
#[derive(Debug, Default)]
pub struct IdAllocator {
    last: i64,
}

impl IdAllocator {
    pub fn next(&mut self) -> i64 {
        let now = Utc::now().timestamp_millis();
        self.last = now.max(self.last + 1);
        self.last
    }
}
