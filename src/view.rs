//! Render projection of the session state.
//!
//! A pure function of {history, pending, draft, connected}; render surfaces
//! consume the resulting `ChatView` and keep scrolling, styling, and other
//! presentation concerns to themselves.

use crate::backend::ChatBackend;
use crate::message::{Message, Sender};
use crate::session::ChatSession;
use chrono::{DateTime, Local};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BubbleRole {
    User,
    Bot,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct Bubble {
    pub id: i64,
    pub role: BubbleRole,
    pub text: String,
    /// Wall-clock time of the message, HH:MM, for display next to the bubble.
    pub time: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatView {
    pub bubbles: Vec<Bubble>,
    /// One transient typing placeholder shown after the real history while a
    /// request is pending. Not a message; never persisted.
    pub typing: bool,
    pub input_enabled: bool,
    pub send_enabled: bool,
    pub connected: bool,
}

pub fn project<B: ChatBackend>(session: &ChatSession<B>) -> ChatView {
    let pending = session.pending();
    ChatView {
        bubbles: session.history().iter().map(bubble).collect(),
        typing: pending,
        input_enabled: !pending,
        send_enabled: !pending && !session.draft().trim().is_empty(),
        connected: session.connected(),
    }
}

fn bubble(message: &Message) -> Bubble {
    let role = match (message.sender, message.is_error) {
        (Sender::User, _) => BubbleRole::User,
        (Sender::Bot, false) => BubbleRole::Bot,
        (Sender::Bot, true) => BubbleRole::Error,
    };
    Bubble {
        id: message.id,
        role,
        text: message.text.clone(),
        time: format_time(&message.timestamp),
    }
}

/// HH:MM in local time; a timestamp that fails to parse is shown as-is.
fn format_time(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(dt) => dt.with_timezone(&Local).format("%H:%M").to_string(),
        Err(_) => timestamp.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ChatReply;
    use async_trait::async_trait;

    struct StubBackend {
        chat: Result<ChatReply, String>,
    }

    #[async_trait]
    impl ChatBackend for StubBackend {
        async fn health(&self) -> Result<(), String> {
            Ok(())
        }

        async fn chat(&self, _message: &str) -> Result<ChatReply, String> {
            self.chat.clone()
        }
    }

    fn replying(response: &str) -> StubBackend {
        StubBackend {
            chat: Ok(ChatReply {
                response: response.to_string(),
                timestamp: None,
            }),
        }
    }

    fn failing() -> StubBackend {
        StubBackend {
            chat: Err("boom".to_string()),
        }
    }

    #[test]
    fn idle_session_projects_no_typing_placeholder() {
        let session = ChatSession::new(replying("x"));
        let view = project(&session);

        assert_eq!(view.bubbles.len(), 1);
        assert_eq!(view.bubbles[0].role, BubbleRole::Bot);
        assert!(!view.typing);
        assert!(view.input_enabled);
    }

    #[test]
    fn send_is_disabled_for_blank_drafts() {
        let mut session = ChatSession::new(replying("x"));
        assert!(!project(&session).send_enabled);

        session.set_draft("   ");
        assert!(!project(&session).send_enabled);

        session.set_draft("hello");
        assert!(project(&session).send_enabled);
    }

    #[tokio::test]
    async fn roles_follow_sender_and_error_flag() {
        let mut session = ChatSession::new(replying("Hi there"));
        session.set_draft("hello");
        session.submit().await;

        session.set_draft("again");
        let view = project(&session);
        assert_eq!(
            view.bubbles.iter().map(|b| b.role).collect::<Vec<_>>(),
            [BubbleRole::Bot, BubbleRole::User, BubbleRole::Bot]
        );

        let mut session = ChatSession::new(failing());
        session.set_draft("hello");
        session.submit().await;
        let view = project(&session);
        assert_eq!(view.bubbles[2].role, BubbleRole::Error);
    }

    #[test]
    fn unparseable_timestamp_is_shown_as_is() {
        assert_eq!(format_time("not a date"), "not a date");
        assert_eq!(
            format_time("2024-01-01T00:00:00Z").len(),
            5,
            "parseable timestamps render as HH:MM"
        );
    }
}
