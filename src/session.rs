//! The chat session controller.
//!
//! Owns all conversation state and mediates between user input, the remote
//! backend, and whatever render surface is projecting it. Each in-flight
//! request moves the session Idle -> Sending -> Idle; the guard in `submit`
//! keeps at most one request pending at a time.

use crate::backend::ChatBackend;
use crate::message::{IdAllocator, Message};
use tracing::{info, instrument, warn};
use uuid::Uuid;

pub struct ChatSession<B: ChatBackend> {
    id: Uuid,
    backend: B,
    history: Vec<Message>,
    draft: String,
    pending: bool,
    connected: bool,
    ids: IdAllocator,
}

impl<B: ChatBackend> ChatSession<B> {
    /// Creates a session with a single canned greeting in its history.
    pub fn new(backend: B) -> Self {
        let mut ids = IdAllocator::default();
        let greeting = Message::greeting(ids.next());
        Self {
            id: Uuid::new_v4(),
            backend,
            history: vec![greeting],
            draft: String::new(),
            pending: false,
            connected: false,
            ids,
        }
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn pending(&self) -> bool {
        self.pending
    }

    pub fn connected(&self) -> bool {
        self.connected
    }

    pub fn set_draft(&mut self, draft: impl Into<String>) {
        self.draft = draft.into();
    }

    /// One reachability check against the health endpoint, run at session
    /// start. Failures are logged, never surfaced as chat messages, and do
    /// not block later submits.
    #[instrument(skip(self), fields(session = %self.id))]
    pub async fn probe_connectivity(&mut self) {
        match self.backend.health().await {
            Ok(()) => self.connected = true,
            Err(e) => {
                self.connected = false;
                warn!(error = %e, "connection check failed");
            }
        }
    }

    /// Submits the current draft as one chat turn. A no-op when the trimmed
    /// draft is empty or a request is already pending. Otherwise the history
    /// grows by exactly two messages once the request settles: the user
    /// message, then either the reply or a fixed error notice. `pending` is
    /// cleared on every path.
    #[instrument(skip(self), fields(session = %self.id))]
    pub async fn submit(&mut self) {
        if self.draft.trim().is_empty() || self.pending {
            return;
        }

        // The request body carries the text exactly as typed, untrimmed.
        let text = std::mem::take(&mut self.draft);
        let user_id = self.ids.next();
        self.history.push(Message::user(user_id, text.clone()));
        self.pending = true;

        match self.backend.chat(&text).await {
            Ok(reply) => {
                info!(user_id, "chat turn completed");
                let id = self.ids.next();
                self.history
                    .push(Message::bot(id, reply.response, reply.timestamp));
            }
            Err(e) => {
                warn!(user_id, error = %e, "chat turn failed");
                let id = self.ids.next();
                self.history.push(Message::error_notice(id));
            }
        }
        self.pending = false;
    }

    /// Replaces the history with a fresh single-greeting sequence. Leaves
    /// `connected` and `pending` untouched.
    pub fn reset_conversation(&mut self) {
        info!(session = %self.id, "conversation reset");
        let greeting = Message::greeting(self.ids.next());
        self.history = vec![greeting];
    }
}
