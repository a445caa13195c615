//! Conversation and composer state.
//!
//! DESIGN
//! ======
//! `ChatState` owns the message list, composer input, and pending
//! attachments. Sending is transactional: `begin_send` validates, appends
//! the user message optimistically, and hands back a [`SendTicket`] with
//! everything the transport layer needs; the ticket's `undo_index` lets
//! `fail_send` roll the optimistic append back. Every outcome clears the
//! `sending` flag.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

/// Greeting seeded into a brand-new conversation.
pub const GREETING: &str =
    "Hi! I can help with text, images, audio, and other files. Attach something and tell me what to do.";

/// Greeting used after the conversation is cleared.
pub const NEW_CHAT_GREETING: &str = "New chat. Ready when you are.";

/// Validation error when the composer is empty and nothing is attached.
pub const EMPTY_COMPOSER_ERROR: &str = "Type a message or attach a file first";

/// Shown in place of an assistant reply that came back blank.
pub const EMPTY_REPLY_PLACEHOLDER: &str = "(empty)";

/// Fallback error when a send fails without a server-provided message.
pub const SEND_FAILED_ERROR: &str = "Something went wrong while sending";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// File reference attached to a sent or received message. `uri` is only
/// present on assistant messages (the provider's hosted-file URI).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageAttachment {
    pub name: String,
    pub uri: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
    pub files: Vec<MessageAttachment>,
}

impl ChatMessage {
    fn assistant(text: &str) -> Self {
        Self { role: Role::Assistant, text: text.to_owned(), files: Vec::new() }
    }
}

/// A captured file waiting in the composer. Bytes are read eagerly at
/// capture time so picker, drag/drop, paste, and recorder attachments all
/// look identical from here on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingAttachment {
    pub name: String,
    pub mime_type: String,
    pub size: u64,
    pub bytes: Vec<u8>,
    /// Object URL for an inline preview; the caller revokes it when the
    /// attachment is removed or consumed by a send.
    pub preview_uri: Option<String>,
}

/// How a ticket's request should go out on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transport {
    /// No attachments: JSON to the text endpoint.
    Json,
    /// At least one attachment: multipart to the multimodal endpoint.
    Multipart,
}

/// Everything the transport layer needs to perform one send, plus the
/// index of the optimistic user message for rollback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SendTicket {
    pub prompt: String,
    pub attachments: Vec<PendingAttachment>,
    pub transport: Transport,
    pub undo_index: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatState {
    pub messages: Vec<ChatMessage>,
    pub input: String,
    pub pending: Vec<PendingAttachment>,
    pub sending: bool,
    pub error: String,
    pub drag_over: bool,
}

impl Default for ChatState {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::assistant(GREETING)],
            input: String::new(),
            pending: Vec::new(),
            sending: false,
            error: String::new(),
            drag_over: false,
        }
    }

    /// Append captured files in arrival order. No deduplication and no
    /// validation; the server is the arbiter of what it accepts.
    pub fn add_files(&mut self, files: Vec<PendingAttachment>) {
        self.pending.extend(files);
    }

    /// Remove the pending attachment at `index`, returning it so the
    /// caller can revoke its preview URL. Out-of-range is a no-op.
    pub fn remove_file(&mut self, index: usize) -> Option<PendingAttachment> {
        if index < self.pending.len() {
            Some(self.pending.remove(index))
        } else {
            None
        }
    }

    /// Reset to a single fresh greeting, clearing input, attachments, and
    /// any visible error. Returns the dropped attachments so preview URLs
    /// can be revoked. Idempotent.
    pub fn clear_chat(&mut self) -> Vec<PendingAttachment> {
        self.messages = vec![ChatMessage::assistant(NEW_CHAT_GREETING)];
        self.input.clear();
        self.error.clear();
        std::mem::take(&mut self.pending)
    }

    /// Start a send. On validation failure, sets a visible error and
    /// returns `None`. On success: appends the user message optimistically,
    /// consumes the composer, sets `sending`, and returns the ticket.
    /// Returns `None` without side effects while a send is in flight.
    pub fn begin_send(&mut self) -> Option<SendTicket> {
        if self.sending {
            return None;
        }
        self.error.clear();
        let prompt = self.input.trim().to_owned();
        if prompt.is_empty() && self.pending.is_empty() {
            self.error = EMPTY_COMPOSER_ERROR.to_owned();
            return None;
        }

        let attachments = std::mem::take(&mut self.pending);
        let undo_index = self.messages.len();
        self.messages.push(ChatMessage {
            role: Role::User,
            text: prompt.clone(),
            files: attachments
                .iter()
                .map(|a| MessageAttachment { name: a.name.clone(), uri: None })
                .collect(),
        });
        self.input.clear();
        self.sending = true;

        let transport =
            if attachments.is_empty() { Transport::Json } else { Transport::Multipart };
        Some(SendTicket { prompt, attachments, transport, undo_index })
    }

    /// Record a successful text-only reply.
    pub fn complete_text(&mut self, text: &str) {
        self.push_reply(text, Vec::new());
    }

    /// Record a successful multimodal reply with the provider's hosted
    /// file references.
    pub fn complete_multimodal(&mut self, text: &str, files: Vec<MessageAttachment>) {
        self.push_reply(text, files);
    }

    /// Roll back the optimistic user message and surface the error.
    pub fn fail_send(&mut self, ticket: &SendTicket, error: &str) {
        if ticket.undo_index < self.messages.len() {
            self.messages.remove(ticket.undo_index);
        }
        self.error =
            if error.is_empty() { SEND_FAILED_ERROR.to_owned() } else { error.to_owned() };
        self.sending = false;
    }

    fn push_reply(&mut self, text: &str, files: Vec<MessageAttachment>) {
        let text = if text.is_empty() { EMPTY_REPLY_PLACEHOLDER } else { text };
        self.messages.push(ChatMessage {
            role: Role::Assistant,
            text: text.to_owned(),
            files,
        });
        self.sending = false;
    }
}
