use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::session::RequestId;

pub const THINKING_TEXT: &str = "Thinking...";
pub const ASSISTANT_ERROR_TEXT: &str = "⚠ Error: Unable to get response.";
pub const NETWORK_ERROR_TEXT: &str = "⚠ Network error.";

/// A persisted exchange with the assistant. Turns are append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub user_message: String,
    pub assistant_reply: String,
    /// RFC3339 timestamp, when the store provides one.
    #[serde(default)]
    pub sent_at: Option<String>,
}

/// Reply from the `/assistant` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AssistantReply {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub reply: Option<String>,
}

impl AssistantReply {
    /// Text to show for this reply; non-success statuses get the fixed error turn.
    pub fn display_text(&self) -> String {
        match (self.status.as_deref(), self.reply.as_deref()) {
            (Some("success"), Some(reply)) => clean_reply(reply),
            _ => ASSISTANT_ERROR_TEXT.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success") && self.reply.is_some()
    }
}

static FENCED_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```[\s\S]*?```").expect("valid fenced block pattern"));

/// Strip markdown decoration the chat panel cannot show.
pub fn clean_reply(text: &str) -> String {
    FENCED_BLOCK
        .replace_all(text, "")
        .replace("```", "")
        .replace('`', "")
        .replace("**", "")
        .replace("\\n", "\n")
        .trim()
        .to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptEntry {
    User(String),
    Assistant(String),
    /// Transient placeholder for the outstanding request.
    Thinking { token: RequestId },
}

impl TranscriptEntry {
    pub fn text(&self) -> &str {
        match self {
            Self::User(text) | Self::Assistant(text) => text,
            Self::Thinking { .. } => THINKING_TEXT,
        }
    }
}

/// Chat panel contents.
///
/// Holds at most one `Thinking` placeholder, always tied to the most recent
/// send. Replies to older sends are still shown but never touch it.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
    outstanding: Option<RequestId>,
    last_token: RequestId,
}

impl Transcript {
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn outstanding(&self) -> Option<RequestId> {
        self.outstanding
    }

    fn placeholder_index(&self) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| matches!(e, TranscriptEntry::Thinking { .. }))
    }

    /// Append a user message and a fresh placeholder. Returns the token the
    /// reply must carry, or `None` for blank input.
    pub fn begin(&mut self, text: &str) -> Option<RequestId> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        if let Some(index) = self.placeholder_index() {
            self.entries.remove(index);
        }

        self.last_token += 1;
        let token = self.last_token;
        self.entries.push(TranscriptEntry::User(text.to_string()));
        self.entries.push(TranscriptEntry::Thinking { token });
        self.outstanding = Some(token);
        Some(token)
    }

    /// Show the reply for `token`. Only the outstanding token replaces the placeholder.
    pub fn resolve(&mut self, token: RequestId, text: String) {
        if self.outstanding == Some(token) {
            self.outstanding = None;
            match self.placeholder_index() {
                Some(index) => self.entries[index] = TranscriptEntry::Assistant(text),
                None => self.entries.push(TranscriptEntry::Assistant(text)),
            }
            return;
        }

        log::debug!("reply for superseded chat request {token}");
        match self.placeholder_index() {
            Some(index) => self
                .entries
                .insert(index, TranscriptEntry::Assistant(text)),
            None => self.entries.push(TranscriptEntry::Assistant(text)),
        }
    }

    /// Put stored turns ahead of anything typed in this session.
    pub fn prepend_history(&mut self, turns: &[ChatTurn]) {
        let mut merged: Vec<TranscriptEntry> = turns
            .iter()
            .flat_map(|turn| {
                [
                    TranscriptEntry::User(turn.user_message.clone()),
                    TranscriptEntry::Assistant(clean_reply(&turn.assistant_reply)),
                ]
            })
            .collect();
        merged.append(&mut self.entries);
        self.entries = merged;
    }
}
