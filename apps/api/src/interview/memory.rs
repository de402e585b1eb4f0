//! Conversation memory — the append-only transcript of one interview session.
//!
//! The full log is kept for the life of the session; prompts only ever see a
//! bounded window of the most recent entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Candidate,
    Assistant,
}

impl Role {
    /// Speaker tag used when rendering history into prompts.
    pub fn speaker(self) -> &'static str {
        match self {
            Role::Candidate => "Candidate",
            Role::Assistant => "Interviewer",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryEntry {
    pub role: Role,
    pub text: String,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct ConversationMemory {
    entries: Vec<MemoryEntry>,
}

impl ConversationMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, role: Role, text: impl Into<String>) {
        self.entries.push(MemoryEntry {
            role,
            text: text.into(),
            at: Utc::now(),
        });
    }

    pub fn push_candidate(&mut self, text: impl Into<String>) {
        self.push(Role::Candidate, text);
    }

    pub fn push_assistant(&mut self, text: impl Into<String>) {
        self.push(Role::Assistant, text);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&MemoryEntry> {
        self.entries.last()
    }

    /// The last `window` entries, oldest first.
    pub fn recent(&self, window: usize) -> &[MemoryEntry] {
        let start = self.entries.len().saturating_sub(window);
        &self.entries[start..]
    }

    /// The last `window` entries rendered as `Speaker: text` lines.
    pub fn render_recent(&self, window: usize) -> String {
        self.recent(window)
            .iter()
            .map(|e| format!("{}: {}", e.role.speaker(), e.text))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn count(&self, role: Role) -> usize {
        self.entries.iter().filter(|e| e.role == role).count()
    }
}
