//! Session state machine — one candidate's interview.
//!
//! A session follows one of two progression models, chosen at creation:
//! - `Phased`: a single current phase that only moves forward.
//! - `Document`: six independently editable design-document sections.
//!
//! Expiry is owned by the session registry, not by the session itself.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::interview::change::ChangeHeuristic;
use crate::interview::error::InterviewError;
use crate::interview::memory::ConversationMemory;
use crate::interview::phase::InterviewPhase;
use crate::interview::section::SectionKey;

pub type SessionId = Uuid;

/// Label reported as the "phase" of a document-mode session.
pub const DOCUMENT_LABEL: &str = "Design Document";

/// Rendered in place of the conversation history before anything was said.
pub const NO_HISTORY: &str = "(no conversation yet)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewMode {
    #[default]
    Phased,
    Document,
}

#[derive(Debug, Clone)]
pub enum Track {
    Phased {
        phase: InterviewPhase,
    },
    Document {
        sections: HashMap<SectionKey, String>,
        scores: HashMap<SectionKey, u8>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub question: String,
    pub track: Track,
    pub memory: ConversationMemory,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn create(id: SessionId, question: impl Into<String>, mode: InterviewMode) -> Self {
        let track = match mode {
            InterviewMode::Phased => Track::Phased {
                phase: InterviewPhase::Introduction,
            },
            InterviewMode::Document => Track::Document {
                sections: HashMap::new(),
                scores: HashMap::new(),
            },
        };

        Self {
            id,
            question: question.into(),
            track,
            memory: ConversationMemory::new(),
            created_at: Utc::now(),
        }
    }

    pub fn mode(&self) -> InterviewMode {
        match self.track {
            Track::Phased { .. } => InterviewMode::Phased,
            Track::Document { .. } => InterviewMode::Document,
        }
    }

    /// Current phase, `None` for document-mode sessions.
    pub fn phase(&self) -> Option<InterviewPhase> {
        match self.track {
            Track::Phased { phase } => Some(phase),
            Track::Document { .. } => None,
        }
    }

    pub fn current_phase_label(&self) -> &'static str {
        match self.track {
            Track::Phased { phase } => phase.label(),
            Track::Document { .. } => DOCUMENT_LABEL,
        }
    }

    pub fn record_candidate_input(&mut self, text: impl Into<String>) {
        self.memory.push_candidate(text);
    }

    pub fn record_assistant_output(&mut self, text: impl Into<String>) {
        self.memory.push_assistant(text);
    }

    /// Moves to the next phase. At `WrapUp` this is a no-op, not an error.
    /// Returns the phase after the call.
    pub fn advance_phase(&mut self) -> Result<InterviewPhase, InterviewError> {
        match &mut self.track {
            Track::Phased { phase } => {
                if let Some(next) = phase.next() {
                    debug!("Session {} advancing {:?} -> {:?}", self.id, phase, next);
                    *phase = next;
                }
                Ok(*phase)
            }
            Track::Document { .. } => Err(InterviewError::InvalidState(
                "document-mode sessions have no phases to advance".to_string(),
            )),
        }
    }

    /// Overwrites a section with the submitted content.
    ///
    /// When the previous content was non-blank and the rewrite is material, the
    /// heuristic's description is appended to memory as a candidate note and returned.
    pub fn update_section(
        &mut self,
        key: SectionKey,
        content: impl Into<String>,
        heuristic: &dyn ChangeHeuristic,
    ) -> Result<Option<String>, InterviewError> {
        let content = content.into();
        let Track::Document { sections, .. } = &mut self.track else {
            return Err(InterviewError::InvalidState(
                "phased sessions do not accept design-document sections".to_string(),
            ));
        };

        let change = sections
            .get(&key)
            .and_then(|previous| heuristic.describe(previous, &content));
        sections.insert(key, content);

        if let Some(description) = &change {
            self.memory.push_candidate(format!(
                "[Revision of {}] The candidate {}.",
                key.label(),
                description
            ));
        }

        Ok(change)
    }

    /// Last submitted content for a section, blank or not.
    pub fn section(&self, key: SectionKey) -> Option<&str> {
        match &self.track {
            Track::Document { sections, .. } => sections.get(&key).map(String::as_str),
            Track::Phased { .. } => None,
        }
    }

    /// Sections with non-blank content, in display order.
    pub fn filled_sections(&self) -> Vec<(SectionKey, &str)> {
        SectionKey::ALL
            .into_iter()
            .filter_map(|key| {
                self.section(key)
                    .filter(|content| !content.trim().is_empty())
                    .map(|content| (key, content))
            })
            .collect()
    }

    pub fn record_score(&mut self, key: SectionKey, score: u8) {
        if let Track::Document { scores, .. } = &mut self.track {
            scores.insert(key, score);
        }
    }

    pub fn score(&self, key: SectionKey) -> Option<u8> {
        match &self.track {
            Track::Document { scores, .. } => scores.get(&key).copied(),
            Track::Phased { .. } => None,
        }
    }

    pub fn progress(&self) -> Progress {
        match &self.track {
            Track::Phased { phase } => Progress {
                completed: phase.index(),
                total: InterviewPhase::ALL.len(),
            },
            Track::Document { .. } => Progress {
                completed: self.filled_sections().len(),
                total: SectionKey::ALL.len(),
            },
        }
    }

    /// The question followed by every non-blank section, in fixed section order.
    pub fn full_context_summary(&self) -> String {
        let mut summary = format!("Question: {}", self.question);
        for (key, content) in self.filled_sections() {
            summary.push_str(&format!("\n\n{}:\n{}", key.label(), content.trim()));
        }
        summary
    }

    /// The most recent `window` memory entries as `Speaker: text` lines.
    pub fn recent_history(&self, window: usize) -> String {
        if self.memory.is_empty() {
            return NO_HISTORY.to_string();
        }
        self.memory.render_recent(window)
    }
}
