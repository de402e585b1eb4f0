//! Contextual evaluator — turns accumulated session state into interviewer replies.
//!
//! Flow for a section submission:
//!   update_section → full context summary + recent history → render template →
//!   TextCompleter → extract score → append reply to memory.
//!
//! Flow for a freeform message (phased sessions):
//!   record input → phase template (or fixed fallback) → TextCompleter →
//!   append reply → advance out of Clarifications or Requirements.
//!
//! The completer is passed in per call; the evaluator never owns an LLM client.

use std::sync::{Arc, OnceLock};

use regex::Regex;
use serde::Serialize;
use tracing::{info, warn};

use crate::interview::change::ChangeHeuristic;
use crate::interview::error::InterviewError;
use crate::interview::phase::InterviewPhase;
use crate::interview::prompts::{
    HINT_TEMPLATE, INTERVIEWER_SYSTEM, NO_TEMPLATE_FALLBACK, SECTION_EVALUATION_TEMPLATE,
    TRANSITION_TEMPLATE, WRAP_UP_MESSAGE,
};
use crate::interview::section::SectionKey;
use crate::interview::session::Session;
use crate::llm_client::TextCompleter;

/// Number of memory entries shown to the LLM.
pub const DEFAULT_HISTORY_WINDOW: usize = 10;

#[derive(Debug, Clone, Serialize)]
pub struct SectionEvaluation {
    pub feedback: String,
    pub score: Option<u8>,
    /// Description of how the section changed, when the rewrite was material.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InterviewerReply {
    pub reply: String,
    pub phase: &'static str,
    pub advanced: bool,
}

/// Extracts the first `N/5` rating from a reply. Only 1–5 count as scores.
pub fn extract_score(reply: &str) -> Option<u8> {
    static SCORE: OnceLock<Regex> = OnceLock::new();
    let re = SCORE.get_or_init(|| {
        Regex::new(r"(?:^|[^0-9])([0-9])\s*/\s*5\b").expect("Invalid score regex")
    });

    let digit = re.captures(reply)?.get(1)?.as_str().parse::<u8>().ok()?;
    (1..=5).contains(&digit).then_some(digit)
}

pub struct ContextualEvaluator {
    history_window: usize,
    heuristic: Arc<dyn ChangeHeuristic>,
}

impl ContextualEvaluator {
    pub fn new(history_window: usize, heuristic: Arc<dyn ChangeHeuristic>) -> Self {
        Self {
            history_window,
            heuristic,
        }
    }

    /// Stores a section and asks the interviewer to evaluate it in the context of
    /// everything written so far.
    ///
    /// The section update is kept even when the completion fails; the assistant
    /// entry is only appended on success.
    pub async fn evaluate(
        &self,
        session: &mut Session,
        completer: &dyn TextCompleter,
        key: SectionKey,
        content: &str,
    ) -> Result<SectionEvaluation, InterviewError> {
        let change = session.update_section(key, content, self.heuristic.as_ref())?;
        if let Some(change) = &change {
            info!("Session {} {}: {}", session.id, key, change);
        }

        let context_summary = session.full_context_summary();
        let history = session.recent_history(self.history_window);
        let prompt = SECTION_EVALUATION_TEMPLATE.render(&[
            ("section", key.label()),
            ("content", content),
            ("question", session.question.as_str()),
            ("context_summary", context_summary.as_str()),
            ("conversation_history", history.as_str()),
        ])?;

        let feedback = completer.complete(INTERVIEWER_SYSTEM, &prompt).await?;
        let score = extract_score(&feedback);
        match score {
            Some(score) => session.record_score(key, score),
            None => warn!("Session {}: no N/5 score in feedback for {}", session.id, key),
        }

        session.record_assistant_output(format!("[{}] {}", key.label(), feedback));

        Ok(SectionEvaluation {
            feedback,
            score,
            change,
        })
    }

    /// Handles a freeform candidate message in a phased session.
    ///
    /// Phases without a template get the fixed fallback reply and no LLM call.
    pub async fn process_freeform_input(
        &self,
        session: &mut Session,
        completer: &dyn TextCompleter,
        text: &str,
    ) -> Result<InterviewerReply, InterviewError> {
        let phase = session.phase().ok_or_else(|| {
            InterviewError::InvalidState(
                "document-mode sessions take section submissions, not freeform messages"
                    .to_string(),
            )
        })?;

        session.record_candidate_input(text);

        let Some(template) = phase.template() else {
            return Ok(InterviewerReply {
                reply: NO_TEMPLATE_FALLBACK.to_string(),
                phase: phase.label(),
                advanced: false,
            });
        };

        let prompt = match phase {
            InterviewPhase::Introduction => {
                template.render(&[("question", session.question.as_str())])?
            }
            _ => {
                let history = session.recent_history(self.history_window);
                template.render(&[
                    ("question", session.question.as_str()),
                    ("candidate_input", text),
                    ("conversation_history", history.as_str()),
                ])?
            }
        };

        let reply = completer.complete(INTERVIEWER_SYSTEM, &prompt).await?;
        session.record_assistant_output(reply.clone());

        let advanced = phase.auto_advances();
        let phase = if advanced {
            session.advance_phase()?
        } else {
            phase
        };

        Ok(InterviewerReply {
            reply,
            phase: phase.label(),
            advanced,
        })
    }

    /// Asks the interviewer for a short, non-revealing hint on a section.
    pub async fn request_hint(
        &self,
        session: &mut Session,
        completer: &dyn TextCompleter,
        key: SectionKey,
    ) -> Result<String, InterviewError> {
        let context_summary = session.full_context_summary();
        let prompt = HINT_TEMPLATE.render(&[
            ("section", key.label()),
            ("question", session.question.as_str()),
            ("context_summary", context_summary.as_str()),
        ])?;

        let hint = completer.complete(INTERVIEWER_SYSTEM, &prompt).await?;
        session.record_assistant_output(format!("[Hint: {}] {}", key.label(), hint));
        Ok(hint)
    }

    /// Explicitly moves a phased session forward, for phases with no automatic trigger.
    /// The transition message is recorded as interviewer output. No LLM call.
    pub fn advance_with_transition(
        &self,
        session: &mut Session,
    ) -> Result<InterviewerReply, InterviewError> {
        let current = session.phase().ok_or_else(|| {
            InterviewError::InvalidState("document-mode sessions have no phases".to_string())
        })?;

        let message = match current.next() {
            Some(next) => TRANSITION_TEMPLATE.render(&[
                ("current", current.description()),
                ("next", next.description()),
            ])?,
            None => WRAP_UP_MESSAGE.to_string(),
        };

        let phase = session.advance_phase()?;
        session.record_assistant_output(message.clone());

        Ok(InterviewerReply {
            reply: message,
            phase: phase.label(),
            advanced: !current.is_terminal(),
        })
    }
}
