use std::sync::Arc;

use crate::config::Config;
use crate::interview::change::ChangeHeuristic;
use crate::interview::error::InterviewError;
use crate::interview::evaluator::ContextualEvaluator;
use crate::interview::questions::QuestionBank;
use crate::interview::registry::SessionStore;
use crate::llm_client::TextCompleter;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable session registry. Default: InMemorySessionStore.
    pub sessions: Arc<dyn SessionStore>,
    /// `None` when no API key is configured; interviews cannot start until one is.
    pub completer: Option<Arc<dyn TextCompleter>>,
    pub evaluator: Arc<ContextualEvaluator>,
    pub questions: Arc<QuestionBank>,
}

impl AppState {
    pub fn new(
        config: &Config,
        sessions: Arc<dyn SessionStore>,
        completer: Option<Arc<dyn TextCompleter>>,
        heuristic: Arc<dyn ChangeHeuristic>,
        questions: QuestionBank,
    ) -> Self {
        Self {
            evaluator: Arc::new(ContextualEvaluator::new(config.history_window, heuristic)),
            sessions,
            completer,
            questions: Arc::new(questions),
        }
    }

    pub fn completer(&self) -> Result<Arc<dyn TextCompleter>, InterviewError> {
        self.completer.clone().ok_or_else(|| {
            InterviewError::ConfigurationMissing("ANTHROPIC_API_KEY is not set".to_string())
        })
    }
}
