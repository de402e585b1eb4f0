//! Scripted `TextCompleter` for tests.
//!
//! Replies are consumed in order; every call is recorded so tests can assert
//! on the exact persona and prompt the interview engine produced.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{LlmError, TextCompleter};

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub system: String,
    pub prompt: String,
}

#[derive(Debug)]
enum ScriptedReply {
    Text(String),
    Failure { status: u16, message: String },
}

#[derive(Debug, Clone, Default)]
pub struct ScriptedCompleter {
    replies: Arc<Mutex<VecDeque<ScriptedReply>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl ScriptedCompleter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reply(self, text: impl Into<String>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(ScriptedReply::Text(text.into()));
        self
    }

    pub fn with_failure(self, status: u16, message: impl Into<String>) -> Self {
        self.replies.lock().unwrap().push_back(ScriptedReply::Failure {
            status,
            message: message.into(),
        });
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl TextCompleter for ScriptedCompleter {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, LlmError> {
        self.calls.lock().unwrap().push(RecordedCall {
            system: system.to_string(),
            prompt: prompt.to_string(),
        });

        match self.replies.lock().unwrap().pop_front() {
            Some(ScriptedReply::Text(text)) => Ok(text),
            Some(ScriptedReply::Failure { status, message }) => {
                Err(LlmError::Api { status, message })
            }
            None => Err(LlmError::EmptyContent),
        }
    }
}
