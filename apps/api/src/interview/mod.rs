//! Interview engine: session state machine, conversation memory, contextual evaluation.
//! All LLM calls go through the injected TextCompleter; nothing here talks to Anthropic directly.

pub mod change;
pub mod error;
pub mod evaluator;
pub mod handlers;
pub mod memory;
pub mod phase;
pub mod prompts;
pub mod questions;
pub mod registry;
pub mod section;
pub mod session;
