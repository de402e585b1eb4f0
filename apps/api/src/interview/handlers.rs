//! Axum route handlers for the Interview API.
//!
//! Every mutating handler holds the session lock for the whole exchange and
//! refreshes the session's expiry only after the exchange succeeds.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::error::InterviewError;
use crate::interview::memory::Role;
use crate::interview::phase::InterviewPhase;
use crate::interview::section::SectionKey;
use crate::interview::session::{InterviewMode, Progress, Session, SessionId};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct StartRequest {
    #[serde(default)]
    pub mode: InterviewMode,
}

#[derive(Debug, Serialize)]
pub struct StartResponse {
    pub session_id: SessionId,
    pub question: String,
    pub mode: InterviewMode,
    pub phase: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub reply: String,
    pub phase: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct SectionRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct SectionResponse {
    pub section: SectionKey,
    pub feedback: String,
    pub score: Option<u8>,
}

#[derive(Debug, Serialize)]
pub struct HintResponse {
    pub section: SectionKey,
    pub hint: String,
}

#[derive(Debug, Serialize)]
pub struct SectionView {
    pub key: SectionKey,
    pub label: &'static str,
    pub content: String,
    pub score: Option<u8>,
}

#[derive(Debug, Serialize)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub question: String,
    pub mode: InterviewMode,
    pub phase: &'static str,
    pub phase_key: Option<InterviewPhase>,
    pub progress: Progress,
    pub sections: Vec<SectionView>,
    pub memory_length: usize,
    pub candidate_turns: usize,
    pub interviewer_turns: usize,
    /// Latest interviewer message, when the interviewer spoke last.
    pub last_reply: Option<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
}

#[derive(Debug, Serialize)]
pub struct EndResponse {
    pub ended: bool,
}

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub questions: Vec<String>,
}

fn parse_section(raw: &str) -> Result<SectionKey, InterviewError> {
    raw.parse::<SectionKey>()
        .map_err(|e| InterviewError::UnknownSection(e.0))
}

fn snapshot(session: &Session, expires_at: Option<DateTime<Utc>>) -> SessionSnapshot {
    let sections = session
        .filled_sections()
        .into_iter()
        .map(|(key, content)| SectionView {
            key,
            label: key.label(),
            content: content.to_string(),
            score: session.score(key),
        })
        .collect();

    SessionSnapshot {
        session_id: session.id,
        question: session.question.clone(),
        mode: session.mode(),
        phase: session.current_phase_label(),
        phase_key: session.phase(),
        progress: session.progress(),
        sections,
        memory_length: session.memory.len(),
        candidate_turns: session.memory.count(Role::Candidate),
        interviewer_turns: session.memory.count(Role::Assistant),
        last_reply: session
            .memory
            .last()
            .filter(|entry| entry.role == Role::Assistant)
            .map(|entry| entry.text.clone()),
        created_at: session.created_at,
        expires_at,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/interview/start
///
/// Picks a random question and opens a session. Fails with 503 when no
/// completion backend is configured, so misconfiguration never surfaces mid-interview.
///
/// A request without a JSON body starts a phased session; a JSON body that does
/// not parse (unknown mode, malformed JSON) is a 400.
pub async fn handle_start(
    State(state): State<AppState>,
    body: Result<Json<StartRequest>, JsonRejection>,
) -> Result<Json<StartResponse>, AppError> {
    let request = match body {
        Ok(Json(request)) => request,
        Err(JsonRejection::MissingJsonContentType(_)) => StartRequest::default(),
        Err(rejection) => return Err(AppError::Validation(rejection.body_text())),
    };
    state.completer()?;

    let question = state
        .questions
        .pick()
        .ok_or_else(|| InterviewError::ConfigurationMissing("question bank is empty".to_string()))?
        .to_string();

    let (session_id, handle) = state.sessions.start(question.clone(), request.mode).await;
    let phase = handle.lock().await.current_phase_label();

    Ok(Json(StartResponse {
        session_id,
        question,
        mode: request.mode,
        phase,
    }))
}

/// POST /api/interview/:id/message
///
/// Freeform candidate input for phased sessions.
pub async fn handle_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<MessageRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    let completer = state.completer()?;
    let handle = state.sessions.lookup(id).await?;
    let mut session = handle.lock().await;

    let reply = state
        .evaluator
        .process_freeform_input(&mut session, completer.as_ref(), &request.text)
        .await?;
    state.sessions.touch(id).await;

    if reply.advanced {
        info!("Session {id} moved to {}", reply.phase);
    }

    Ok(Json(MessageResponse {
        reply: reply.reply,
        phase: reply.phase,
    }))
}

/// POST /api/interview/:id/sections/:section
///
/// Stores a design-document section and returns the interviewer's evaluation.
/// Blank content is accepted and stored; it just drops out of the context summary.
pub async fn handle_submit_section(
    State(state): State<AppState>,
    Path((id, section)): Path<(Uuid, String)>,
    Json(request): Json<SectionRequest>,
) -> Result<Json<SectionResponse>, AppError> {
    let key = parse_section(&section)?;
    let completer = state.completer()?;
    let handle = state.sessions.lookup(id).await?;
    let mut session = handle.lock().await;

    let evaluation = state
        .evaluator
        .evaluate(&mut session, completer.as_ref(), key, &request.content)
        .await?;
    state.sessions.touch(id).await;

    Ok(Json(SectionResponse {
        section: key,
        feedback: evaluation.feedback,
        score: evaluation.score,
    }))
}

/// POST /api/interview/:id/sections/:section/hint
pub async fn handle_hint(
    State(state): State<AppState>,
    Path((id, section)): Path<(Uuid, String)>,
) -> Result<Json<HintResponse>, AppError> {
    let key = parse_section(&section)?;
    let completer = state.completer()?;
    let handle = state.sessions.lookup(id).await?;
    let mut session = handle.lock().await;

    let hint = state
        .evaluator
        .request_hint(&mut session, completer.as_ref(), key)
        .await?;
    state.sessions.touch(id).await;

    Ok(Json(HintResponse { section: key, hint }))
}

/// POST /api/interview/:id/advance
///
/// Caller-driven move to the next phase. Introduction and High-Level Design onward
/// have no automatic trigger.
pub async fn handle_advance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    let handle = state.sessions.lookup(id).await?;
    let mut session = handle.lock().await;

    let reply = state.evaluator.advance_with_transition(&mut session)?;
    state.sessions.touch(id).await;

    Ok(Json(MessageResponse {
        reply: reply.reply,
        phase: reply.phase,
    }))
}

/// GET /api/interview/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let handle = state.sessions.lookup(id).await?;
    let expires_at = state.sessions.expires_at(id).await;
    let session = handle.lock().await;
    Ok(Json(snapshot(&session, expires_at)))
}

/// GET /api/interview/:id/validate
pub async fn handle_validate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Json<ValidateResponse> {
    Json(ValidateResponse {
        valid: state.sessions.get(id).await.is_some(),
    })
}

/// DELETE /api/interview/:id
///
/// Idempotent: ending an unknown or already-ended session still succeeds.
pub async fn handle_end(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Json<EndResponse> {
    if state.sessions.end(id).await {
        info!("Ended interview session {id}");
    }
    Json(EndResponse { ended: true })
}

/// GET /api/questions
pub async fn handle_list_questions(State(state): State<AppState>) -> Json<QuestionsResponse> {
    Json(QuestionsResponse {
        questions: state.questions.list().to_vec(),
    })
}
