//! Session registry — maps session IDs to live interview sessions.
//!
//! `SessionStore` is the seam for swapping storage backends; `InMemorySessionStore`
//! is the default and keeps everything in process memory.
//!
//! Each session sits behind its own async mutex. Callers hold that lock for a
//! whole exchange (including the LLM call), so writes to one session are
//! serialized while other sessions proceed independently.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

use crate::interview::error::InterviewError;
use crate::interview::session::{InterviewMode, Session, SessionId};

pub type SessionHandle = Arc<Mutex<Session>>;

/// Default idle lifetime of a session.
pub const DEFAULT_TTL_MINUTES: i64 = 120;
/// Longest accepted idle lifetime (one year).
pub const MAX_TTL_MINUTES: i64 = 365 * 24 * 60;
/// How often the background sweeper drops expired sessions.
pub const SWEEP_INTERVAL_SECS: u64 = 300;

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Sweeps expired sessions, then creates and stores a new one.
    async fn start(&self, question: String, mode: InterviewMode) -> (SessionId, SessionHandle);

    /// Returns the session if present and unexpired.
    async fn get(&self, id: SessionId) -> Option<SessionHandle>;

    /// Like `get`, but tells an unknown ID apart from an expired one.
    async fn lookup(&self, id: SessionId) -> Result<SessionHandle, InterviewError>;

    async fn expires_at(&self, id: SessionId) -> Option<DateTime<Utc>>;

    /// Pushes expiry to now + TTL. Returns false if the session is gone.
    async fn touch(&self, id: SessionId) -> bool;

    /// Removes the session if present. Never fails.
    async fn end(&self, id: SessionId) -> bool;

    /// Removes every expired session, returning how many were dropped.
    async fn sweep(&self) -> usize;
}

struct TrackedSession {
    handle: SessionHandle,
    expires_at: DateTime<Utc>,
}

pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, TrackedSession>>,
    ttl: Duration,
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new(Duration::minutes(DEFAULT_TTL_MINUTES))
    }
}

impl InMemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Number of tracked sessions, expired or not.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Expiry for a session touched at `now`. Saturates instead of overflowing.
    fn expiry_from(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_add_signed(self.ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    async fn start_at(
        &self,
        question: String,
        mode: InterviewMode,
        now: DateTime<Utc>,
    ) -> (SessionId, SessionHandle) {
        self.sweep_at(now).await;

        let id = Uuid::new_v4();
        let handle = Arc::new(Mutex::new(Session::create(id, question, mode)));

        self.sessions.write().await.insert(
            id,
            TrackedSession {
                handle: handle.clone(),
                expires_at: self.expiry_from(now),
            },
        );

        info!("Started interview session {id} ({mode:?})");
        debug!("{} interview session(s) tracked", self.len().await);
        (id, handle)
    }

    async fn lookup_at(
        &self,
        id: SessionId,
        now: DateTime<Utc>,
    ) -> Result<SessionHandle, InterviewError> {
        let sessions = self.sessions.read().await;
        let tracked = sessions
            .get(&id)
            .ok_or(InterviewError::SessionNotFound(id))?;

        if now > tracked.expires_at {
            return Err(InterviewError::SessionExpired(id));
        }

        Ok(tracked.handle.clone())
    }

    async fn touch_at(&self, id: SessionId, now: DateTime<Utc>) -> bool {
        let expires_at = self.expiry_from(now);
        match self.sessions.write().await.get_mut(&id) {
            Some(tracked) => {
                tracked.expires_at = expires_at;
                true
            }
            None => false,
        }
    }

    async fn sweep_at(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, tracked| now <= tracked.expires_at);
        let removed = before - sessions.len();
        if removed > 0 {
            info!("Swept {removed} expired interview session(s)");
        }
        removed
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn start(&self, question: String, mode: InterviewMode) -> (SessionId, SessionHandle) {
        self.start_at(question, mode, Utc::now()).await
    }

    async fn get(&self, id: SessionId) -> Option<SessionHandle> {
        self.lookup_at(id, Utc::now()).await.ok()
    }

    async fn lookup(&self, id: SessionId) -> Result<SessionHandle, InterviewError> {
        self.lookup_at(id, Utc::now()).await
    }

    async fn expires_at(&self, id: SessionId) -> Option<DateTime<Utc>> {
        self.sessions.read().await.get(&id).map(|t| t.expires_at)
    }

    async fn touch(&self, id: SessionId) -> bool {
        self.touch_at(id, Utc::now()).await
    }

    async fn end(&self, id: SessionId) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        self.sweep_at(Utc::now()).await;
        debug!("End session {id}: removed={removed}");
        removed
    }

    async fn sweep(&self) -> usize {
        self.sweep_at(Utc::now()).await
    }
}

/// Periodically drops expired sessions so idle ones do not wait for the next start or end.
pub fn spawn_sweeper(store: Arc<dyn SessionStore>, every: std::time::Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            let removed = store.sweep().await;
            debug!("Periodic sweep removed {removed} session(s)");
        }
    })
}
