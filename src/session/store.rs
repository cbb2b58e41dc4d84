//! In-memory session storage with idle expiry.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::Serialize;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::dataset::{DatasetBrowser, DatasetSource};
use crate::error::{AppError, Result};
use crate::prediction::PredictionSlot;

/// State owned by one explorer session.
pub struct Session {
    pub browser: DatasetBrowser,
    pub prediction: Mutex<PredictionSlot>,
}

impl Session {
    pub fn new(source: Arc<dyn DatasetSource>) -> Self {
        Self {
            browser: DatasetBrowser::new(source),
            prediction: Mutex::new(PredictionSlot::default()),
        }
    }
}

/// Session counters for the health endpoint.
#[derive(Debug, Serialize)]
pub struct SessionStats {
    pub active_sessions: u64,
    pub max_sessions: u64,
    pub idle_timeout_secs: u64,
}

/// Sessions keyed by id, dropped after sitting idle.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Cache<Uuid, Arc<Session>>,
    max_sessions: u64,
    idle: Duration,
}

impl SessionStore {
    pub fn new(max_sessions: u64, idle: Duration) -> Self {
        Self {
            sessions: Cache::builder()
                .max_capacity(max_sessions)
                .time_to_idle(idle)
                .build(),
            max_sessions,
            idle,
        }
    }

    /// Register a new, empty session.
    pub async fn create(&self, source: Arc<dyn DatasetSource>) -> (Uuid, Arc<Session>) {
        let id = Uuid::new_v4();
        let session = Arc::new(Session::new(source));
        self.sessions.insert(id, session.clone()).await;
        tracing::debug!(session_id = %id, "session created");
        (id, session)
    }

    pub async fn get(&self, id: Uuid) -> Result<Arc<Session>> {
        self.sessions
            .get(&id)
            .await
            .ok_or(AppError::SessionNotFound(id))
    }

    pub async fn stats(&self) -> SessionStats {
        self.sessions.run_pending_tasks().await;
        SessionStats {
            active_sessions: self.sessions.entry_count(),
            max_sessions: self.max_sessions,
            idle_timeout_secs: self.idle.as_secs(),
        }
    }
}
