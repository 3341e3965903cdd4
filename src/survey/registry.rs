// src/survey/registry.rs

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{error::AppError, survey::navigation::SurveySession};

/// A live session plus the bookkeeping the server needs around it.
#[derive(Debug)]
pub struct SessionEntry {
    pub language: String,
    pub session: SurveySession,
    touched: Instant,
}

/// In-memory table of open survey sessions.
///
/// Sessions never share state with one another; the map is only the lookup.
/// The lock must not be held across a submission await.
#[derive(Clone)]
pub struct SessionRegistry {
    inner: Arc<Mutex<HashMap<Uuid, SessionEntry>>>,
    ttl: Duration,
}

impl SessionRegistry {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    /// Opens a session. Sessions idle past the TTL are dropped on the way,
    /// pending ones included: a submission task finishing later finds its
    /// session gone and only stores the record.
    pub async fn open<R>(
        &self,
        language: String,
        session: SurveySession,
        view: impl FnOnce(Uuid, &SessionEntry) -> R,
    ) -> R {
        let mut sessions = self.inner.lock().await;

        let before = sessions.len();
        let ttl = self.ttl;
        sessions.retain(|_, entry| entry.touched.elapsed() < ttl);
        if sessions.len() < before {
            tracing::debug!("Dropped {} idle survey sessions", before - sessions.len());
        }

        let id = Uuid::new_v4();
        let entry = SessionEntry {
            language,
            session,
            touched: Instant::now(),
        };
        let result = view(id, &entry);
        sessions.insert(id, entry);
        result
    }

    /// Runs `f` against the session with `id`.
    pub async fn with_session<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut SessionEntry) -> R,
    ) -> Result<R, AppError> {
        let mut sessions = self.inner.lock().await;
        let entry = sessions
            .get_mut(&id)
            .ok_or(AppError::NotFound("Survey session not found".to_string()))?;
        entry.touched = Instant::now();
        Ok(f(entry))
    }

    /// Discards a session. Returns false if there was none.
    pub async fn remove(&self, id: Uuid) -> bool {
        self.inner.lock().await.remove(&id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }
}
