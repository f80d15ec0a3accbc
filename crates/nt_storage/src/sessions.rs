use nt_core::{
    Error, LoadMoreOutcome, PaginationController, Result, SearchOutcome, SearchProvider, SearchRequest,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};
use uuid::Uuid;

pub type SessionId = Uuid;

struct Session {
    controller: Mutex<PaginationController>,
    /// Searches and load-mores that have started and not yet finished.
    fetches: AtomicUsize,
}

impl Session {
    fn new(controller: PaginationController) -> Self {
        Self {
            controller: Mutex::new(controller),
            fetches: AtomicUsize::new(0),
        }
    }
}

/// Marks one fetch as running until dropped.
struct FetchGuard<'a>(&'a AtomicUsize);

impl Drop for FetchGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// In-memory search sessions, one pagination controller each.
///
/// Every controller sits behind its own mutex. A search waits for any fetch
/// already running in its session; a load-more issued while a fetch is
/// running is rejected with [`LoadMoreOutcome::Busy`] instead of queueing.
/// Readers only wait for the mutex and never make a load-more busy.
pub struct SessionStore {
    provider: Arc<dyn SearchProvider>,
    sessions: RwLock<HashMap<SessionId, Arc<Session>>>,
}

impl SessionStore {
    pub fn new(provider: Arc<dyn SearchProvider>) -> Self {
        Self {
            provider,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub async fn create(&self) -> SessionId {
        let id = Uuid::new_v4();
        let controller = PaginationController::new(self.provider.clone());
        self.sessions
            .write()
            .await
            .insert(id, Arc::new(Session::new(controller)));
        info!("🆕 Session {} created", id);
        id
    }

    pub async fn remove(&self, id: SessionId) -> Result<()> {
        match self.sessions.write().await.remove(&id) {
            Some(_) => {
                info!("🗑️ Session {} removed", id);
                Ok(())
            }
            None => Err(Error::SessionNotFound(id.to_string())),
        }
    }

    /// Clears the session back to `Idle`, waiting for any running fetch.
    pub async fn reset(&self, id: SessionId) -> Result<()> {
        let session = self.session(id).await?;
        session.controller.lock().await.reset();
        info!("🧹 Session {} reset", id);
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Starts a new search in the session, merging up to `pages` pages.
    pub async fn search(&self, id: SessionId, request: SearchRequest, pages: u32) -> Result<SearchOutcome> {
        let session = self.session(id).await?;
        session.fetches.fetch_add(1, Ordering::SeqCst);
        let _fetch = FetchGuard(&session.fetches);
        let mut controller = session.controller.lock().await;
        controller.prefetch(request, pages).await
    }

    pub async fn load_more(&self, id: SessionId) -> Result<LoadMoreOutcome> {
        let session = self.session(id).await?;
        if session
            .fetches
            .compare_exchange(0, 1, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("Session {} busy, load more ignored", id);
            return Ok(LoadMoreOutcome::Busy);
        }
        let _fetch = FetchGuard(&session.fetches);
        let mut controller = session.controller.lock().await;
        controller.load_more().await
    }

    /// Runs `read` against the session's controller once no fetch is running.
    pub async fn with_session<T>(&self, id: SessionId, read: impl FnOnce(&PaginationController) -> T) -> Result<T> {
        let session = self.session(id).await?;
        let controller = session.controller.lock().await;
        Ok(read(&controller))
    }

    async fn session(&self, id: SessionId) -> Result<Arc<Session>> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::SessionNotFound(id.to_string()))
    }
}
