use super::Session;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

/// A session shared between the store and the request currently holding it.
///
/// Handlers keep the lock for the whole request, so requests on one session
/// run one after another.
pub type SharedSession = Arc<Mutex<Session>>;

struct SessionEntry {
    session: SharedSession,
    last_seen: DateTime<Utc>,
}

impl SessionEntry {
    fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.last_seen > ttl
    }
}

/// In-memory session store with idle expiry.
pub struct SessionStore {
    sessions: DashMap<Uuid, SessionEntry>,
    ttl: Duration,
    cookie_name: String,
}

impl SessionStore {
    pub fn new(ttl: Duration, cookie_name: impl Into<String>) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
            cookie_name: cookie_name.into(),
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Returns the live session for `id`, or a brand new one.
    ///
    /// The boolean is true when a new session (and so a new id) was issued.
    pub fn checkout(&self, id: Option<Uuid>) -> (Uuid, SharedSession, bool) {
        let now = Utc::now();

        if let Some(id) = id {
            if let Some(mut entry) = self.sessions.get_mut(&id) {
                if !entry.is_expired(now, self.ttl) {
                    entry.last_seen = now;
                    debug!(session_id = %id, "session resumed");
                    return (id, Arc::clone(&entry.session), false);
                }
            }
            if self.sessions.remove(&id).is_some() {
                debug!(session_id = %id, "expired session dropped");
            }
        }

        let id = Uuid::new_v4();
        let session = SharedSession::default();
        self.sessions.insert(
            id,
            SessionEntry {
                session: Arc::clone(&session),
                last_seen: now,
            },
        );
        debug!(session_id = %id, "session created");
        (id, session, true)
    }

    /// Drops every session idle for longer than the ttl. Returns how many went.
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let before = self.sessions.len();
        self.sessions
            .retain(|_, entry| !entry.is_expired(now, self.ttl));
        before.saturating_sub(self.sessions.len())
    }

    /// Spawns a task that purges expired sessions every `interval`.
    pub fn start_expiry_sweep(self: &Arc<Self>, interval: std::time::Duration) {
        let store = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                let purged = store.purge_expired();
                if purged > 0 {
                    info!(purged, remaining = store.len(), "expired sessions purged");
                }
            }
        });
    }

    #[cfg(test)]
    fn backdate(&self, id: Uuid, by: Duration) {
        if let Some(mut entry) = self.sessions.get_mut(&id) {
            entry.last_seen = entry.last_seen - by;
        }
    }
}
