use std::sync::Arc;

use crate::config::ServerSettings;
use crate::session::SessionStore;

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    pub fn new(settings: &ServerSettings) -> Self {
        Self {
            sessions: Arc::new(SessionStore::new(
                settings.session_ttl,
                settings.cookie_name.clone(),
            )),
        }
    }
}
