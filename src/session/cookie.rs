//! Cookie transport for sessions.

use super::{Session, SharedSession};
use crate::state::AppState;
use axum::extract::{Request, State};
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use tokio::sync::MutexGuard;
use tracing::warn;
use uuid::Uuid;

/// The session resolved for the current request, available to handlers as an
/// `Extension`.
#[derive(Clone)]
pub struct ActiveSession(SharedSession);

impl ActiveSession {
    pub async fn lock(&self) -> MutexGuard<'_, Session> {
        self.0.lock().await
    }
}

/// Finds the value of cookie `name` among all `Cookie` headers.
pub fn read_cookie<'h>(headers: &'h HeaderMap, name: &str) -> Option<&'h str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"'))
}

pub fn session_cookie(name: &str, id: Uuid) -> String {
    format!("{name}={id}; Path=/; HttpOnly; SameSite=Lax")
}

/// Middleware: resolves the session, hands it to the handler and issues a
/// cookie whenever a new session had to be created.
pub async fn attach(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let store = &state.sessions;
    let requested = read_cookie(req.headers(), store.cookie_name())
        .and_then(|value| Uuid::parse_str(value).ok());

    let (id, session, created) = store.checkout(requested);
    req.extensions_mut().insert(ActiveSession(session));

    let mut response = next.run(req).await;
    if created {
        match HeaderValue::from_str(&session_cookie(store.cookie_name(), id)) {
            Ok(value) => {
                response.headers_mut().append(SET_COOKIE, value);
            }
            Err(error) => warn!(%error, "session cookie is not a valid header value"),
        }
    }
    response
}
