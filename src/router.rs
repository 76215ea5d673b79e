//! Router assembly.

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{self, lists, todos};
use crate::session::cookie;
use crate::state::AppState;

/// Builds the application router.
///
/// Every route runs behind the session middleware, so handlers can extract
/// the visitor's [`ActiveSession`](crate::session::ActiveSession).
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/lists", get(lists::index).post(lists::create))
        .route("/lists/new", get(lists::new))
        .route("/lists/{id}", get(lists::show).post(lists::update))
        .route("/lists/{id}/edit", get(lists::edit))
        .route("/lists/{id}/destroy", post(lists::destroy))
        .route("/lists/{id}/complete_all", post(lists::complete_all))
        .route("/lists/{id}/todos", post(todos::create))
        .route("/lists/{id}/todos/{todo_id}", post(todos::update))
        .route("/lists/{id}/todos/{todo_id}/destroy", post(todos::destroy))
        .route("/javascripts/application.js", get(handlers::application_js))
        .layer(middleware::from_fn_with_state(state.clone(), cookie::attach))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
